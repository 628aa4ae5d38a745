use crate::messages::Message;

/// Render the corpus as one `user_name: message` line per message.
///
/// Corpus order is preserved and nothing is truncated, filtered or merged.
/// Callers short-circuit on an empty corpus before getting here.
pub fn format_context(messages: &[Message]) -> String {
    let mut context = String::new();
    for (i, msg) in messages.iter().enumerate() {
        if i > 0 {
            context.push('\n');
        }
        context.push_str(&msg.user_name);
        context.push_str(": ");
        context.push_str(&msg.message);
    }
    context
}
