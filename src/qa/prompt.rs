use crate::llm::ChatMessage;

/// The only answer reserved for "the context does not say".
pub const SENTINEL_ANSWER: &str = "I don't know.";

const SYSTEM_PROMPT: &str = "You are a precise, factual assistant. \
Answer questions using only the member messages provided as context. \
Never use outside knowledge, never guess, and never invent details that the messages do not state.";

pub fn system_message() -> ChatMessage {
    ChatMessage::system(SYSTEM_PROMPT)
}

pub fn user_message(context: &str, question: &str) -> ChatMessage {
    ChatMessage::user(format!(
        "Context (one message per line, formatted as \"name: message\"):\n\
         {context}\n\n\
         Question: {question}\n\n\
         Answer the question using only the context above. \
         If the context does not explicitly state the answer, reply exactly with \"{SENTINEL_ANSWER}\" and nothing else."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_carries_context_question_and_fallback() {
        let msg = user_message("Alice: hi\nBob: bye", "Who said bye?");

        assert_eq!(msg.role, "user");
        assert!(msg.content.contains("Alice: hi\nBob: bye"));
        assert!(msg.content.contains("Question: Who said bye?"));
        assert!(msg.content.contains("reply exactly with \"I don't know.\""));
    }

    #[test]
    fn system_message_restricts_to_context() {
        let msg = system_message();
        assert_eq!(msg.role, "system");
        assert!(msg.content.contains("only"));
    }
}
