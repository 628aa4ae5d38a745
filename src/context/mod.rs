//! Context rendering for the answer prompt.

mod formatter;

pub use formatter::format_context;
