pub mod engine;
pub mod error;
pub mod prompt;

pub use engine::{AnswerEngine, DEFAULT_MAX_TOKENS};
pub use error::GenerationError;
pub use prompt::SENTINEL_ANSWER;
