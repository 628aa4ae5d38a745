pub mod context;
pub mod core;
pub mod llm;
pub mod messages;
pub mod qa;
pub mod server;
pub mod state;

pub use crate::core::config::AppConfig;
pub use crate::core::errors::ApiError;
pub use crate::messages::{CorpusCache, Message, MessageSource, RetrievalError};
pub use crate::qa::{AnswerEngine, GenerationError, SENTINEL_ANSWER};
pub use crate::state::AppState;
