//! Upstream message corpus: page fetching and the on-disk snapshot.

pub mod cache;
pub mod error;
pub mod fetcher;
pub mod types;

pub use cache::{CorpusCache, SnapshotStatus};
pub use error::RetrievalError;
pub use fetcher::{HttpMessageSource, MessageSource};
pub use types::{Message, MessagePage};
