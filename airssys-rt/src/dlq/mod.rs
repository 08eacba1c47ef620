//! Dead-letter queue: capped, TTL-expiring storage for undeliverable or
//! unprocessable messages (§4.9).

pub mod entry;
pub mod error;
pub mod queue;

pub use entry::DeadLetterEntry;
pub use error::DlqError;
pub use queue::{DeadLetterQueue, DlqStats, DEFAULT_DLQ_CAPACITY};
