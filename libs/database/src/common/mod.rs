//! Shared database utilities: connection retry with exponential backoff.

mod retry;

pub use retry::{retry, retry_with_backoff, RetryConfig};
