//! Provider error types.

use thiserror::Error;

/// Errors that can occur during provider operations.
///
/// All variants are transient from the pipeline's point of view: a single
/// tile request that keeps failing is downgraded to a missing tile, never a
/// run failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Server responded with a non-2xx status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
}
