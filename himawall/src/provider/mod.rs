//! Satellite imagery tile provider.
//!
//! This module provides the HTTP client abstraction and the Himawari-8
//! full-disk tile provider, including per-tile mirror fallback and bounded
//! retry with backoff. A fetch that exhausts every mirror yields a
//! missing-tile result rather than an error; partial-failure policy lives in
//! the grid assembler.

mod himawari;
mod http;
mod types;

pub use himawari::{HimawariProvider, TileResult, DEFAULT_RETRIES_PER_MIRROR, DEFAULT_RETRY_BACKOFF};
pub use http::{AsyncHttpClient, ReqwestClient, DEFAULT_HTTP_TIMEOUT_SECS};
pub use types::ProviderError;

#[cfg(test)]
pub use http::tests::MockHttpClient;
