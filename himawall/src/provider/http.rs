//! HTTP client abstraction for testability

use super::types::ProviderError;
use std::future::Future;
use tracing::{debug, trace, warn};

/// Default timeout for a single tile request, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent string for HTTP requests.
/// Some mirrors reject requests without a User-Agent.
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Trait for asynchronous HTTP GET operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in provider and assembler tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response body as bytes, or an error on transport failure or
    /// non-2xx status.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send;
}

/// Real HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with the default tile-request timeout.
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_timeout(DEFAULT_HTTP_TIMEOUT_SECS)
    }

    /// Creates a new ReqwestClient with a custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| ProviderError::Http(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        trace!(url = url, "HTTP GET request starting");

        let response = match self.client.get(url).send().await {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(ProviderError::Http(format!("request failed: {}", e)));
            }
        };

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        match response.bytes().await {
            Ok(bytes) => {
                trace!(url = url, bytes = bytes.len(), "HTTP response body read");
                Ok(bytes.to_vec())
            }
            Err(e) => {
                warn!(url = url, error = %e, "failed to read response body");
                Err(ProviderError::Http(format!(
                    "failed to read response: {}",
                    e
                )))
            }
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock HTTP client scripting responses per URL suffix.
    ///
    /// Responses are matched by `url.ends_with(key)`, so tests can script
    /// tiles by their `_{col}_{row}.png` suffix without knowing the resolved
    /// time slot. Unmatched URLs receive the default response. All requested
    /// URLs are recorded in order.
    pub struct MockHttpClient {
        responses: HashMap<String, Result<Vec<u8>, ProviderError>>,
        default: Result<Vec<u8>, ProviderError>,
        pub requests: Mutex<Vec<String>>,
    }

    impl MockHttpClient {
        pub fn new(default: Result<Vec<u8>, ProviderError>) -> Self {
            Self {
                responses: HashMap::new(),
                default,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn respond(mut self, url_suffix: &str, response: Result<Vec<u8>, ProviderError>) -> Self {
            self.responses.insert(url_suffix.to_string(), response);
            self
        }

        pub fn requested_urls(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl AsyncHttpClient for MockHttpClient {
        async fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.responses
                .iter()
                .find(|(suffix, _)| url.ends_with(suffix.as_str()))
                .map(|(_, response)| response.clone())
                .unwrap_or_else(|| self.default.clone())
        }
    }

    #[tokio::test]
    async fn mock_client_returns_scripted_response() {
        let mock = MockHttpClient::new(Err(ProviderError::Http("no script".to_string())))
            .respond("_0_0.png", Ok(vec![1, 2, 3]));

        let hit = mock.get("https://m/2d/550/2024/03/01/121000_0_0.png").await;
        assert_eq!(hit.unwrap(), vec![1, 2, 3]);

        let miss = mock.get("https://m/2d/550/2024/03/01/121000_1_0.png").await;
        assert!(miss.is_err());
    }

    #[tokio::test]
    async fn mock_client_records_requests() {
        let mock = MockHttpClient::new(Ok(vec![]));
        let _ = mock.get("https://a/x.png").await;
        let _ = mock.get("https://b/y.png").await;
        assert_eq!(
            mock.requested_urls(),
            vec!["https://a/x.png".to_string(), "https://b/y.png".to_string()]
        );
    }
}
