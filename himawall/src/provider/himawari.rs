//! Himawari-8 full-disk tile provider with mirror fallback.
//!
//! Tile URLs are deterministic per mirror:
//! `{mirror}/{nd}d/{tile_size}/{YYYY}/{MM}/{DD}/{HHMMSS}_{col}_{row}.png`
//!
//! Each tile fetch walks the configured mirror list independently (per-tile
//! fallback), retrying a bounded number of times per mirror with a short
//! linear backoff. Exhausting every mirror produces a missing-tile result,
//! not an error.

use super::http::AsyncHttpClient;
use crate::grid::TileCoordinate;
use crate::timeslot::TimeSlot;
use std::time::Duration;
use tracing::{debug, warn};

/// Default retry attempts per mirror after the first try.
pub const DEFAULT_RETRIES_PER_MIRROR: u32 = 2;

/// Default backoff between retries (multiplied by the attempt number).
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Outcome of one tile fetch.
///
/// Created by the provider and consumed exactly once by the grid assembler;
/// `data` is `None` when every mirror and retry was exhausted.
#[derive(Debug, Clone)]
pub struct TileResult {
    /// Grid cell this result belongs to
    pub coord: TileCoordinate,
    /// Raw image bytes, or `None` for a failed fetch
    pub data: Option<Vec<u8>>,
}

impl TileResult {
    /// Whether the fetch failed on every mirror.
    pub fn is_missing(&self) -> bool {
        self.data.is_none()
    }
}

/// Downloads full-disk tiles from an ordered list of mirror roots.
pub struct HimawariProvider<C> {
    client: C,
    mirrors: Vec<String>,
    nd: u32,
    tile_size: u32,
    retries_per_mirror: u32,
    retry_backoff: Duration,
}

impl<C: AsyncHttpClient> HimawariProvider<C> {
    /// Creates a provider over an injected HTTP client.
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client used for all tile requests
    /// * `mirrors` - Mirror base URLs in first-to-succeed precedence order
    /// * `nd` - Tiles per row/column (URL path component)
    /// * `tile_size` - Tile edge length in pixels (URL path component)
    pub fn new(client: C, mirrors: Vec<String>, nd: u32, tile_size: u32) -> Self {
        Self {
            client,
            mirrors,
            nd,
            tile_size,
            retries_per_mirror: DEFAULT_RETRIES_PER_MIRROR,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }

    /// Overrides the per-mirror retry budget and backoff.
    pub fn with_retries(mut self, retries_per_mirror: u32, retry_backoff: Duration) -> Self {
        self.retries_per_mirror = retries_per_mirror;
        self.retry_backoff = retry_backoff;
        self
    }

    /// Builds the tile URL for one mirror.
    pub fn tile_url(&self, mirror: &str, slot: &TimeSlot, coord: TileCoordinate) -> String {
        format!(
            "{}/{}d/{}/{}_{}_{}.png",
            mirror.trim_end_matches('/'),
            self.nd,
            self.tile_size,
            slot.path_fragment(),
            coord.col(),
            coord.row()
        )
    }

    /// Fetches one tile, falling back across mirrors.
    ///
    /// Mirrors are attempted in configured order; within a mirror, transient
    /// failures are retried up to the budget with linear backoff. The first
    /// successful response wins. Exhaustion yields a missing-tile result.
    pub async fn fetch_tile(&self, slot: &TimeSlot, coord: TileCoordinate) -> TileResult {
        for mirror in &self.mirrors {
            let url = self.tile_url(mirror, slot, coord);
            for attempt in 0..=self.retries_per_mirror {
                if attempt > 0 {
                    tokio::time::sleep(self.retry_backoff * attempt).await;
                }
                match self.client.get(&url).await {
                    Ok(bytes) => {
                        debug!(
                            row = coord.row(),
                            col = coord.col(),
                            url = %url,
                            bytes = bytes.len(),
                            "tile fetched"
                        );
                        return TileResult {
                            coord,
                            data: Some(bytes),
                        };
                    }
                    Err(e) => {
                        debug!(
                            row = coord.row(),
                            col = coord.col(),
                            url = %url,
                            attempt = attempt,
                            error = %e,
                            "tile fetch attempt failed"
                        );
                    }
                }
            }
        }

        warn!(
            row = coord.row(),
            col = coord.col(),
            mirrors = self.mirrors.len(),
            "tile missing after exhausting all mirrors and retries"
        );
        TileResult { coord, data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MockHttpClient, ProviderError};
    use chrono::{TimeZone, Utc};

    fn slot() -> TimeSlot {
        TimeSlot::resolve(Utc.with_ymd_and_hms(2024, 3, 1, 12, 40, 0).unwrap(), 0, 10)
    }

    fn provider(mock: MockHttpClient) -> HimawariProvider<MockHttpClient> {
        HimawariProvider::new(
            mock,
            vec![
                "https://primary.example/img".to_string(),
                "https://backup.example/img".to_string(),
            ],
            2,
            550,
        )
        .with_retries(1, Duration::from_millis(1))
    }

    #[test]
    fn tile_url_encodes_all_components() {
        let p = provider(MockHttpClient::new(Ok(vec![])));
        let url = p.tile_url("https://primary.example/img", &slot(), TileCoordinate::new(1, 0));
        assert_eq!(
            url,
            "https://primary.example/img/2d/550/2024/03/01/124000_0_1.png"
        );
    }

    #[test]
    fn tile_url_strips_trailing_slash() {
        let p = provider(MockHttpClient::new(Ok(vec![])));
        let url = p.tile_url("https://primary.example/img/", &slot(), TileCoordinate::new(0, 0));
        assert!(url.starts_with("https://primary.example/img/2d/"));
    }

    #[tokio::test]
    async fn success_on_first_mirror_stops_there() {
        let p = provider(MockHttpClient::new(Ok(vec![7u8; 4])));
        let result = p.fetch_tile(&slot(), TileCoordinate::new(0, 1)).await;

        assert_eq!(result.data, Some(vec![7u8; 4]));
        let urls = p.client.requested_urls();
        assert_eq!(urls.len(), 1);
        assert!(urls[0].starts_with("https://primary.example"));
    }

    #[tokio::test]
    async fn retries_then_falls_back_to_next_mirror() {
        let mock = MockHttpClient::new(Err(ProviderError::Http("refused".to_string())));
        let p = provider(mock);
        let result = p.fetch_tile(&slot(), TileCoordinate::new(0, 0)).await;

        assert!(result.is_missing());
        let urls = p.client.requested_urls();
        // 2 mirrors x (1 try + 1 retry)
        assert_eq!(urls.len(), 4);
        assert!(urls[0].starts_with("https://primary.example"));
        assert!(urls[1].starts_with("https://primary.example"));
        assert!(urls[2].starts_with("https://backup.example"));
        assert!(urls[3].starts_with("https://backup.example"));
    }

    #[tokio::test]
    async fn backup_mirror_can_rescue_a_tile() {
        // Primary 404s, backup serves. Suffix matching would hit both, so
        // script the full primary URL as the failing one.
        let failing = "https://primary.example/img/2d/550/2024/03/01/124000_1_0.png";
        let mock = MockHttpClient::new(Ok(vec![9u8; 2])).respond(
            failing,
            Err(ProviderError::Status {
                status: 404,
                url: failing.to_string(),
            }),
        );
        let p = provider(mock);
        let result = p.fetch_tile(&slot(), TileCoordinate::new(0, 1)).await;

        assert_eq!(result.data, Some(vec![9u8; 2]));
        let urls = p.client.requested_urls();
        assert!(urls.last().unwrap().starts_with("https://backup.example"));
    }

    #[tokio::test]
    async fn missing_result_keeps_coordinate() {
        let mock = MockHttpClient::new(Err(ProviderError::Http("down".to_string())));
        let p = provider(mock);
        let coord = TileCoordinate::new(1, 1);
        let result = p.fetch_tile(&slot(), coord).await;
        assert!(result.is_missing());
        assert_eq!(result.coord, coord);
    }
}
