//! CoinGecko market data provider

use crate::{
    constants::{
        COINGECKO_API_URL, COINGECKO_MARKETS_ENDPOINT, INITIAL_BACKOFF_SECS, MAX_FETCH_ATTEMPTS,
        REQUEST_TIMEOUT_SECS, SNAPSHOT_FILE, SNAPSHOT_TTL_SECS, USER_AGENT,
    },
    error::ProviderError,
    oplog::OpLog,
    provider::MarketDataProvider,
    retry::retry_with_backoff,
    snapshot::SnapshotStore,
    types::CoinRecord,
};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// CoinGecko provider with snapshot cache and retry
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    snapshot: SnapshotStore,
    oplog: Arc<OpLog>,
}

impl CoinGeckoProvider {
    /// Creates a provider using the default API endpoint and snapshot path
    pub fn new(oplog: Arc<OpLog>) -> Result<Self, ProviderError> {
        let snapshot = SnapshotStore::new(SNAPSHOT_FILE, Duration::from_secs(SNAPSHOT_TTL_SECS));
        Self::with_parts(COINGECKO_API_URL.to_string(), snapshot, oplog)
    }

    /// Creates a provider against a custom endpoint and snapshot store
    pub fn with_parts(
        base_url: String,
        snapshot: SnapshotStore,
        oplog: Arc<OpLog>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(ProviderError::Network)?;

        Ok(Self {
            client,
            base_url,
            snapshot,
            oplog,
        })
    }

    /// Builds the markets URL for one ranked page
    fn build_url(&self, page: u32, per_page: u32) -> String {
        format!(
            "{}{}?vs_currency=usd&order=market_cap_desc&per_page={}&page={}&sparkline=false&price_change_percentage=1h,24h,7d",
            self.base_url, COINGECKO_MARKETS_ENDPOINT, per_page, page
        )
    }

    /// One request attempt: transport errors and HTTP 429 are retryable,
    /// any other response is read through so a bad status surfaces as a
    /// decode failure on its body.
    async fn attempt(&self, url: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ProviderError::Network)?;

        if response.status().as_u16() == 429 {
            return Err(ProviderError::RateLimited);
        }

        response.text().await.map_err(ProviderError::Network)
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    async fn get_records(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<CoinRecord>, ProviderError> {
        // Fresh snapshot short-circuits the network entirely.
        if let Some(records) = self.snapshot.load() {
            self.oplog.success(
                "cache_hit",
                &format!("Fetched {} records from cache", records.len()),
            );
            return Ok(records);
        }

        let url = self.build_url(page, per_page);
        tracing::debug!(url = %url, "Fetching market records from CoinGecko");

        let body = match retry_with_backoff(
            MAX_FETCH_ATTEMPTS,
            Duration::from_secs(INITIAL_BACKOFF_SECS),
            || self.attempt(&url),
        )
        .await
        {
            Ok(body) => body,
            Err(e) => {
                self.oplog.failure("api_request", &e);
                return Err(e);
            }
        };

        self.oplog.success("json_response", &body);

        let records: Vec<CoinRecord> = match serde_json::from_str(&body) {
            Ok(records) => records,
            Err(e) => {
                let err = ProviderError::Decode(e.to_string());
                self.oplog.failure("decode_response", &err);
                return Err(err);
            }
        };

        // Best-effort snapshot overwrite; a write failure never fails the call.
        if let Err(e) = self.snapshot.store(&records) {
            tracing::debug!(error = %e, "Snapshot write failed");
        }

        self.oplog
            .success("fetch_records", &format!("Fetched {} records", records.len()));
        Ok(records)
    }

    fn provider_name(&self) -> &'static str {
        "coingecko"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::sink;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn quiet_oplog() -> Arc<OpLog> {
        Arc::new(OpLog::with_sink(sink()))
    }

    fn sample_records() -> Vec<CoinRecord> {
        vec![
            CoinRecord {
                id: "bitcoin".to_string(),
                name: "Bitcoin".to_string(),
                symbol: "btc".to_string(),
                price_usd: 97000.0,
                change_1h: 0.1,
                change_24h: -1.2,
                change_7d: 4.5,
                market_cap: 1.9e12,
                volume_24h: 4.2e10,
                total_supply: 2.1e7,
            },
            CoinRecord {
                id: "ethereum".to_string(),
                name: "Ethereum".to_string(),
                symbol: "eth".to_string(),
                price_usd: 3500.0,
                change_1h: -0.3,
                change_24h: 2.1,
                change_7d: -5.0,
                market_cap: 4.2e11,
                volume_24h: 1.8e10,
                total_supply: 1.2e8,
            },
        ]
    }

    /// Serves one canned HTTP response on a fresh loopback port.
    async fn one_shot_server(status_line: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "{}\r\ncontent-length: {}\r\ncontent-type: application/json\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn fresh_snapshot_short_circuits_the_network() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot =
            SnapshotStore::new(dir.path().join("snap.json"), Duration::from_secs(30));
        let records = sample_records();
        snapshot.store(&records).unwrap();

        // Unroutable base URL: any network attempt would fail the test.
        let provider = CoinGeckoProvider::with_parts(
            "http://127.0.0.1:1".to_string(),
            SnapshotStore::new(dir.path().join("snap.json"), Duration::from_secs(30)),
            quiet_oplog(),
        )
        .unwrap();

        let got = provider.get_records(1, 50).await.unwrap();
        assert_eq!(got, records);
    }

    #[tokio::test]
    async fn stale_snapshot_fetches_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.json");
        let records = sample_records();

        // Zero TTL makes the pre-seeded snapshot stale immediately.
        let stale = SnapshotStore::new(&path, Duration::ZERO);
        stale
            .store(&[sample_records().remove(1)])
            .unwrap();

        let body = serde_json::to_string(&records).unwrap();
        let base_url = one_shot_server("HTTP/1.1 200 OK", body).await;

        let provider = CoinGeckoProvider::with_parts(
            base_url,
            SnapshotStore::new(&path, Duration::ZERO),
            quiet_oplog(),
        )
        .unwrap();

        let got = provider.get_records(1, 50).await.unwrap();
        assert_eq!(got, records);

        // The fetch overwrote the snapshot on disk.
        let fresh = SnapshotStore::new(&path, Duration::from_secs(30));
        assert_eq!(fresh.load(), Some(records));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let base_url =
            one_shot_server("HTTP/1.1 200 OK", "not json at all".to_string()).await;

        let provider = CoinGeckoProvider::with_parts(
            base_url,
            SnapshotStore::new(dir.path().join("snap.json"), Duration::from_secs(30)),
            quiet_oplog(),
        )
        .unwrap();

        let err = provider.get_records(1, 50).await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[tokio::test]
    async fn non_rate_limit_status_exits_the_retry_loop() {
        let dir = tempfile::tempdir().unwrap();
        // A 500 body is read through and fails decode, without retries.
        let base_url =
            one_shot_server("HTTP/1.1 500 Internal Server Error", "oops".to_string()).await;

        let provider = CoinGeckoProvider::with_parts(
            base_url,
            SnapshotStore::new(dir.path().join("snap.json"), Duration::from_secs(30)),
            quiet_oplog(),
        )
        .unwrap();

        let err = provider.get_records(1, 50).await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[test]
    fn url_carries_page_and_change_windows() {
        let dir = tempfile::tempdir().unwrap();
        let provider = CoinGeckoProvider::with_parts(
            "https://api.example.com/api/v3".to_string(),
            SnapshotStore::new(dir.path().join("snap.json"), Duration::from_secs(30)),
            quiet_oplog(),
        )
        .unwrap();

        let url = provider.build_url(3, 50);
        assert!(url.contains("/coins/markets?"));
        assert!(url.contains("per_page=50"));
        assert!(url.contains("page=3"));
        assert!(url.contains("price_change_percentage=1h,24h,7d"));
        assert!(url.contains("order=market_cap_desc"));
    }
}
