//! Constants for coinwatch
//!
//! All configuration is centralized here. No runtime configuration file is
//! used - the application operates with these compile-time constants.

/// CoinGecko API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko endpoint for ranked market listings
pub const COINGECKO_MARKETS_ENDPOINT: &str = "/coins/markets";

/// HTTP request timeout when fetching market data (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Maximum number of fetch attempts before giving up
pub const MAX_FETCH_ATTEMPTS: u32 = 5;

/// Initial backoff delay between fetch attempts (in seconds); doubles per attempt
pub const INITIAL_BACKOFF_SECS: u64 = 1;

/// How long the on-disk snapshot stays fresh before a refetch (in seconds)
pub const SNAPSHOT_TTL_SECS: u64 = 30;

/// Path of the on-disk market snapshot
pub const SNAPSHOT_FILE: &str = "crypto_cache.json";

/// Path of the append-only operation log
pub const LOG_FILE: &str = "coinwatch.log";

/// Records requested per page
pub const DEFAULT_PER_PAGE: u32 = 50;

/// First page requested at startup
pub const DEFAULT_PAGE: u32 = 1;

/// Longest result summary written to the operation log, in bytes
pub const OPLOG_SUMMARY_MAX: usize = 256;

/// User agent for HTTP requests
pub const USER_AGENT: &str = "coinwatch/0.1.0";
