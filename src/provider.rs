//! Provider abstraction for fetching ranked market data

use crate::error::ProviderError;
use crate::types::CoinRecord;
use async_trait::async_trait;

/// Trait for ranked market data providers
///
/// Implementations resolve one page of records ordered by market cap,
/// from a remote API or a test double.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetches one page of ranked records
    ///
    /// # Arguments
    /// * `page` - 1-based page number
    /// * `per_page` - records per page
    async fn get_records(&self, page: u32, per_page: u32)
        -> Result<Vec<CoinRecord>, ProviderError>;

    /// Returns the name of this provider
    fn provider_name(&self) -> &'static str;
}
