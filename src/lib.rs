//! # coinwatch
//!
//! Interactive terminal table for ranked cryptocurrency market data.
//!
//! A [`providers::CoinGeckoProvider`] resolves one page of ranked records,
//! consulting a short-lived on-disk snapshot before touching the network and
//! retrying transient failures with exponential backoff. The fetched record
//! set is owned by a [`view::ViewState`] that derives the visible, sortable,
//! paginated window rendered by the terminal UI.
//!
//! ```no_run
//! use coinwatch::oplog::OpLog;
//! use coinwatch::provider::MarketDataProvider;
//! use coinwatch::providers::CoinGeckoProvider;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let oplog = Arc::new(OpLog::open("coinwatch.log")?);
//! let provider = CoinGeckoProvider::new(oplog)?;
//! let records = provider.get_records(1, 50).await?;
//! println!("fetched {} records", records.len());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod constants;
pub mod error;
pub mod oplog;
pub mod provider;
pub mod providers;
pub mod retry;
pub mod snapshot;
pub mod types;
pub mod ui;
pub mod view;

// Re-export commonly used types
pub use app::{Action, App, Msg};
pub use error::ProviderError;
pub use provider::MarketDataProvider;
pub use types::{CoinRecord, SortDirection, SortKey};
pub use view::ViewState;
