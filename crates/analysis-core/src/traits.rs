use async_trait::async_trait;
use crate::{BreadthCounts, CorporateEvent, IndexFamily, IndexQuote, ScanError, TickerInput};

/// Source of per-security snapshots (fundamentals screen plus quote history)
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    async fn fetch_ticker(&self, ticker: &str) -> Result<TickerInput, ScanError>;
}

/// Source of market-wide volatility, breadth and sentiment readings
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_index(&self, family: IndexFamily) -> Result<IndexQuote, ScanError>;

    /// Crypto fear & greed index, 0-100
    async fn fetch_crypto_sentiment(&self) -> Result<u8, ScanError>;

    async fn fetch_breadth(&self) -> Result<BreadthCounts, ScanError>;
}

/// Source of scheduled corporate events
#[async_trait]
pub trait EventCalendar: Send + Sync {
    async fn events_for(&self, ticker: &str) -> Result<Vec<CorporateEvent>, ScanError>;
}
