//! Ticker Classifier
//!
//! Turns one security's snapshot into an actionable result: trend, RSI status,
//! analyst consensus, momentum and watchlist scores, and a buy/watch/wait decision.

pub mod classifier;
pub mod models;
pub mod scoring;

pub use classifier::TickerClassifier;
pub use models::{Consensus, Decision, RsiStatus, TickerResult};
pub use scoring::{decide, momentum_score, watchlist_score};
