//! Scan cycle orchestration: concurrent per-ticker fetch and classification,
//! market readings and the composite verdict, plus upcoming events.

pub mod config;
pub mod events;
pub mod scanner;
pub mod telemetry;

pub use config::ScannerConfig;
pub use events::{industry_facets, upcoming_within, IndustryFacet};
pub use scanner::{BatchOutcome, MarketOverview, MarketScan, MarketScanner, TickerFailure};
pub use telemetry::init_tracing;
