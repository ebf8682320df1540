use analysis_core::{
    CorporateEvent, EventCalendar, IndexFamily, IndexQuote, MarketDataProvider, ScanError,
    SnapshotProvider,
};
use chrono::{DateTime, Utc};
use market_regime_detector::{BreadthReading, CompositeScorer, MarketReadings, VerdictResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use ticker_classifier::{TickerClassifier, TickerResult};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::ScannerConfig;
use crate::events::{industry_facets, upcoming_within, IndustryFacet};

/// A ticker that produced no result this cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerFailure {
    pub ticker: String,
    pub reason: String,
}

/// Results of one ticker list, in input order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub results: Vec<TickerResult>,
    pub failures: Vec<TickerFailure>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketOverview {
    pub readings: MarketReadings,
    pub verdict: VerdictResult,
}

/// Everything a scan cycle hands to the renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketScan {
    pub main: BatchOutcome,
    pub custom: BatchOutcome,
    pub market: MarketOverview,
    /// Upcoming events for the custom list
    pub events: Vec<CorporateEvent>,
    pub industries: Vec<IndustryFacet>,
    pub generated_at: DateTime<Utc>,
}

pub struct MarketScanner {
    snapshots: Arc<dyn SnapshotProvider>,
    market: Arc<dyn MarketDataProvider>,
    calendar: Option<Arc<dyn EventCalendar>>,
    classifier: Arc<TickerClassifier>,
    scorer: CompositeScorer,
    config: ScannerConfig,
}

impl MarketScanner {
    pub fn new(
        snapshots: Arc<dyn SnapshotProvider>,
        market: Arc<dyn MarketDataProvider>,
        config: ScannerConfig,
    ) -> Self {
        Self {
            snapshots,
            market,
            calendar: None,
            classifier: Arc::new(TickerClassifier::new()),
            scorer: CompositeScorer::new(),
            config,
        }
    }

    pub fn with_calendar(mut self, calendar: Arc<dyn EventCalendar>) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Fetch and classify every ticker concurrently.
    /// A failing ticker is recorded and skipped; the rest of the batch continues.
    pub async fn scan_tickers(&self, tickers: &[String]) -> BatchOutcome {
        let tickers: Vec<String> = tickers
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        let total = tickers.len();

        tracing::info!("📊 Scanning {} symbols", total);

        let permits = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for (idx, ticker) in tickers.iter().cloned().enumerate() {
            let snapshots = Arc::clone(&self.snapshots);
            let classifier = Arc::clone(&self.classifier);
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let result = match permits.acquire_owned().await {
                    Ok(_permit) => match snapshots.fetch_ticker(&ticker).await {
                        Ok(mut input) => {
                            if input.ticker().trim().is_empty() {
                                input.snapshot.ticker = ticker.clone();
                            }
                            classifier.classify(&input)
                        }
                        Err(e) => Err(e),
                    },
                    Err(e) => Err(ScanError::upstream(&ticker, e)),
                };
                (idx, result)
            });
        }

        let mut slots: Vec<Option<Result<TickerResult, ScanError>>> = vec![None; total];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, result)) => slots[idx] = Some(result),
                Err(e) => tracing::error!("Scan task error: {}", e),
            }
        }

        let mut outcome = BatchOutcome {
            total,
            ..Default::default()
        };
        for (ticker, slot) in tickers.into_iter().zip(slots) {
            match slot {
                Some(Ok(result)) => outcome.results.push(result),
                Some(Err(e)) => {
                    tracing::warn!("Failed to analyze {}: {}", ticker, e);
                    outcome.failures.push(TickerFailure {
                        ticker,
                        reason: e.to_string(),
                    });
                }
                None => outcome.failures.push(TickerFailure {
                    ticker,
                    reason: "scan task aborted".to_string(),
                }),
            }
        }

        let actionable = outcome.results.iter().filter(|r| r.decision.is_actionable()).count();
        tracing::info!(
            "✅ Scan complete: {}/{} analyzed, {} actionable, {} failed",
            outcome.results.len(),
            total,
            actionable,
            outcome.failures.len()
        );

        outcome
    }

    /// Fetch every market reading, then score the complete batch
    pub async fn read_market(&self) -> MarketOverview {
        let mut tasks = JoinSet::new();
        for family in IndexFamily::ALL {
            let market = Arc::clone(&self.market);
            tasks.spawn(async move { (family, market.fetch_index(family).await) });
        }

        let (crypto, breadth) = tokio::join!(
            self.market.fetch_crypto_sentiment(),
            self.market.fetch_breadth()
        );

        let mut quotes: BTreeMap<IndexFamily, Option<IndexQuote>> = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((family, Ok(quote))) => {
                    quotes.insert(family, Some(quote));
                }
                Ok((family, Err(e))) => {
                    tracing::warn!("{} unavailable: {}", family.name(), e);
                    quotes.insert(family, None);
                }
                Err(e) => tracing::error!("Index task error: {}", e),
            }
        }

        let crypto = match crypto {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Crypto sentiment unavailable: {}", e);
                None
            }
        };
        let breadth = match breadth {
            Ok(counts) => BreadthReading::from_counts(&counts, self.config.breadth_universe_size),
            Err(e) => {
                tracing::warn!("Breadth unavailable: {}", e);
                BreadthReading::unavailable()
            }
        };

        let readings = MarketReadings::assemble(&quotes, crypto, self.config.crypto_fallback, breadth);
        let verdict = self.scorer.score(&readings);

        tracing::info!(
            "Market verdict: {} (term structure {:.2}, {})",
            verdict.display,
            verdict.term_ratio,
            verdict.term_structure.label()
        );

        MarketOverview { readings, verdict }
    }

    /// Upcoming events for the given tickers within the configured horizon
    pub async fn upcoming_events(&self, tickers: &[String]) -> Vec<CorporateEvent> {
        let Some(calendar) = &self.calendar else {
            return Vec::new();
        };

        let mut events = Vec::new();
        for ticker in tickers {
            match calendar.events_for(ticker).await {
                Ok(found) => events.extend(found),
                Err(e) => tracing::debug!("No calendar for {}: {}", ticker, e),
            }
        }

        let upcoming = upcoming_within(events, Utc::now().date_naive(), self.config.event_horizon_days);
        for event in &upcoming {
            tracing::debug!("📅 {} {} on {}", event.ticker, event.kind.as_str(), event.date);
        }
        upcoming
    }

    /// Full cycle: both ticker lists, market verdict, events and industry facets
    pub async fn run(&self, main: &[String], custom: &[String]) -> MarketScan {
        let main_outcome = self.scan_tickers(main).await;
        let custom_outcome = self.scan_tickers(custom).await;
        let market = self.read_market().await;

        let custom_tickers: Vec<String> = custom_outcome.results.iter().map(|r| r.ticker.clone()).collect();
        let events = self.upcoming_events(&custom_tickers).await;
        let industries = industry_facets(main_outcome.results.iter().chain(custom_outcome.results.iter()));

        MarketScan {
            main: main_outcome,
            custom: custom_outcome,
            market,
            events,
            industries,
            generated_at: Utc::now(),
        }
    }
}
