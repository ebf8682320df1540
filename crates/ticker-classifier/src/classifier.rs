use analysis_core::{normalize, Field, NormalizedSnapshot, ScanError, TickerInput};
use rayon::prelude::*;
use technical_analysis::{round2, TechnicalCalculator};

use crate::models::{Consensus, RsiStatus, TickerResult};
use crate::scoring::{decide, momentum_score, watchlist_score};

const UNKNOWN: &str = "Unknown";

/// Classifies one security at a time; every step is a pure function of its input
pub struct TickerClassifier {
    calculator: TechnicalCalculator,
}

impl TickerClassifier {
    pub fn new() -> Self {
        Self {
            calculator: TechnicalCalculator::new(),
        }
    }

    pub fn classify(&self, input: &TickerInput) -> Result<TickerResult, ScanError> {
        let snap = normalize(&input.snapshot);
        if snap.ticker.is_empty() {
            return Err(ScanError::InvalidSnapshot(
                "snapshot carries no ticker symbol".to_string(),
            ));
        }

        let derived = self.calculator.derive(&snap, &input.profile, &input.history);

        let momentum = momentum_score(
            derived.price,
            derived.sma50,
            derived.sma200,
            snap.change_pct,
            snap.rsi,
        );
        let analyst_count = input.profile.analyst_count;
        let watchlist = watchlist_score(derived.upside_pct, analyst_count, snap.recom, momentum);
        let decision = decide(derived.price, derived.suggested_buy, derived.trend, momentum);

        let theme = input
            .profile
            .sector
            .clone()
            .or_else(|| snap.sector.clone())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let industry = snap.industry.clone().unwrap_or_else(|| theme.clone());

        tracing::debug!(
            "{}: trend={} decision={} momentum={} watchlist={}",
            snap.ticker,
            derived.trend.label(),
            decision.label(),
            momentum,
            watchlist
        );

        Ok(TickerResult {
            company_name: input
                .profile
                .name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| snap.ticker.clone()),
            inst_own: institutional_ownership(&snap, input),
            price: derived.price,
            target_price: snap.target_price,
            upside_pct: derived.upside_pct,
            consensus: Consensus::from_recom(snap.recom),
            analyst_count,
            suggested_buy: derived.suggested_buy,
            decision,
            volume: snap.volume,
            risk_reward: derived.risk_reward,
            trend: derived.trend,
            rsi: snap.rsi,
            rsi_status: RsiStatus::from_rsi(snap.rsi),
            atr: derived.atr,
            stop_loss: derived.stop_loss,
            sma50: derived.sma50,
            sma200: derived.sma200,
            change_pct: snap.change_pct,
            momentum_score: momentum,
            watchlist_score: watchlist,
            industry,
            theme,
            ticker: snap.ticker,
        })
    }

    /// Classify an already-fetched batch in parallel.
    /// Output order matches input order; one ticker's failure does not affect the others.
    pub fn classify_batch(&self, inputs: &[TickerInput]) -> Vec<Result<TickerResult, ScanError>> {
        inputs.par_iter().map(|input| self.classify(input)).collect()
    }
}

impl Default for TickerClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot ownership, else the profile's institutional fraction as a percent
fn institutional_ownership(snap: &NormalizedSnapshot, input: &TickerInput) -> f64 {
    if snap.inst_own != 0.0 && snap.is_available(Field::InstOwn) {
        return snap.inst_own;
    }
    input
        .profile
        .held_percent_institutions
        .filter(|f| f.is_finite())
        .map(|f| round2(f * 100.0))
        .unwrap_or(0.0)
}
