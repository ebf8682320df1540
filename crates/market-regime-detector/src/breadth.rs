use analysis_core::BreadthCounts;
use serde::{Deserialize, Serialize};

/// S&P 500 constituent count used as the breadth denominator
pub const DEFAULT_UNIVERSE_SIZE: u32 = 503;

/// Market breadth summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreadthReading {
    /// Percent of constituents trading above their 200-day average
    pub sma200_pct: f64,
    /// New 52-week highs minus new lows
    pub highs_lows: i64,
    /// False when the screen returned nothing usable
    pub valid: bool,
}

impl BreadthReading {
    pub fn from_counts(counts: &BreadthCounts, universe_size: u32) -> Self {
        let sma200_pct = if universe_size > 0 {
            (f64::from(counts.above_sma200) / f64::from(universe_size) * 1000.0).round() / 10.0
        } else {
            0.0
        };

        Self {
            sma200_pct,
            highs_lows: i64::from(counts.new_highs) - i64::from(counts.new_lows),
            valid: counts.above_sma200 > 0,
        }
    }

    /// Neutral stand-in used when the breadth screen fails
    pub fn unavailable() -> Self {
        Self {
            sma200_pct: 50.0,
            highs_lows: 0,
            valid: false,
        }
    }
}
