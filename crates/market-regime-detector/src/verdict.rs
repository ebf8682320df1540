//! Composite market verdict.
//!
//! Starts from a base score and adds fixed points per confirming signal:
//! volatility term structure, falling short-dated volatility, breadth, net
//! new highs, crypto risk appetite and calm bond volatility. Points are
//! summed first and the total is clamped to 0-100 afterwards.

use analysis_core::IndexFamily;
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::indices::IndexReading;
use crate::readings::MarketReadings;

pub const BASE_SCORE: i32 = 10;
pub const TERM_STRUCTURE_POINTS: i32 = 20;
pub const FALLING_VOLATILITY_POINTS: i32 = 20;
pub const BREADTH_POINTS: i32 = 20;
pub const HIGHS_LOWS_POINTS: i32 = 10;
pub const CRYPTO_POINTS: i32 = 10;
pub const BOND_VOLATILITY_POINTS: i32 = 10;

const CONTANGO_ABOVE: f64 = 1.1;
const BACKWARDATION_BELOW: f64 = 1.0;
const CRYPTO_RISK_ON_ABOVE: f64 = 45.0;
const BOND_VOLATILITY_CALM_BELOW: f64 = 110.0;
const BUY_AT: u8 = 75;
const SELL_AT: u8 = 35;

const INCOMPLETE_DATA_CAVEAT: &str = " ⚠️ Incomplete data (breadth unavailable)";

/// Shape of the volatility curve (longer-dated over shorter-dated)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TermStructure {
    Contango,
    Flat,
    Backwardation,
}

impl TermStructure {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < BACKWARDATION_BELOW {
            TermStructure::Backwardation
        } else if ratio > CONTANGO_ABOVE {
            TermStructure::Contango
        } else {
            TermStructure::Flat
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TermStructure::Contango => "Contango (Normal)",
            TermStructure::Flat => "Flat (Caution)",
            TermStructure::Backwardation => "Backwardation (Panic)",
        }
    }

    pub fn points(&self) -> i32 {
        match self {
            TermStructure::Contango => TERM_STRUCTURE_POINTS,
            TermStructure::Flat => 0,
            TermStructure::Backwardation => -TERM_STRUCTURE_POINTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketSignal {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "SELL")]
    Sell,
}

impl MarketSignal {
    pub fn from_score(score: u8) -> Self {
        if score >= BUY_AT {
            MarketSignal::Buy
        } else if score <= SELL_AT {
            MarketSignal::Sell
        } else {
            MarketSignal::Hold
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarketSignal::Buy => "BUY",
            MarketSignal::Hold => "HOLD",
            MarketSignal::Sell => "SELL",
        }
    }
}

/// Points contributed by each signal, before clamping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub components: Vec<(String, i32)>,
}

impl ScoreBreakdown {
    fn add(&mut self, name: &str, points: i32) {
        self.components.push((name.to_string(), points));
    }

    pub fn raw_total(&self) -> i32 {
        self.components.iter().map(|(_, p)| p).sum()
    }
}

/// Clamp a raw composite sum into 0-100
pub fn clamp_composite(raw: i32) -> u8 {
    raw.clamp(0, 100) as u8
}

/// Longer-dated over shorter-dated volatility, rounded to 2 decimals.
/// Falls back to 1.0 (flat) only when the denominator is unavailable or zero;
/// an unavailable longer reading counts as 0 and so reads as backwardation.
pub fn term_structure_ratio(shorter: &IndexReading, longer: &IndexReading) -> f64 {
    if !shorter.available || shorter.value <= 0.0 {
        return 1.0;
    }
    ((longer.value / shorter.value) * 100.0).round() / 100.0
}

/// Market-wide verdict for one scan cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictResult {
    /// Composite score, 0-100
    pub score: u8,
    pub signal: MarketSignal,
    pub term_ratio: f64,
    pub term_structure: TermStructure,
    pub breadth_valid: bool,
    pub bull_probability: u8,
    pub bear_probability: u8,
    /// e.g. "BUY (100/100)", with a caveat appended when breadth is invalid
    pub display: String,
    pub breakdown: ScoreBreakdown,
    pub unavailable: Vec<IndexFamily>,
    pub generated_at: DateTime<Utc>,
}

impl VerdictResult {
    /// True when the renderer must show the incomplete-data caveat
    pub fn needs_caveat(&self) -> bool {
        !self.breadth_valid
    }
}

pub struct CompositeScorer;

impl CompositeScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn breakdown(&self, readings: &MarketReadings) -> (ScoreBreakdown, f64, TermStructure) {
        let vix = readings.index(IndexFamily::Vix);
        let vix3m = readings.index(IndexFamily::Vix3m);
        let bond_vol = readings.index(IndexFamily::Move);

        let term_ratio = term_structure_ratio(&vix, &vix3m);
        let term = TermStructure::from_ratio(term_ratio);

        let mut breakdown = ScoreBreakdown::default();
        breakdown.add("base", BASE_SCORE);
        breakdown.add("term_structure", term.points());

        if vix.change < 0.0 {
            breakdown.add("falling_volatility", FALLING_VOLATILITY_POINTS);
        }
        if readings.breadth.sma200_pct > 50.0 {
            breakdown.add("breadth", BREADTH_POINTS);
        }
        if readings.breadth.highs_lows > 0 {
            breakdown.add("net_new_highs", HIGHS_LOWS_POINTS);
        }
        if readings.crypto.value > CRYPTO_RISK_ON_ABOVE {
            breakdown.add("crypto_risk_on", CRYPTO_POINTS);
        }
        // An unavailable MOVE reads as 0 and still counts as calm
        if bond_vol.value < BOND_VOLATILITY_CALM_BELOW {
            breakdown.add("calm_bond_volatility", BOND_VOLATILITY_POINTS);
        }

        (breakdown, term_ratio, term)
    }

    /// Score the full batch of readings
    pub fn score(&self, readings: &MarketReadings) -> VerdictResult {
        let (breakdown, term_ratio, term_structure) = self.breakdown(readings);
        let score = clamp_composite(breakdown.raw_total());
        let signal = MarketSignal::from_score(score);
        let breadth_valid = readings.breadth.valid;
        let unavailable = readings.unavailable_families();

        if !unavailable.is_empty() {
            let names: Vec<&str> = unavailable.iter().map(|f| f.name()).collect();
            warn!("Verdict computed with unavailable readings: {}", names.join(", "));
        }
        if !breadth_valid {
            warn!("Breadth data unavailable; verdict carries incomplete-data caveat");
        }

        let mut display = format!("{} ({}/100)", signal.label(), score);
        if !breadth_valid {
            display.push_str(INCOMPLETE_DATA_CAVEAT);
        }

        VerdictResult {
            score,
            signal,
            term_ratio,
            term_structure,
            breadth_valid,
            bull_probability: score,
            bear_probability: 100 - score,
            display,
            breakdown,
            unavailable,
            generated_at: Utc::now(),
        }
    }
}

impl Default for CompositeScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breadth::BreadthReading;
    use analysis_core::IndexQuote;
    use std::collections::BTreeMap;

    fn readings(
        closes: &[(IndexFamily, &[f64])],
        crypto: Option<u8>,
        breadth: BreadthReading,
    ) -> MarketReadings {
        let quotes: BTreeMap<IndexFamily, Option<IndexQuote>> = closes
            .iter()
            .map(|(family, series)| (*family, IndexQuote::from_closes(*family, series)))
            .collect();
        MarketReadings::assemble(&quotes, crypto, 50, breadth)
    }

    fn bullish_breadth() -> BreadthReading {
        BreadthReading {
            sma200_pct: 55.0,
            highs_lows: 5,
            valid: true,
        }
    }

    #[test]
    fn test_full_bullish_scenario() {
        let market = readings(
            &[
                (IndexFamily::Vix, &[19.0, 18.0]),
                (IndexFamily::Vix3m, &[21.0, 21.0]),
                (IndexFamily::Move, &[96.0, 95.0]),
            ],
            Some(50),
            bullish_breadth(),
        );

        let verdict = CompositeScorer::new().score(&market);

        assert!((verdict.term_ratio - 1.17).abs() < 1e-9);
        assert_eq!(verdict.term_structure, TermStructure::Contango);
        assert_eq!(verdict.breakdown.raw_total(), 100);
        assert_eq!(verdict.score, 100);
        assert_eq!(verdict.signal, MarketSignal::Buy);
        assert_eq!(verdict.display, "BUY (100/100)");
        assert_eq!(verdict.bear_probability, 0);
        assert!(!verdict.needs_caveat());
    }

    #[test]
    fn test_stressed_scenario_sells() {
        let market = readings(
            &[
                (IndexFamily::Vix, &[28.0, 32.0]),
                (IndexFamily::Vix3m, &[27.0, 28.0]),
                (IndexFamily::Move, &[120.0, 130.0]),
            ],
            Some(20),
            BreadthReading {
                sma200_pct: 30.0,
                highs_lows: -40,
                valid: true,
            },
        );

        let verdict = CompositeScorer::new().score(&market);

        // 28 / 32 = 0.875
        assert_eq!(verdict.term_structure, TermStructure::Backwardation);
        assert_eq!(verdict.breakdown.raw_total(), -10);
        assert_eq!(verdict.score, 0);
        assert_eq!(verdict.signal, MarketSignal::Sell);
        assert_eq!(verdict.display, "SELL (0/100)");
    }

    #[test]
    fn test_flat_term_structure_holds() {
        let market = readings(
            &[
                (IndexFamily::Vix, &[20.0, 20.0]),
                (IndexFamily::Vix3m, &[21.0, 21.0]),
                (IndexFamily::Move, &[100.0, 100.0]),
            ],
            Some(50),
            bullish_breadth(),
        );

        let verdict = CompositeScorer::new().score(&market);

        // 10 + 0 + 20 + 10 + 10 + 10
        assert_eq!(verdict.term_structure, TermStructure::Flat);
        assert_eq!(verdict.score, 60);
        assert_eq!(verdict.signal, MarketSignal::Hold);
    }

    #[test]
    fn test_ratio_boundaries() {
        assert_eq!(TermStructure::from_ratio(1.1), TermStructure::Flat);
        assert_eq!(TermStructure::from_ratio(1.0), TermStructure::Flat);
        assert_eq!(TermStructure::from_ratio(0.99), TermStructure::Backwardation);
        assert_eq!(TermStructure::from_ratio(1.11), TermStructure::Contango);
    }

    #[test]
    fn test_unavailable_vix_gives_flat_ratio() {
        let market = readings(&[(IndexFamily::Vix3m, &[21.0])], Some(50), bullish_breadth());
        let verdict = CompositeScorer::new().score(&market);

        assert_eq!(verdict.term_ratio, 1.0);
        assert_eq!(verdict.term_structure, TermStructure::Flat);
        assert!(verdict.unavailable.contains(&IndexFamily::Vix));
    }

    #[test]
    fn test_unavailable_longer_vol_reads_as_backwardation() {
        let market = readings(&[(IndexFamily::Vix, &[18.0, 18.0])], Some(50), BreadthReading::unavailable());
        let verdict = CompositeScorer::new().score(&market);

        assert_eq!(verdict.term_ratio, 0.0);
        assert_eq!(verdict.term_structure, TermStructure::Backwardation);
        // 10 - 20 + 10 (crypto) + 10 (MOVE sentinel)
        assert_eq!(verdict.score, 10);
        assert!(verdict.unavailable.contains(&IndexFamily::Vix3m));
    }

    #[test]
    fn test_clamp_composite() {
        assert_eq!(clamp_composite(130), 100);
        assert_eq!(clamp_composite(-30), 0);
        assert_eq!(clamp_composite(55), 55);
    }

    #[test]
    fn test_signal_thresholds() {
        assert_eq!(MarketSignal::from_score(75), MarketSignal::Buy);
        assert_eq!(MarketSignal::from_score(74), MarketSignal::Hold);
        assert_eq!(MarketSignal::from_score(36), MarketSignal::Hold);
        assert_eq!(MarketSignal::from_score(35), MarketSignal::Sell);
    }

    #[test]
    fn test_invalid_breadth_adds_caveat() {
        let market = readings(
            &[
                (IndexFamily::Vix, &[19.0, 18.0]),
                (IndexFamily::Vix3m, &[21.0, 21.0]),
                (IndexFamily::Move, &[95.0]),
            ],
            Some(50),
            BreadthReading::unavailable(),
        );

        let verdict = CompositeScorer::new().score(&market);

        // 10 + 20 + 20 + 10 + 10, no breadth points
        assert_eq!(verdict.score, 70);
        assert!(verdict.needs_caveat());
        assert!(verdict.display.starts_with("HOLD (70/100)"));
        assert!(verdict.display.contains("Incomplete data"));
    }

    #[test]
    fn test_verdict_serializes_signal_label() {
        let market = readings(&[], None, BreadthReading::unavailable());
        let verdict = CompositeScorer::new().score(&market);
        let json = serde_json::to_value(&verdict).unwrap();

        assert!(json["signal"].is_string());
        assert_eq!(json["breadth_valid"], false);
    }
}
