//! Per-index status labels.
//!
//! Every tracked reading (volatility gauges, tail-risk, broad index, crypto
//! sentiment, breadth) is graded on its own scale. An unavailable reading
//! keeps a 0 sentinel value and the `N/A` status so later stages can tell
//! degraded input apart from a real zero.

use analysis_core::{IndexFamily, IndexQuote};
use serde::{Deserialize, Serialize};

use crate::breadth::BreadthReading;

/// Display tone for a status or change; the renderer maps it to a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Positive,
    Negative,
    Warning,
    Neutral,
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexStatus {
    Complacency,
    Normal,
    Fear,
    Panic,
    /// SKEW tail-risk alarm
    BlackSwan,
    /// Broad index shows its rounded level instead of a grade
    Level(i64),
    ExtremeFear,
    Neutral,
    Greed,
    Bullish,
    Bearish,
    Unavailable,
}

impl IndexStatus {
    pub fn label(&self) -> String {
        match self {
            IndexStatus::Complacency => "Complacency".to_string(),
            IndexStatus::Normal => "Normal".to_string(),
            IndexStatus::Fear => "Fear".to_string(),
            IndexStatus::Panic => "Panic".to_string(),
            IndexStatus::BlackSwan => "Panic (Black-Swan)".to_string(),
            IndexStatus::Level(level) => level.to_string(),
            IndexStatus::ExtremeFear => "Extreme Fear".to_string(),
            IndexStatus::Neutral => "Neutral".to_string(),
            IndexStatus::Greed => "Greed".to_string(),
            IndexStatus::Bullish => "Bullish".to_string(),
            IndexStatus::Bearish => "Bearish".to_string(),
            IndexStatus::Unavailable => "N/A".to_string(),
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            IndexStatus::Complacency | IndexStatus::Bullish => Tone::Positive,
            IndexStatus::Fear => Tone::Warning,
            IndexStatus::Panic | IndexStatus::BlackSwan | IndexStatus::Bearish => Tone::Negative,
            IndexStatus::Normal
            | IndexStatus::Neutral
            | IndexStatus::ExtremeFear
            | IndexStatus::Greed
            | IndexStatus::Level(_) => Tone::Neutral,
            IndexStatus::Unavailable => Tone::Muted,
        }
    }
}

/// What a reading measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingKind {
    Index(IndexFamily),
    CryptoSentiment,
    /// Percent of constituents above their 200-day average
    BreadthAbove200,
    /// New highs minus new lows
    HighsLows,
}

impl ReadingKind {
    pub fn name(&self) -> &'static str {
        match self {
            ReadingKind::Index(family) => family.name(),
            ReadingKind::CryptoSentiment => "CRYPTO FEAR",
            ReadingKind::BreadthAbove200 => "SMA200%",
            ReadingKind::HighsLows => "Highs-Lows",
        }
    }
}

/// One normalized market reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexReading {
    pub kind: ReadingKind,
    pub value: f64,
    /// Day-over-day change
    pub change: f64,
    pub history: Vec<f64>,
    pub status: IndexStatus,
    pub status_tone: Tone,
    pub change_tone: Tone,
    pub available: bool,
}

impl IndexReading {
    pub fn unavailable(kind: ReadingKind) -> Self {
        Self {
            kind,
            value: 0.0,
            change: 0.0,
            history: Vec::new(),
            status: IndexStatus::Unavailable,
            status_tone: Tone::Muted,
            change_tone: Tone::Muted,
            available: false,
        }
    }

    pub fn status_label(&self) -> String {
        self.status.label()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// VIX-scale grading shared by the equity volatility gauges
pub fn volatility_status(value: f64) -> IndexStatus {
    if value < 15.0 {
        IndexStatus::Complacency
    } else if value < 20.0 {
        IndexStatus::Normal
    } else if value < 30.0 {
        IndexStatus::Fear
    } else {
        IndexStatus::Panic
    }
}

pub fn skew_status(value: f64) -> IndexStatus {
    if value > 145.0 {
        IndexStatus::BlackSwan
    } else {
        IndexStatus::Normal
    }
}

pub fn crypto_status(value: f64) -> IndexStatus {
    if value < 25.0 {
        IndexStatus::ExtremeFear
    } else if value > 60.0 {
        IndexStatus::Greed
    } else {
        IndexStatus::Neutral
    }
}

pub fn breadth_status(pct_above_200: f64) -> IndexStatus {
    if pct_above_200 > 50.0 {
        IndexStatus::Bullish
    } else {
        IndexStatus::Bearish
    }
}

pub fn highs_lows_status(net: i64) -> IndexStatus {
    if net > 0 {
        IndexStatus::Bullish
    } else {
        IndexStatus::Bearish
    }
}

fn bullish_tone(bullish: bool) -> Tone {
    if bullish {
        Tone::Positive
    } else {
        Tone::Negative
    }
}

/// Stand-in values keep their grade but are never colored
fn muted_unless(available: bool, tone: Tone) -> Tone {
    if available {
        tone
    } else {
        Tone::Muted
    }
}

/// Grade one index family. `None` (fetch failed or empty series) yields the N/A reading.
pub fn normalize_index(family: IndexFamily, quote: Option<&IndexQuote>) -> IndexReading {
    let kind = ReadingKind::Index(family);
    let Some(quote) = quote else {
        return IndexReading::unavailable(kind);
    };
    if !quote.current.is_finite() {
        return IndexReading::unavailable(kind);
    }

    let value = quote.current;
    let change = quote.change();

    let (status, status_tone) = match family {
        f if f.is_volatility_gauge() => {
            let status = volatility_status(value);
            (status, status.tone())
        }
        IndexFamily::Skew => {
            let status = skew_status(value);
            (status, status.tone())
        }
        IndexFamily::Spx => (
            IndexStatus::Level(value.round() as i64),
            bullish_tone(change >= 0.0),
        ),
        _ => (IndexStatus::Normal, Tone::Neutral),
    };

    // Falling volatility is good news; for the broad index a rise is
    let change_tone = if family == IndexFamily::Spx {
        bullish_tone(change >= 0.0)
    } else {
        bullish_tone(change <= 0.0)
    };

    IndexReading {
        kind,
        value: round2(value),
        change: round2(change),
        history: quote.history.clone(),
        status,
        status_tone,
        change_tone,
        available: true,
    }
}

/// Grade the crypto fear & greed index. `None` falls back to `fallback` but stays flagged.
pub fn normalize_crypto(sentiment: Option<u8>, fallback: u8) -> IndexReading {
    let available = sentiment.is_some();
    let value = f64::from(sentiment.unwrap_or(fallback).min(100));
    let status = crypto_status(value);

    IndexReading {
        kind: ReadingKind::CryptoSentiment,
        value,
        change: 0.0,
        history: Vec::new(),
        status,
        status_tone: muted_unless(available, Tone::Neutral),
        change_tone: muted_unless(available, bullish_tone(value > 50.0)),
        available,
    }
}

/// Breadth readings: percent above the 200-day and net new highs
pub fn normalize_breadth(breadth: &BreadthReading) -> (IndexReading, IndexReading) {
    let available = breadth.valid;
    let pct_status = breadth_status(breadth.sma200_pct);
    let pct = IndexReading {
        kind: ReadingKind::BreadthAbove200,
        value: breadth.sma200_pct,
        change: 0.0,
        history: Vec::new(),
        status: pct_status,
        status_tone: muted_unless(available, pct_status.tone()),
        change_tone: muted_unless(available, pct_status.tone()),
        available,
    };

    let hl_status = highs_lows_status(breadth.highs_lows);
    let highs_lows = IndexReading {
        kind: ReadingKind::HighsLows,
        value: breadth.highs_lows as f64,
        change: 0.0,
        history: Vec::new(),
        status: hl_status,
        status_tone: muted_unless(available, hl_status.tone()),
        change_tone: muted_unless(available, hl_status.tone()),
        available,
    };

    (pct, highs_lows)
}
