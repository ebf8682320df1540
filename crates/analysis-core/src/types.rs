use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// OHLCV bar data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Named fields of a per-security fundamentals snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Price,
    TargetPrice,
    Rsi14,
    Atr,
    Recom,
    Change,
    Sma50,
    Sma200,
    InstOwn,
    Volume,
    Industry,
    Sector,
}

impl Field {
    /// Keys the field may appear under in a raw snapshot. The first is canonical.
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            Field::Price => &["Price"],
            Field::TargetPrice => &["Target Price"],
            Field::Rsi14 => &["RSI (14)", "RSI(14)"],
            Field::Atr => &["ATR", "ATR (14)"],
            Field::Recom => &["Recom"],
            Field::Change => &["Change"],
            Field::Sma50 => &["SMA50"],
            Field::Sma200 => &["SMA200"],
            Field::InstOwn => &["Inst Own"],
            Field::Volume => &["Volume"],
            Field::Industry => &["Industry"],
            Field::Sector => &["Sector"],
        }
    }

    pub fn key(&self) -> &'static str {
        self.keys()[0]
    }
}

/// Raw string fields for one security, exactly as captured from the provider.
///
/// A field is "missing" when its key is absent, empty or the provider's `-` marker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFieldSnapshot {
    pub ticker: String,
    pub fields: HashMap<String, String>,
}

impl RawFieldSnapshot {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            fields: HashMap::new(),
        }
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.fields.insert(field.key().to_string(), value.into());
        self
    }

    /// Raw value for a field, trying every known key
    pub fn get(&self, field: Field) -> Option<&str> {
        field
            .keys()
            .iter()
            .find_map(|k| self.fields.get(*k))
            .map(|s| s.as_str())
    }

    pub fn has_key(&self, field: Field) -> bool {
        field.keys().iter().any(|k| self.fields.contains_key(*k))
    }
}

/// Numeric view of a `RawFieldSnapshot`.
///
/// Unavailable numbers read as `0.0`; `unavailable` records which fields were
/// missing or malformed so a true zero can still be told apart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizedSnapshot {
    pub ticker: String,
    pub price: f64,
    pub target_price: f64,
    pub rsi: f64,
    pub atr: f64,
    /// Analyst recommendation, 1 = Strong Buy .. 5 = Strong Sell
    pub recom: f64,
    pub change_pct: f64,
    /// Percent offset of price from the 50-day average
    pub sma50_pct: f64,
    /// Percent offset of price from the 200-day average
    pub sma200_pct: f64,
    pub inst_own: f64,
    pub volume: f64,
    pub industry: Option<String>,
    pub sector: Option<String>,
    pub unavailable: Vec<Field>,
}

impl NormalizedSnapshot {
    pub fn is_available(&self, field: Field) -> bool {
        !self.unavailable.contains(&field)
    }
}

/// Company metadata from the secondary quote provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: Option<String>,
    pub analyst_count: u32,
    pub sector: Option<String>,
    pub regular_market_price: Option<f64>,
    /// Fraction of shares held by institutions (0.0 - 1.0)
    pub held_percent_institutions: Option<f64>,
}

/// Everything fetched for one security in a scan cycle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickerInput {
    pub snapshot: RawFieldSnapshot,
    pub profile: CompanyProfile,
    /// Recent daily bars, oldest first
    pub history: Vec<Bar>,
}

impl TickerInput {
    pub fn from_snapshot(snapshot: RawFieldSnapshot) -> Self {
        Self {
            snapshot,
            ..Default::default()
        }
    }

    pub fn ticker(&self) -> &str {
        &self.snapshot.ticker
    }
}

/// Trend category derived from price and its two moving averages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    #[serde(rename = "Strong Bullish")]
    StrongBullish,
    #[serde(rename = "Bullish Pullback")]
    BullishPullback,
    #[serde(rename = "Bearish")]
    Bearish,
    #[serde(rename = "Bearish Bounce")]
    BearishBounce,
    #[serde(rename = "Neutral")]
    Neutral,
}

impl Trend {
    pub fn classify(price: f64, sma50: f64, sma200: f64) -> Self {
        if sma50 > sma200 {
            if price > sma50 {
                Trend::StrongBullish
            } else {
                Trend::BullishPullback
            }
        } else if sma50 < sma200 {
            if price < sma50 {
                Trend::Bearish
            } else {
                Trend::BearishBounce
            }
        } else {
            Trend::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trend::StrongBullish => "Strong Bullish",
            Trend::BullishPullback => "Bullish Pullback",
            Trend::Bearish => "Bearish",
            Trend::BearishBounce => "Bearish Bounce",
            Trend::Neutral => "Neutral",
        }
    }
}

/// Tracked market-wide index families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IndexFamily {
    Vix,
    Vix1d,
    Vix9d,
    Vix3m,
    Vix6m,
    Vxn,
    Skew,
    Move,
    Gvz,
    Ovx,
    Spx,
}

impl IndexFamily {
    pub const ALL: [IndexFamily; 11] = [
        IndexFamily::Vix,
        IndexFamily::Vix1d,
        IndexFamily::Vix9d,
        IndexFamily::Vix3m,
        IndexFamily::Vix6m,
        IndexFamily::Vxn,
        IndexFamily::Skew,
        IndexFamily::Move,
        IndexFamily::Gvz,
        IndexFamily::Ovx,
        IndexFamily::Spx,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            IndexFamily::Vix => "VIX",
            IndexFamily::Vix1d => "VIX1D",
            IndexFamily::Vix9d => "VIX9D",
            IndexFamily::Vix3m => "VIX3M",
            IndexFamily::Vix6m => "VIX6M",
            IndexFamily::Vxn => "VXN",
            IndexFamily::Skew => "SKEW",
            IndexFamily::Move => "MOVE",
            IndexFamily::Gvz => "GVZ",
            IndexFamily::Ovx => "OVX",
            IndexFamily::Spx => "SPX",
        }
    }

    /// Short/medium-dated equity volatility gauges graded on the VIX scale.
    /// The six-month series is only used for term-structure comparison.
    pub fn is_volatility_gauge(&self) -> bool {
        matches!(
            self,
            IndexFamily::Vix
                | IndexFamily::Vix1d
                | IndexFamily::Vix9d
                | IndexFamily::Vix3m
                | IndexFamily::Vxn
        )
    }
}

/// Latest closes for one index family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexQuote {
    pub family: IndexFamily,
    pub current: f64,
    pub previous: f64,
    /// Short close history, oldest first
    pub history: Vec<f64>,
}

impl IndexQuote {
    /// Build a quote from a close series, skipping gaps.
    /// With a single close the previous value equals the current one.
    pub fn from_closes(family: IndexFamily, closes: &[f64]) -> Option<Self> {
        let history: Vec<f64> = closes.iter().copied().filter(|c| c.is_finite()).collect();
        let current = *history.last()?;
        let previous = if history.len() > 1 {
            history[history.len() - 2]
        } else {
            current
        };

        Some(Self {
            family,
            current,
            previous,
            history,
        })
    }

    pub fn change(&self) -> f64 {
        self.current - self.previous
    }
}

/// Raw S&P 500 breadth counts from the screener
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BreadthCounts {
    pub above_sma200: u32,
    pub new_highs: u32,
    pub new_lows: u32,
}

/// Kind of scheduled corporate event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Earnings,
    Dividend,
    Split,
    Other(String),
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Earnings => "Earnings Report",
            EventKind::Dividend => "Dividend",
            EventKind::Split => "Split",
            EventKind::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorporateEvent {
    pub ticker: String,
    pub kind: EventKind,
    pub date: NaiveDate,
    /// Free-form detail, e.g. the EPS estimate
    pub info: String,
}
