//! Ticker Classifier Data Models

use analysis_core::Trend;
use serde::{Deserialize, Serialize};

/// RSI(14) zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiStatus {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiStatus {
    pub fn from_rsi(rsi: f64) -> Self {
        if rsi > 70.0 {
            RsiStatus::Overbought
        } else if rsi < 30.0 {
            RsiStatus::Oversold
        } else {
            RsiStatus::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RsiStatus::Overbought => "Overbought",
            RsiStatus::Oversold => "Oversold",
            RsiStatus::Neutral => "Neutral",
        }
    }
}

/// Analyst consensus from the mean recommendation (1 = Strong Buy .. 5 = Strong Sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consensus {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    Buy,
    Hold,
    Sell,
    #[serde(rename = "Strong Sell")]
    StrongSell,
}

impl Consensus {
    pub fn from_recom(recom: f64) -> Self {
        match recom {
            r if r <= 1.5 => Consensus::StrongBuy,
            r if r <= 2.5 => Consensus::Buy,
            r if r > 4.5 => Consensus::StrongSell,
            r if r > 3.5 => Consensus::Sell,
            _ => Consensus::Hold,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Consensus::StrongBuy => "Strong Buy",
            Consensus::Buy => "Buy",
            Consensus::Hold => "Hold",
            Consensus::Sell => "Sell",
            Consensus::StrongSell => "Strong Sell",
        }
    }
}

/// What to do with the security right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "WATCH")]
    Watch,
    #[serde(rename = "WAIT")]
    Wait,
    #[serde(rename = "HOLD/ADD")]
    HoldAdd,
    #[serde(rename = "AVOID")]
    Avoid,
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Buy => "BUY",
            Decision::Watch => "WATCH",
            Decision::Wait => "WAIT",
            Decision::HoldAdd => "HOLD/ADD",
            Decision::Avoid => "AVOID",
        }
    }

    pub fn is_actionable(&self) -> bool {
        matches!(self, Decision::Buy | Decision::Watch)
    }
}

/// Classified result for one security. Renderers display these fields as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerResult {
    pub ticker: String,
    pub company_name: String,
    pub price: f64,
    pub target_price: f64,
    /// Percent from price to target
    pub upside_pct: f64,
    pub consensus: Consensus,
    pub analyst_count: u32,
    /// Institutional ownership, percent
    pub inst_own: f64,
    pub suggested_buy: f64,
    pub decision: Decision,
    pub volume: f64,
    pub risk_reward: f64,
    pub trend: Trend,
    pub rsi: f64,
    pub rsi_status: RsiStatus,
    pub atr: f64,
    pub stop_loss: f64,
    pub sma50: f64,
    pub sma200: f64,
    pub change_pct: f64,
    /// 0-100
    pub momentum_score: u8,
    /// 0-100, advisory only
    pub watchlist_score: u8,
    pub industry: String,
    pub theme: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_status_bounds() {
        assert_eq!(RsiStatus::from_rsi(70.1), RsiStatus::Overbought);
        assert_eq!(RsiStatus::from_rsi(70.0), RsiStatus::Neutral);
        assert_eq!(RsiStatus::from_rsi(30.0), RsiStatus::Neutral);
        assert_eq!(RsiStatus::from_rsi(29.9), RsiStatus::Oversold);
        assert_eq!(RsiStatus::from_rsi(0.0), RsiStatus::Oversold);
    }

    #[test]
    fn test_consensus_bounds() {
        assert_eq!(Consensus::from_recom(1.2), Consensus::StrongBuy);
        assert_eq!(Consensus::from_recom(1.5), Consensus::StrongBuy);
        assert_eq!(Consensus::from_recom(2.5), Consensus::Buy);
        assert_eq!(Consensus::from_recom(3.0), Consensus::Hold);
        assert_eq!(Consensus::from_recom(3.5), Consensus::Hold);
        assert_eq!(Consensus::from_recom(3.6), Consensus::Sell);
        assert_eq!(Consensus::from_recom(4.5), Consensus::Sell);
        assert_eq!(Consensus::from_recom(4.6), Consensus::StrongSell);
    }

    #[test]
    fn test_labels_serialize() {
        assert_eq!(serde_json::to_string(&Decision::HoldAdd).unwrap(), "\"HOLD/ADD\"");
        assert_eq!(serde_json::to_string(&Consensus::StrongBuy).unwrap(), "\"Strong Buy\"");
        assert_eq!(Decision::Avoid.label(), "AVOID");
        assert!(Decision::Watch.is_actionable());
        assert!(!Decision::HoldAdd.is_actionable());
    }
}
