use analysis_core::{Bar, CompanyProfile, NormalizedSnapshot, Trend};
use serde::{Deserialize, Serialize};

use crate::indicators::*;
use crate::levels::suggested_buy;

/// Where the ATR used for stop/entry sizing came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AtrSource {
    Reported,
    /// Mean high-low range of the recent history
    HistoryRange,
    Unavailable,
}

/// Price-derived levels for one security
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedTechnicals {
    pub price: f64,
    pub atr: f64,
    pub atr_source: AtrSource,
    pub sma50: f64,
    pub sma200: f64,
    pub trend: Trend,
    pub stop_loss: f64,
    pub suggested_buy: f64,
    pub upside_pct: f64,
    pub risk_reward: f64,
}

pub struct TechnicalCalculator;

impl TechnicalCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Price from the snapshot, else the last close, else the profile's market price
    pub fn resolve_price(&self, snap: &NormalizedSnapshot, profile: &CompanyProfile, history: &[Bar]) -> f64 {
        if snap.price > 0.0 {
            return snap.price;
        }
        if let Some(last) = history.last() {
            let close = round2(last.close);
            if close > 0.0 {
                return close;
            }
        }
        profile
            .regular_market_price
            .filter(|p| p.is_finite() && *p > 0.0)
            .unwrap_or(0.0)
    }

    /// Reported ATR, else the mean daily range of the history
    pub fn resolve_atr(&self, snap: &NormalizedSnapshot, history: &[Bar]) -> (f64, AtrSource) {
        if snap.atr > 0.0 {
            return (snap.atr, AtrSource::Reported);
        }
        match mean_range(history) {
            Some(range) => (round2(range), AtrSource::HistoryRange),
            None => (snap.atr, AtrSource::Unavailable),
        }
    }

    pub fn derive(
        &self,
        snap: &NormalizedSnapshot,
        profile: &CompanyProfile,
        history: &[Bar],
    ) -> DerivedTechnicals {
        let price = self.resolve_price(snap, profile, history);
        let (atr, atr_source) = self.resolve_atr(snap, history);

        let sma50 = sma_from_offset(price, snap.sma50_pct);
        let sma200 = sma_from_offset(price, snap.sma200_pct);
        let trend = Trend::classify(price, sma50, sma200);

        let stop = stop_loss(price, atr);
        let entry = suggested_buy(trend, price, sma50, sma200, atr);
        let rr = risk_reward(price, stop, snap.target_price);

        DerivedTechnicals {
            price,
            atr,
            atr_source,
            sma50,
            sma200,
            trend,
            stop_loss: stop,
            suggested_buy: entry,
            upside_pct: upside_pct(price, snap.target_price),
            risk_reward: rr.ratio,
        }
    }
}

impl Default for TechnicalCalculator {
    fn default() -> Self {
        Self::new()
    }
}
