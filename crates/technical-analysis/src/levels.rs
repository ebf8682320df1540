//! Suggested entry ("buy zone") levels.
//!
//! Each trend maps to one entry strategy; the strategy decides how far below
//! the current price a patient entry sits, anchored on the moving averages
//! and sized by ATR.

use analysis_core::Trend;
use serde::{Deserialize, Serialize};

use crate::indicators::round2_capped;

/// Markdown applied when a strategy lands above the current price
pub const ABOVE_PRICE_MARKDOWN: f64 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuyZoneStrategy {
    /// Uptrend extended above the 50-day: buy the shallower of SMA50 and 1.5 ATR down
    RideTrend,
    /// Uptrend at or below the 50-day: lean on SMA200 or 1 ATR down
    SupportHold,
    /// Pullback within an uptrend: wait for SMA50, or SMA200 / 1 ATR once below it
    PullbackToAverage,
    /// Downtrend (including bounces): deep entry at SMA200 or 2.5 ATR down
    DeepDiscount,
    /// No trend: 2 ATR down
    AtrBand,
}

impl BuyZoneStrategy {
    pub fn for_trend(trend: Trend, price: f64, sma50: f64) -> Self {
        match trend {
            Trend::StrongBullish if price > sma50 => BuyZoneStrategy::RideTrend,
            Trend::StrongBullish => BuyZoneStrategy::SupportHold,
            Trend::BullishPullback => BuyZoneStrategy::PullbackToAverage,
            Trend::Bearish | Trend::BearishBounce => BuyZoneStrategy::DeepDiscount,
            Trend::Neutral => BuyZoneStrategy::AtrBand,
        }
    }

    /// Raw entry level before the above-price clamp
    pub fn level(&self, price: f64, sma50: f64, sma200: f64, atr: f64) -> f64 {
        match self {
            BuyZoneStrategy::RideTrend => sma50.max(price - 1.5 * atr),
            BuyZoneStrategy::SupportHold => sma200.max(price - atr),
            BuyZoneStrategy::PullbackToAverage => {
                if price > sma50 {
                    sma50
                } else {
                    sma200.max(price - atr)
                }
            }
            BuyZoneStrategy::DeepDiscount => {
                if sma200 > 0.0 {
                    sma200.min(price - 2.5 * atr)
                } else {
                    price - 3.0 * atr
                }
            }
            BuyZoneStrategy::AtrBand => price - 2.0 * atr,
        }
    }
}

/// Suggested entry price for a trend, never above the current price
pub fn suggested_buy(trend: Trend, price: f64, sma50: f64, sma200: f64, atr: f64) -> f64 {
    let strategy = BuyZoneStrategy::for_trend(trend, price, sma50);
    let mut level = strategy.level(price, sma50, sma200, atr);
    if level > price {
        level = price * ABOVE_PRICE_MARKDOWN;
    }
    round2_capped(level, price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_dispatch() {
        assert_eq!(
            BuyZoneStrategy::for_trend(Trend::StrongBullish, 110.0, 100.0),
            BuyZoneStrategy::RideTrend
        );
        assert_eq!(
            BuyZoneStrategy::for_trend(Trend::StrongBullish, 100.0, 100.0),
            BuyZoneStrategy::SupportHold
        );
        assert_eq!(
            BuyZoneStrategy::for_trend(Trend::BearishBounce, 100.0, 90.0),
            BuyZoneStrategy::DeepDiscount
        );
        assert_eq!(
            BuyZoneStrategy::for_trend(Trend::Neutral, 100.0, 100.0),
            BuyZoneStrategy::AtrBand
        );
    }

    #[test]
    fn test_strong_bullish_uses_shallower_level() {
        // SMA50 at 105 is above price - 1.5 * ATR = 104
        let level = suggested_buy(Trend::StrongBullish, 110.0, 105.0, 90.0, 4.0);
        assert_eq!(level, 105.0);

        // Tight ATR: the band sits above SMA50
        let level = suggested_buy(Trend::StrongBullish, 110.0, 100.0, 90.0, 2.0);
        assert_eq!(level, 107.0);
    }

    #[test]
    fn test_pullback_levels() {
        let above = suggested_buy(Trend::BullishPullback, 102.0, 100.0, 90.0, 3.0);
        assert_eq!(above, 100.0);

        let below = suggested_buy(Trend::BullishPullback, 98.0, 100.0, 90.0, 3.0);
        assert_eq!(below, 95.0);
    }

    #[test]
    fn test_bearish_levels() {
        let with_sma = suggested_buy(Trend::Bearish, 80.0, 90.0, 100.0, 2.0);
        assert_eq!(with_sma, 75.0);

        let without_sma = suggested_buy(Trend::Bearish, 80.0, 90.0, 0.0, 2.0);
        assert_eq!(without_sma, 74.0);
    }

    #[test]
    fn test_neutral_level() {
        assert_eq!(suggested_buy(Trend::Neutral, 50.0, 50.0, 50.0, 1.5), 47.0);
    }

    #[test]
    fn test_level_above_price_is_marked_down() {
        // SMA200 above price with no ATR puts the support level over the market
        let level = suggested_buy(Trend::StrongBullish, 100.0, 100.0, 120.0, 0.0);
        assert_eq!(level, 99.0);
    }

    #[test]
    fn test_suggested_buy_never_above_price() {
        let trends = [
            Trend::StrongBullish,
            Trend::BullishPullback,
            Trend::Bearish,
            Trend::BearishBounce,
            Trend::Neutral,
        ];
        for trend in trends {
            for &(price, sma50, sma200, atr) in &[
                (100.0, 150.0, 200.0, 0.0),
                (10.006, 10.006, 10.006, 0.0),
                (0.0, 0.0, 0.0, 0.0),
                (55.5, 40.0, 70.0, 12.0),
            ] {
                let level = suggested_buy(trend, price, sma50, sma200, atr);
                assert!(level <= price, "{trend:?} {price} -> {level}");
            }
        }
    }
}
