use analysis_core::Bar;

/// Round to cents
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to cents without exceeding `cap`.
/// Values already at or below `cap` round normally unless that would push them above it.
pub fn round2_capped(value: f64, cap: f64) -> f64 {
    let rounded = round2(value);
    if rounded > cap && value <= cap {
        (value * 100.0).floor() / 100.0
    } else {
        rounded
    }
}

/// Reconstruct a moving average from the price and the price's percent offset from it.
///
/// A -100% offset would need a division by zero; the average is reported as 0 (undefined).
pub fn sma_from_offset(price: f64, offset_pct: f64) -> f64 {
    if offset_pct == -100.0 {
        return 0.0;
    }
    round2(price / (1.0 + offset_pct / 100.0))
}

/// Average daily high-low range, used in place of a missing ATR
pub fn mean_range(bars: &[Bar]) -> Option<f64> {
    if bars.is_empty() {
        return None;
    }
    let total: f64 = bars.iter().map(|b| b.high - b.low).sum();
    Some(total / bars.len() as f64)
}

/// Stop two ATRs below price; 0 when there is no ATR
pub fn stop_loss(price: f64, atr: f64) -> f64 {
    if atr > 0.0 {
        round2_capped(price - 2.0 * atr, price)
    } else {
        0.0
    }
}

/// Percent distance from price to the analyst target
pub fn upside_pct(price: f64, target: f64) -> f64 {
    if price > 0.0 && target > 0.0 {
        round2((target - price) / price * 100.0)
    } else {
        0.0
    }
}

/// Reward/risk between stop and target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskReward {
    pub risk: f64,
    pub reward: f64,
    pub ratio: f64,
}

pub fn risk_reward(price: f64, stop_loss: f64, target: f64) -> RiskReward {
    let risk = price - stop_loss;
    let reward = target - price;
    let ratio = if risk > 0.0 { round2(reward / risk) } else { 0.0 };

    RiskReward {
        risk,
        reward,
        ratio,
    }
}
