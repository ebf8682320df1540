use analysis_core::Trend;

use crate::models::Decision;

/// Within 1% of the entry level
const BUY_TOLERANCE: f64 = 1.01;
/// Within 5% of the entry level
const WATCH_TOLERANCE: f64 = 1.05;
/// Momentum above which an extended uptrend is worth adding to
const HOLD_ADD_MOMENTUM: u8 = 70;

fn clamp_score(score: i32) -> u8 {
    score.clamp(0, 100) as u8
}

/// Momentum score (0-100): base 50, adjusted for price vs. averages, day change and RSI
pub fn momentum_score(price: f64, sma50: f64, sma200: f64, change_pct: f64, rsi: f64) -> u8 {
    let mut score = 50;

    if price > sma50 {
        score += 10;
    }
    if price > sma200 {
        score += 10;
    }
    if change_pct > 0.0 {
        score += 10;
    }
    if change_pct > 2.0 {
        score += 5;
    }
    if rsi > 50.0 {
        score += 10;
    }
    // Overbought gives back the RSI bonus
    if rsi > 70.0 {
        score -= 10;
    }

    clamp_score(score)
}

/// Watchlist score (0-100): base 30, adjusted for upside, coverage, consensus and momentum
pub fn watchlist_score(upside_pct: f64, analyst_count: u32, recom: f64, momentum: u8) -> u8 {
    let mut score = 30;

    if upside_pct > 15.0 {
        score += 20;
    } else if upside_pct > 5.0 {
        score += 10;
    }

    if analyst_count > 5 {
        score += 10;
    }

    if recom <= 2.0 {
        score += 20;
    } else if recom <= 2.5 {
        score += 10;
    }

    if momentum > 60 {
        score += 20;
    }

    clamp_score(score)
}

/// Entry decision from price vs. suggested buy, with trend overrides
pub fn decide(price: f64, suggested_buy: f64, trend: Trend, momentum: u8) -> Decision {
    let base = if price <= suggested_buy * BUY_TOLERANCE {
        Decision::Buy
    } else if price <= suggested_buy * WATCH_TOLERANCE {
        Decision::Watch
    } else {
        Decision::Wait
    };

    match (trend, base) {
        (Trend::StrongBullish, Decision::Wait) if momentum > HOLD_ADD_MOMENTUM => Decision::HoldAdd,
        (Trend::Bearish, d) if d != Decision::Buy => Decision::Avoid,
        (_, d) => d,
    }
}
