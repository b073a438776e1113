//! Tournament score.
//!
//! score = 0.4 * premium + 0.3 * profit + 0.2 * trades + 0.1 * streak
//!
//! where each axis is normalized to [0, 100]:
//!   premium = min(P / 1000 * 100, 100)
//!   profit  = clamp(profit / P * 100, 0, 100)   (0 when P = 0)
//!   trades  = min(sqrt(trade_count) * 5, 100)
//!   streak  = min(sqrt(streak_days) * 10, 100)
//!
//! Rounded to 2 decimals. Pure function.

use crate::tournament::ScoreInputs;

pub const PREMIUM_WEIGHT: f64 = 0.4;
pub const PROFIT_WEIGHT: f64 = 0.3;
pub const TRADES_WEIGHT: f64 = 0.2;
pub const STREAK_WEIGHT: f64 = 0.1;

/// Premium at which the premium axis saturates, in dollars.
pub const PREMIUM_SATURATION: f64 = 1000.0;

const TRADES_SCALE: f64 = 5.0;
const STREAK_SCALE: f64 = 10.0;
const MAX_AXIS: f64 = 100.0;

/// Per-axis normalized values, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ScoreBreakdown {
    pub premium: f64,
    pub profit: f64,
    pub trades: f64,
    pub streak: f64,
    pub score: f64,
}

pub fn score_breakdown(inputs: &ScoreInputs) -> ScoreBreakdown {
    let total_premium = if inputs.total_premium.is_finite() {
        inputs.total_premium.max(0.0)
    } else {
        0.0
    };

    let premium = (total_premium / PREMIUM_SATURATION * MAX_AXIS).min(MAX_AXIS);

    let profit_ratio = if total_premium > 0.0 {
        inputs.total_profit / total_premium
    } else {
        0.0
    };
    // Losing traders bottom out at 0 on this axis.
    let profit = if profit_ratio.is_finite() {
        (profit_ratio * 100.0).clamp(0.0, MAX_AXIS)
    } else {
        0.0
    };

    let trades = ((inputs.trade_count as f64).sqrt() * TRADES_SCALE).min(MAX_AXIS);
    let streak = ((inputs.streak_days as f64).sqrt() * STREAK_SCALE).min(MAX_AXIS);

    let weighted = premium * PREMIUM_WEIGHT
        + profit * PROFIT_WEIGHT
        + trades * TRADES_WEIGHT
        + streak * STREAK_WEIGHT;

    ScoreBreakdown {
        premium,
        profit,
        trades,
        streak,
        score: round2(weighted),
    }
}

/// Composite score in [0, 100].
#[inline]
pub fn score(total_premium: f64, total_profit: f64, trade_count: u64, streak_days: u64) -> f64 {
    score_breakdown(&ScoreInputs {
        total_premium,
        total_profit,
        trade_count,
        streak_days,
    })
    .score
}

#[inline]
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
