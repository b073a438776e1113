use crate::errors::{AppError, AppResult};
use crate::payoff::Position;

/// What-if offsets from the reference price, in percent.
pub const DEFAULT_OFFSETS_PCT: [f64; 10] = [-5.0, -4.0, -3.0, -2.0, -1.0, 1.0, 2.0, 3.0, 4.0, 5.0];

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CurvePoint {
    pub price: f64,
    pub payout: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ScenarioRow {
    pub offset_pct: f64,
    pub price: f64,
    pub payout: f64,
    pub profit: f64,
    /// Profit as a percentage of the investment (0 when nothing was invested).
    pub return_pct: f64,
}

/// Evenly spaced P/L samples over [lo, hi], both endpoints included.
pub fn sample_curve(
    position: &Position,
    investment: f64,
    lo: f64,
    hi: f64,
    samples: usize,
) -> AppResult<Vec<CurvePoint>> {
    if samples < 2 {
        return Err(AppError::InvalidInput(format!("need at least 2 samples, got {samples}")));
    }
    if !lo.is_finite() || !hi.is_finite() || lo < 0.0 || hi <= lo {
        return Err(AppError::InvalidInput(format!("invalid price range [{lo}, {hi}]")));
    }

    let step = (hi - lo) / (samples - 1) as f64;
    let curve = (0..samples)
        .map(|i| {
            let price = if i == samples - 1 { hi } else { lo + step * i as f64 };
            let payout = position.payout_at(price);
            CurvePoint {
                price,
                payout,
                profit: payout - investment,
            }
        })
        .collect();

    Ok(curve)
}

/// One row per offset applied to `reference`.
pub fn scenario_table(
    position: &Position,
    investment: f64,
    reference: f64,
    offsets_pct: &[f64],
) -> AppResult<Vec<ScenarioRow>> {
    if let Some(bad) = offsets_pct.iter().find(|o| !o.is_finite() || **o <= -100.0) {
        return Err(AppError::InvalidInput(format!("scenario offset out of range: {bad}")));
    }

    let rows = offsets_pct
        .iter()
        .map(|&offset_pct| {
            let price = reference * (1.0 + offset_pct / 100.0);
            let payout = position.payout_at(price);
            let profit = payout - investment;
            ScenarioRow {
                offset_pct,
                price,
                payout,
                profit,
                return_pct: if investment > 0.0 { profit / investment * 100.0 } else { 0.0 },
            }
        })
        .collect();

    Ok(rows)
}
