pub mod breakeven;
pub mod scenario;

use crate::errors::{AppError, AppResult};
use crate::payoff::{OptionDirection, Position, StructureType};
use scenario::{CurvePoint, ScenarioRow};

/// Trade preview shown before a position is opened.
///
/// Everything here is derived from `payout_at`: net profit is payout minus
/// the investment, and the investment is the most the holder can lose.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TradePreview {
    pub structure: StructureType,
    pub direction: OptionDirection,
    pub contracts: f64,
    pub investment: f64,
    /// None when the upside is unbounded (vanilla call).
    pub max_payout: Option<f64>,
    pub max_profit: Option<f64>,
    pub max_loss: f64,
    pub breakevens: Vec<f64>,
    pub curve: Vec<CurvePoint>,
    pub scenarios: Vec<ScenarioRow>,
}

/// Parameters for [`build_preview`]. Stack-allocated apart from the offsets slice.
#[derive(Debug, Clone, Copy)]
pub struct PreviewParams<'a> {
    pub investment: f64,
    pub reference_price: f64,
    /// Half-width of the curve range as a fraction of price.
    pub range_pct: f64,
    pub samples: usize,
    /// Scenario offsets in percent of the reference price.
    pub offsets: &'a [f64],
}

/// Contracts bought by `investment` at `price_per_contract`.
pub fn contracts_for_investment(investment: f64, price_per_contract: f64) -> AppResult<f64> {
    if !investment.is_finite() || investment < 0.0 {
        return Err(AppError::InvalidInput(format!(
            "investment must be a non-negative number, got {investment}"
        )));
    }
    if !price_per_contract.is_finite() || price_per_contract <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "price per contract must be positive, got {price_per_contract}"
        )));
    }
    Ok(investment / price_per_contract)
}

/// Net profit at `settlement`: payout minus what was paid to open.
#[inline]
pub fn net_profit(position: &Position, investment: f64, settlement: f64) -> f64 {
    position.payout_at(settlement) - investment
}

/// Largest payout the position can reach, or None when unbounded.
///
/// The butterfly's upper leg is normalized by the lower width, so an
/// asymmetric triple can approach (U - M) * n just above the peak.
pub fn max_payout(position: &Position) -> Option<f64> {
    let n = position.contracts;
    match (position.strikes.as_slice(), position.direction) {
        (&[_], OptionDirection::Call) => None,
        (&[k], OptionDirection::Put) => Some(k * n),
        (&[l, u], _) => Some((u - l) * n),
        (&[l, m, u], _) => Some((m - l).max(u - m) * n),
        (&[k1, k2, _, _], _) => Some((k2 - k1) * n),
        _ => Some(0.0),
    }
}

pub fn build_preview(position: &Position, params: &PreviewParams<'_>) -> AppResult<TradePreview> {
    if !params.investment.is_finite() || params.investment < 0.0 {
        return Err(AppError::InvalidInput(format!(
            "investment must be a non-negative number, got {}",
            params.investment
        )));
    }
    if !params.reference_price.is_finite() || params.reference_price <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "reference price must be positive, got {}",
            params.reference_price
        )));
    }
    if !(params.range_pct > 0.0 && params.range_pct < 1.0) {
        return Err(AppError::InvalidInput(format!(
            "range must be in (0, 1), got {}",
            params.range_pct
        )));
    }

    // Cover both the reference price and every strike.
    let lo = params.reference_price.min(position.strikes.lowest()) * (1.0 - params.range_pct);
    let hi = params.reference_price.max(position.strikes.highest()) * (1.0 + params.range_pct);

    let curve = scenario::sample_curve(position, params.investment, lo, hi, params.samples)?;
    let scenarios =
        scenario::scenario_table(position, params.investment, params.reference_price, params.offsets)?;
    let breakevens = breakeven::breakevens(position, params.investment, lo, hi);

    let max_payout = max_payout(position);
    let preview = TradePreview {
        structure: position.structure(),
        direction: position.direction,
        contracts: position.contracts,
        investment: params.investment,
        max_payout,
        max_profit: max_payout.map(|p| p - params.investment),
        max_loss: params.investment,
        breakevens,
        curve,
        scenarios,
    };

    tracing::debug!(
        structure = %preview.structure,
        direction = %preview.direction,
        contracts = preview.contracts,
        breakevens = preview.breakevens.len(),
        "preview built"
    );

    Ok(preview)
}
