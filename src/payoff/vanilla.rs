use crate::payoff::{OptionDirection, PayoffProfile, StructureType};

/// Single-strike option: intrinsic value at settlement.
///
/// call = max(S - K, 0) * n
/// put  = max(K - S, 0) * n
pub struct Vanilla;

impl PayoffProfile for Vanilla {
    #[inline]
    fn structure(&self) -> StructureType {
        StructureType::Vanilla
    }

    #[inline]
    fn payout(
        &self,
        strikes: &[f64],
        direction: OptionDirection,
        contracts: f64,
        settlement: f64,
    ) -> f64 {
        let [k] = *strikes else {
            return 0.0;
        };
        let intrinsic = match direction {
            OptionDirection::Call => settlement - k,
            OptionDirection::Put => k - settlement,
        };
        intrinsic.max(0.0) * contracts
    }
}
