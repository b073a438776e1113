use crate::payoff::{OptionDirection, PayoffProfile, StructureType};

/// Condor over [K1, K2, K3, K4]: ramp up, plateau, ramp down.
///
/// Plateau height is (K2 - K1) * n, taken from the lower pair only.
pub struct Condor;

impl PayoffProfile for Condor {
    #[inline]
    fn structure(&self) -> StructureType {
        StructureType::Condor
    }

    fn payout(
        &self,
        strikes: &[f64],
        _direction: OptionDirection,
        contracts: f64,
        settlement: f64,
    ) -> f64 {
        let [k1, k2, k3, k4] = *strikes else {
            return 0.0;
        };
        let s = settlement;
        let max = (k2 - k1) * contracts;

        if s <= k1 || s >= k4 {
            0.0
        } else if s >= k2 && s <= k3 {
            max
        } else if s < k2 {
            ((s - k1) / (k2 - k1)) * max
        } else {
            ((k4 - s) / (k4 - k3)) * max
        }
    }
}
