use crate::payoff::{OptionDirection, PayoffProfile, StructureType};

/// Butterfly over [L, M, U]: a tent peaking at M with height w * n, w = M - L.
///
/// Both legs are normalized by w, including the upper one. For an
/// asymmetric triple (U - M != M - L) the upper leg is (U - S) * n, which
/// does not meet the peak at M. Direction does not change the shape.
pub struct Butterfly;

impl PayoffProfile for Butterfly {
    #[inline]
    fn structure(&self) -> StructureType {
        StructureType::Butterfly
    }

    fn payout(
        &self,
        strikes: &[f64],
        _direction: OptionDirection,
        contracts: f64,
        settlement: f64,
    ) -> f64 {
        let [lower, middle, upper] = *strikes else {
            return 0.0;
        };
        let s = settlement;
        let width = middle - lower;

        if s <= lower || s >= upper || width <= 0.0 {
            return 0.0;
        }
        if s == middle {
            return width * contracts;
        }

        if s < middle {
            ((s - lower) / width) * width * contracts
        } else {
            ((upper - s) / width) * width * contracts
        }
    }
}
