use crate::payoff::{OptionDirection, PayoffProfile, StructureType};

/// Vertical spread over [L, U]: a linear ramp capped at (U - L) * n.
pub struct VerticalSpread;

impl PayoffProfile for VerticalSpread {
    #[inline]
    fn structure(&self) -> StructureType {
        StructureType::Spread
    }

    fn payout(
        &self,
        strikes: &[f64],
        direction: OptionDirection,
        contracts: f64,
        settlement: f64,
    ) -> f64 {
        let [lower, upper] = *strikes else {
            return 0.0;
        };
        let s = settlement;
        let cap = (upper - lower) * contracts;

        match direction {
            OptionDirection::Call => {
                if s <= lower {
                    0.0
                } else if s >= upper {
                    cap
                } else {
                    (s - lower) * contracts
                }
            }
            OptionDirection::Put => {
                if s <= lower {
                    cap
                } else if s >= upper {
                    0.0
                } else {
                    (upper - s) * contracts
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_spread_ramp() {
        let s = VerticalSpread;
        let k = [100.0, 110.0];
        assert_eq!(s.payout(&k, OptionDirection::Call, 2.0, 95.0), 0.0);
        assert_eq!(s.payout(&k, OptionDirection::Call, 2.0, 104.0), 8.0);
        assert_eq!(s.payout(&k, OptionDirection::Call, 2.0, 110.0), 20.0);
        assert_eq!(s.payout(&k, OptionDirection::Call, 2.0, 500.0), 20.0);
    }

    #[test]
    fn test_put_spread_ramp() {
        let s = VerticalSpread;
        let k = [100.0, 110.0];
        assert_eq!(s.payout(&k, OptionDirection::Put, 2.0, 0.0), 20.0);
        assert_eq!(s.payout(&k, OptionDirection::Put, 2.0, 100.0), 20.0);
        assert_eq!(s.payout(&k, OptionDirection::Put, 2.0, 106.0), 8.0);
        assert_eq!(s.payout(&k, OptionDirection::Put, 2.0, 120.0), 0.0);
    }
}
