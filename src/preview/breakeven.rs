use crate::payoff::{OptionDirection, Position, StructureType};

/// Grid resolution for the loss-boundary scan.
const SCAN_STEPS: usize = 2000;

/// Bisection iterations per bracketed boundary.
const BISECT_ITERS: u32 = 80;

/// Two roots closer than this are the same breakeven.
const ROOT_TOLERANCE: f64 = 1e-9;

/// Largest per-contract step across a refined bracket that still counts as a
/// continuous crossing. Anything wider is a jump in the payout.
const JUMP_TOLERANCE: f64 = 1e-6;

/// Closed-form breakeven for a single-strike option.
///
/// call: K + premium, put: K - premium
#[inline]
pub fn vanilla_breakeven(strike: f64, direction: OptionDirection, premium_per_contract: f64) -> f64 {
    match direction {
        OptionDirection::Call => strike + premium_per_contract,
        OptionDirection::Put => strike - premium_per_contract,
    }
}

/// Settlement prices in [lo, hi] where the position stops or starts losing
/// money, ascending.
///
/// Vanilla uses the closed form and drops a breakeven outside the range.
/// Multi-strike structures are scanned for the edges of the loss region
/// (`payout < investment`) and each edge is refined by bisection. A flat
/// stretch where payout equals the investment therefore yields only its two
/// ends. An edge where the payout jumps over the investment (the asymmetric
/// butterfly at its middle strike) is not a breakeven and is skipped.
pub fn breakevens(position: &Position, investment: f64, lo: f64, hi: f64) -> Vec<f64> {
    if !(hi > lo) || position.contracts <= 0.0 {
        return Vec::new();
    }

    if position.structure() == StructureType::Vanilla {
        let strike = position.strikes.lowest();
        let premium = investment / position.contracts;
        let be = vanilla_breakeven(strike, position.direction, premium);
        return if be >= 0.0 && (lo..=hi).contains(&be) {
            vec![be]
        } else {
            Vec::new()
        };
    }

    let f = |s: f64| position.payout_at(s) - investment;
    let losing = |s: f64| f(s) < 0.0;
    let jump_limit = JUMP_TOLERANCE * position.contracts.max(1.0);
    let step = (hi - lo) / SCAN_STEPS as f64;
    let mut roots: Vec<f64> = Vec::new();

    let mut a = lo;
    let mut la = losing(a);
    for i in 1..=SCAN_STEPS {
        let b = if i == SCAN_STEPS { hi } else { lo + step * i as f64 };
        let lb = losing(b);

        if la != lb {
            let (x, y) = bisect(&losing, a, b, la);
            if (f(x) - f(y)).abs() <= jump_limit {
                // The non-losing end is where payout first covers the investment.
                push_root(&mut roots, if la { y } else { x });
            }
        }

        a = b;
        la = lb;
    }

    roots
}

/// Narrows `[a, b]` around the point where `losing` flips. Returns the final
/// bracket, with `a` still on the side whose state is `la`.
fn bisect(losing: &impl Fn(f64) -> bool, mut a: f64, mut b: f64, la: bool) -> (f64, f64) {
    for _ in 0..BISECT_ITERS {
        let mid = 0.5 * (a + b);
        if mid <= a || mid >= b {
            break;
        }
        if losing(mid) == la {
            a = mid;
        } else {
            b = mid;
        }
    }
    (a, b)
}

fn push_root(roots: &mut Vec<f64>, root: f64) {
    match roots.last() {
        Some(last) if (root - last).abs() <= ROOT_TOLERANCE => {}
        _ => roots.push(root),
    }
}
