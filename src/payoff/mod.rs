pub mod vanilla;
pub mod spread;
pub mod butterfly;
pub mod condor;

use crate::errors::{AppError, AppResult};
use smallvec::SmallVec;

/// Every structure's settlement rule implements this trait.
/// payout() must be a pure function of its arguments.
/// Send + Sync so the static profiles can be shared across request tasks.
pub trait PayoffProfile: Send + Sync {
    fn structure(&self) -> StructureType;

    /// Gross cash payout at `settlement` for `contracts` units.
    /// `strikes` has the length this profile expects; anything else yields 0.
    fn payout(
        &self,
        strikes: &[f64],
        direction: OptionDirection,
        contracts: f64,
        settlement: f64,
    ) -> f64;
}

static VANILLA: vanilla::Vanilla = vanilla::Vanilla;
static SPREAD: spread::VerticalSpread = spread::VerticalSpread;
static BUTTERFLY: butterfly::Butterfly = butterfly::Butterfly;
static CONDOR: condor::Condor = condor::Condor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionDirection {
    Call,
    Put,
}

impl OptionDirection {
    #[inline]
    pub fn is_call(self) -> bool {
        matches!(self, Self::Call)
    }
}

impl From<bool> for OptionDirection {
    fn from(is_call: bool) -> Self {
        if is_call { Self::Call } else { Self::Put }
    }
}

impl std::fmt::Display for OptionDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureType {
    Vanilla,
    Spread,
    Butterfly,
    Condor,
    Unknown,
}

impl StructureType {
    /// Strict counterpart of [`classify_structure`]: unsupported counts are an error.
    pub fn from_count(strike_count: usize) -> AppResult<Self> {
        match classify_structure(strike_count) {
            Self::Unknown => Err(AppError::InvalidStructure(strike_count)),
            s => Ok(s),
        }
    }

    pub fn profile(self) -> Option<&'static dyn PayoffProfile> {
        match self {
            Self::Vanilla => Some(&VANILLA),
            Self::Spread => Some(&SPREAD),
            Self::Butterfly => Some(&BUTTERFLY),
            Self::Condor => Some(&CONDOR),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for StructureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vanilla => write!(f, "Vanilla"),
            Self::Spread => write!(f, "Spread"),
            Self::Butterfly => write!(f, "Butterfly"),
            Self::Condor => write!(f, "Condor"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Map a strike count to its structure. Never fails: unsupported counts are `Unknown`.
#[inline]
pub fn classify_structure(strike_count: usize) -> StructureType {
    match strike_count {
        1 => StructureType::Vanilla,
        2 => StructureType::Spread,
        3 => StructureType::Butterfly,
        4 => StructureType::Condor,
        _ => StructureType::Unknown,
    }
}

/// Reference width of a structure.
///
/// Vanilla returns the strike itself (display only). Butterfly and condor use
/// the lower pair of strikes and do not check the upper pair.
#[inline]
pub fn strike_width(strikes: &[f64]) -> f64 {
    match *strikes {
        [k] => k,
        [l, u] => u - l,
        [l, m, _] => m - l,
        [k1, k2, _, _] => k2 - k1,
        _ => 0.0,
    }
}

/// Gross payout of a long position at `settlement`.
///
/// Total over every input: an unsupported strike count is a flat zero, so
/// callers drawing a curve never have to special-case it. Validate with
/// [`StrikeSet::new`] first when the distinction matters.
pub fn payout_at(
    strikes: &[f64],
    direction: OptionDirection,
    contracts: f64,
    settlement: f64,
) -> f64 {
    match classify_structure(strikes.len()).profile() {
        Some(profile) => profile.payout(strikes, direction, contracts, settlement),
        None => {
            tracing::debug!(strike_count = strikes.len(), "unsupported structure, zero payout");
            0.0
        }
    }
}

// ── Validated inputs ──

/// 1 to 4 strictly increasing, positive, finite strikes.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct StrikeSet(SmallVec<[f64; 4]>);

impl StrikeSet {
    pub fn new(strikes: &[f64]) -> AppResult<Self> {
        StructureType::from_count(strikes.len())?;

        if let Some(bad) = strikes.iter().find(|k| !k.is_finite() || **k <= 0.0) {
            return Err(AppError::InvalidStrikes(format!(
                "strikes must be positive and finite, got {bad}"
            )));
        }
        if strikes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AppError::InvalidStrikes(format!(
                "strikes must be strictly increasing, got {strikes:?}"
            )));
        }

        Ok(Self(SmallVec::from_slice(strikes)))
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[inline]
    pub fn structure(&self) -> StructureType {
        classify_structure(self.0.len())
    }

    #[inline]
    pub fn width(&self) -> f64 {
        strike_width(&self.0)
    }

    #[inline]
    pub fn lowest(&self) -> f64 {
        self.0[0]
    }

    #[inline]
    pub fn highest(&self) -> f64 {
        self.0[self.0.len() - 1]
    }
}

impl TryFrom<Vec<f64>> for StrikeSet {
    type Error = AppError;

    fn try_from(strikes: Vec<f64>) -> AppResult<Self> {
        Self::new(&strikes)
    }
}

impl From<StrikeSet> for Vec<f64> {
    fn from(set: StrikeSet) -> Self {
        set.0.into_vec()
    }
}

/// A long option position: structure, direction and size.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Position {
    pub strikes: StrikeSet,
    pub direction: OptionDirection,
    pub contracts: f64,
}

impl Position {
    pub fn new(strikes: StrikeSet, direction: OptionDirection, contracts: f64) -> AppResult<Self> {
        if !contracts.is_finite() || contracts < 0.0 {
            return Err(AppError::InvalidInput(format!(
                "contracts must be a non-negative number, got {contracts}"
            )));
        }
        Ok(Self { strikes, direction, contracts })
    }

    #[inline]
    pub fn structure(&self) -> StructureType {
        self.strikes.structure()
    }

    #[inline]
    pub fn payout_at(&self, settlement: f64) -> f64 {
        payout_at(self.strikes.as_slice(), self.direction, self.contracts, settlement)
    }
}
