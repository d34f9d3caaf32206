//! Typed failure taxonomy for the solver core.

use crate::Epoch;
use crate::Probability;
use crate::Troops;

/// Everything the core can refuse to do.
///
/// All three variants are fatal to the run: the first two signal a
/// misconfiguration or a defect in allocation logic, the third a pool
/// size the allocation space cannot support. Floating-point drift near
/// probability boundaries is tolerated within
/// [`PROBABILITY_EPSILON`](crate::PROBABILITY_EPSILON) and never raised.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Regret-matched probability mass exceeded 1. The regret scale (mu)
    /// is undersized for this pool size and utility spread; the run must
    /// abort rather than clamp.
    #[error("probability mass {mass} exceeds 1 at epoch {epoch} with regret scale {scale}")]
    RegretScale {
        mass: Probability,
        scale: f64,
        epoch: Epoch,
    },
    /// An allocation's troop sum diverged from the budget after
    /// construction or crossover. Defect in allocation logic.
    #[error("allocation sums to {found} troops, expected {expected}")]
    BudgetMismatch { expected: Troops, found: Troops },
    /// Rejection sampling for unique allocations exhausted its attempt
    /// budget: the feasible allocation space is smaller than the pool.
    #[error("could not fill a pool of {size} unique allocations within {attempts} attempts")]
    InfeasiblePool { size: usize, attempts: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
