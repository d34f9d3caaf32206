//! Zero-sum scoring of one allocation against another.

use super::Allocation;
use crate::Utility;

/// Weighted battlefield scores for a single round.
///
/// Battlefield `i` (0-indexed) is worth `i + 1` points and is taken by
/// whichever side posted strictly more troops there; ties award nothing
/// to either side. Pure and O(battlefields).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payoff {
    pub hero: Utility,
    pub villain: Utility,
}

impl Payoff {
    /// Sign of the score difference: +1 hero win, -1 villain win, 0 draw.
    pub fn outcome(&self) -> Utility {
        (self.hero - self.villain).signum()
    }
}

impl From<(&Allocation, &Allocation)> for Payoff {
    fn from((hero, villain): (&Allocation, &Allocation)) -> Self {
        debug_assert!(hero.len() == villain.len());
        let mut payoff = Self { hero: 0, villain: 0 };
        for (battlefield, (mine, theirs)) in hero.iter().zip(villain.iter()).enumerate() {
            let weight = battlefield as Utility + 1;
            match mine.cmp(&theirs) {
                std::cmp::Ordering::Greater => payoff.hero += weight,
                std::cmp::Ordering::Less => payoff.villain += weight,
                std::cmp::Ordering::Equal => {}
            }
        }
        payoff
    }
}

/// Round outcome for the hero. Antisymmetric: `utility(a, b) == -utility(b, a)`.
pub fn utility(hero: &Allocation, villain: &Allocation) -> Utility {
    Payoff::from((hero, villain)).outcome()
}
