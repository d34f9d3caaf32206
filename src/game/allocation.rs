//! A pure strategy: one concrete split of the troop budget.

use crate::Arbitrary;
use crate::Error;
use crate::Result;
use crate::Troops;
use rand::Rng;
use rand::seq::SliceRandom;

/// One pure allocation of the troop budget across the battlefields.
///
/// The troop sum equals the owning pool's budget at every observable
/// point; construction and crossover verify the invariant and refuse to
/// yield an allocation that breaks it. Identity is content: two
/// allocations with the same troop vector are the same scheme for
/// deduplication purposes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Allocation(Vec<Troops>);

impl Allocation {
    /// Spread the budget at random.
    ///
    /// Battlefield indices are shuffled onto a stack and popped one at a
    /// time, each receiving up to half the remaining troops; the stack is
    /// reshuffled whenever it runs dry, so early battlefields carry no
    /// positional bias. Terminates because remainders of 1 are granted in
    /// full.
    pub fn random(battlefields: usize, budget: Troops, rng: &mut impl Rng) -> Result<Self> {
        let mut troops = vec![0; battlefields];
        let mut deck = Self::deck(battlefields, rng);
        let mut remaining = budget;
        while remaining > 0 {
            let battlefield = match deck.pop() {
                Some(battlefield) => battlefield,
                None => {
                    deck = Self::deck(battlefields, rng);
                    continue;
                }
            };
            let granted = rng.random_range(0..=(remaining + 1) / 2);
            troops[battlefield] += granted;
            remaining -= granted;
        }
        Self::checked(troops, budget)
    }

    /// Cross two parent allocations into a child.
    ///
    /// Battlefields are visited in shuffled order; each copies the count
    /// of a uniformly chosen parent until the running total meets or
    /// exceeds the budget or every battlefield has been visited. The
    /// signed remainder is then folded into the last battlefield visited,
    /// which restores the budget without going negative.
    pub fn crossover(
        mother: &Self,
        father: &Self,
        budget: Troops,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        let battlefields = mother.len();
        let mut troops = vec![0; battlefields];
        let mut deck = Self::deck(battlefields, rng);
        let mut remaining = budget;
        let mut last = 0;
        for _ in 0..battlefields {
            if remaining <= 0 {
                break;
            }
            let parent = if rng.random::<bool>() { mother } else { father };
            let battlefield = deck.pop().expect("deck holds one index per battlefield");
            troops[battlefield] = parent.get(battlefield);
            remaining -= parent.get(battlefield);
            last = battlefield;
        }
        if remaining != 0 {
            troops[last] += remaining;
        }
        Self::checked(troops, budget)
    }

    /// Exchange the garrisons of two battlefields. Budget-preserving.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }

    /// March troops from one battlefield to another. Budget-preserving;
    /// callers never move more than the donor holds.
    pub fn shift(&mut self, to: usize, from: usize, troops: Troops) {
        debug_assert!(troops <= self.0[from]);
        self.0[to] += troops;
        self.0[from] -= troops;
    }

    /// Troops posted on one battlefield.
    pub fn get(&self, battlefield: usize) -> Troops {
        self.0[battlefield]
    }

    /// Number of battlefields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total troops across all battlefields.
    pub fn sum(&self) -> Troops {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = Troops> + '_ {
        self.0.iter().copied()
    }

    /// Verify the sum invariant before yielding an allocation.
    fn checked(troops: Vec<Troops>, budget: Troops) -> Result<Self> {
        let found = troops.iter().sum::<Troops>();
        if found == budget {
            Ok(Self(troops))
        } else {
            Err(Error::BudgetMismatch {
                expected: budget,
                found,
            })
        }
    }

    /// Shuffled battlefield indices for draw-without-replacement scans.
    fn deck(battlefields: usize, rng: &mut impl Rng) -> Vec<usize> {
        let mut deck = (0..battlefields).collect::<Vec<usize>>();
        deck.shuffle(rng);
        deck
    }
}

impl From<Vec<Troops>> for Allocation {
    fn from(troops: Vec<Troops>) -> Self {
        Self(troops)
    }
}

impl std::fmt::Display for Allocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "|")?;
        for troops in self.iter() {
            write!(f, "{:>3}|", troops)?;
        }
        Ok(())
    }
}

impl Arbitrary for Allocation {
    fn random() -> Self {
        let ref mut rng = rand::rng();
        Self::random(crate::NUMBER_OF_BATTLEFIELDS, crate::TROOP_BUDGET, rng)
            .expect("random allocation spends the budget exactly")
    }
}
