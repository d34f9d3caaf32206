//! Serialization boundary for learned strategies.
//!
//! The orchestrator persists strategies in whatever format it likes; the
//! core only promises this shape — each scheme as its troop vector plus
//! its time-averaged probability — and a lossless round trip back into a
//! fresh pool. Nothing in the learning path reads the serialized form.

use super::Pool;
use crate::Error;
use crate::Probability;
use crate::Result;
use crate::Troops;
use crate::game::Allocation;
use serde::Deserialize;
use serde::Serialize;

/// A pool reduced to its learned mixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub schemes: Vec<Scheme>,
}

/// One pure allocation and its weight in the averaged strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheme {
    pub troops: Vec<Troops>,
    pub average_probability: Probability,
}

impl From<&Pool> for Snapshot {
    fn from(pool: &Pool) -> Self {
        Self {
            schemes: (0..pool.size())
                .map(|index| Scheme {
                    troops: pool.allocation(index).iter().collect(),
                    average_probability: pool.averaged(index),
                })
                .collect(),
        }
    }
}

impl TryFrom<Snapshot> for Pool {
    type Error = Error;

    /// Rebuild a pool around a persisted mixture: allocations and
    /// averaged probabilities restored, learning state (regrets, epochs,
    /// current distribution) fresh. The budget is recovered from the
    /// schemes themselves, which must all agree on it.
    fn try_from(snapshot: Snapshot) -> Result<Self> {
        let budget = match snapshot.schemes.first() {
            Some(scheme) => scheme.troops.iter().sum::<Troops>(),
            None => {
                return Err(Error::InfeasiblePool {
                    size: 0,
                    attempts: 0,
                });
            }
        };
        let mut allocations = Vec::with_capacity(snapshot.schemes.len());
        let mut averaged = Vec::with_capacity(snapshot.schemes.len());
        for scheme in snapshot.schemes {
            let found = scheme.troops.iter().sum::<Troops>();
            if found != budget {
                return Err(Error::BudgetMismatch {
                    expected: budget,
                    found,
                });
            }
            allocations.push(Allocation::from(scheme.troops));
            averaged.push(scheme.average_probability);
        }
        Ok(Pool::generation(allocations, budget, averaged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;
    use crate::game::utility;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn round_trip_preserves_the_mixture() {
        let ref mut rng = SmallRng::seed_from_u64(11);
        let mut hero = Pool::new(10, 10, 100, rng).unwrap();
        let villain = Pool::new(10, 10, 100, rng).unwrap();
        for _ in 0..500 {
            let mine = hero.sample(rng);
            let theirs = villain.allocation(villain.sample(rng)).clone();
            let utility = utility(hero.allocation(mine), &theirs);
            hero.update(mine, &theirs, utility).unwrap();
        }
        let snapshot = Snapshot::from(&hero);
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored = Pool::try_from(serde_json::from_str::<Snapshot>(&json).unwrap()).unwrap();
        assert_eq!(restored.size(), hero.size());
        assert_eq!(restored.budget(), hero.budget());
        for index in 0..hero.size() {
            assert_eq!(restored.allocation(index), hero.allocation(index));
            assert_eq!(restored.averaged(index), hero.averaged(index));
        }
        assert_eq!(restored.epochs(), 0);
    }

    #[test]
    fn field_names_follow_the_boundary_shape() {
        let pool: Pool = Arbitrary::random();
        let json = serde_json::to_value(Snapshot::from(&pool)).unwrap();
        let scheme = &json["schemes"][0];
        assert!(scheme["troops"].is_array());
        assert!(scheme["averageProbability"].is_number());
    }

    #[test]
    fn disagreeing_budgets_are_rejected() {
        let snapshot = Snapshot {
            schemes: vec![
                Scheme {
                    troops: vec![5, 5],
                    average_probability: 0.5,
                },
                Scheme {
                    troops: vec![9, 0],
                    average_probability: 0.5,
                },
            ],
        };
        assert!(matches!(
            Pool::try_from(snapshot),
            Err(Error::BudgetMismatch {
                expected: 10,
                found: 9
            })
        ));
    }
}
