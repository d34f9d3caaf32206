//! Parent selection schemes.
//!
//! Both schemes assume the pool has just been ranked by the fitness pass,
//! so lower index means fitter member.

use crate::ELITISM_RATE;
use crate::TOURNAMENT_FLOOR;
use crate::strategy::Pool;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

/// How a parent is drawn from a fitness-ranked pool.
pub trait Selection {
    /// Index of one parent; called independently for each parent.
    fn select(&self, pool: &Pool, rng: &mut impl Rng) -> usize;
}

/// Tournament selection.
///
/// Draws `max(ceil(ELITISM_RATE × size), TOURNAMENT_FLOOR)` entrants
/// uniformly with replacement and keeps the fittest, i.e. the lowest
/// drawn index.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tournament;

impl Selection for Tournament {
    fn select(&self, pool: &Pool, rng: &mut impl Rng) -> usize {
        let entrants = (ELITISM_RATE * pool.size() as f64).ceil() as usize;
        let entrants = entrants.max(TOURNAMENT_FLOOR);
        (0..entrants)
            .map(|_| rng.random_range(0..pool.size()))
            .min()
            .expect("tournament holds at least one entrant")
    }
}

/// Roulette-wheel selection.
///
/// Weights each member by its fitness slid so the minimum sits at zero,
/// then draws proportionally. Degenerate all-zero mass (every member
/// equally fit) falls back to a uniform draw.
#[derive(Debug, Clone, Copy, Default)]
pub struct Roulette;

impl Selection for Roulette {
    fn select(&self, pool: &Pool, rng: &mut impl Rng) -> usize {
        let least = (0..pool.size())
            .map(|index| pool.fitness(index))
            .fold(f64::INFINITY, f64::min)
            .min(0.);
        let weights = (0..pool.size())
            .map(|index| pool.fitness(index) - least)
            .collect::<Vec<f64>>();
        match weights.iter().sum::<f64>() {
            total if total > 0. => WeightedIndex::new(&weights)
                .expect("positive total weight")
                .sample(rng),
            _ => rng.random_range(0..pool.size()),
        }
    }
}
