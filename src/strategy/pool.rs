//! The strategy pool and its regret-matching update.
//!
//! A pool is a mixed strategy over a fixed arena of unique allocations.
//! Members are addressed by index; counterfactual payoff differences live
//! in a dense (mine, alt) matrix rather than maps keyed by scheme
//! identity, so the learning step is cache-friendly and allocation-free.

use crate::Epoch;
use crate::Error;
use crate::Fitness;
use crate::PROBABILITY_EPSILON;
use crate::Probability;
use crate::Result;
use crate::Troops;
use crate::UNIQUENESS_RETRIES;
use crate::UTILITY_SPREAD;
use crate::Utility;
use crate::game::Allocation;
use rand::Rng;

/// A player's mixed strategy over a fixed pool of pure allocations.
///
/// `current` is the regret-matched distribution for the next round;
/// `averaged` is its running time average, which is the strategy that
/// actually converges toward a minimax mixture over the pool (over the
/// finite pool only, not over all possible allocations). `regrets[m][a]`
/// accumulates how much better scheme `a` would have scored than the
/// scheme `m` actually played, summed over rounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    allocations: Vec<Allocation>,
    regrets: Vec<Vec<Utility>>,
    current: Vec<Probability>,
    averaged: Vec<Probability>,
    fitness: Vec<Fitness>,
    epochs: Epoch,
    budget: Troops,
    scale: f64,
}

impl Pool {
    /// Fill a fresh pool with unique random allocations.
    ///
    /// Uniqueness is enforced by rejection sampling bounded by
    /// [`UNIQUENESS_RETRIES`]; exhausting the bound means the feasible
    /// allocation space is smaller than the requested pool.
    pub fn new(
        battlefields: usize,
        size: usize,
        budget: Troops,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        if size == 0 || battlefields == 0 || budget < 0 {
            return Err(Error::InfeasiblePool { size, attempts: 0 });
        }
        let mut allocations = Vec::<Allocation>::with_capacity(size);
        let mut attempts = 0;
        while allocations.len() < size {
            attempts += 1;
            if attempts > UNIQUENESS_RETRIES {
                return Err(Error::InfeasiblePool {
                    size,
                    attempts: UNIQUENESS_RETRIES,
                });
            }
            let candidate = Allocation::random(battlefields, budget, rng)?;
            if !allocations.contains(&candidate) {
                allocations.push(candidate);
            }
        }
        Ok(Self::assemble(allocations, budget, vec![0.; size]))
    }

    /// Assemble the next generation from evolved allocations and their
    /// seeded average-probability mass. Callers guarantee uniqueness.
    pub(crate) fn generation(
        allocations: Vec<Allocation>,
        budget: Troops,
        averaged: Vec<Probability>,
    ) -> Self {
        Self::assemble(allocations, budget, averaged)
    }

    fn assemble(allocations: Vec<Allocation>, budget: Troops, averaged: Vec<Probability>) -> Self {
        let size = allocations.len();
        let uniform = 1. / size as Probability;
        Self {
            allocations,
            regrets: vec![vec![0; size]; size],
            current: vec![uniform; size],
            averaged,
            fitness: vec![0.; size],
            epochs: 0,
            budget,
            scale: (size.saturating_sub(1) * UTILITY_SPREAD as usize) as f64,
        }
    }

    /// Roulette draw over the current distribution.
    ///
    /// Any residual mass left by floating-point drift is absorbed by the
    /// last scheme, so a draw always resolves.
    pub fn sample(&self, rng: &mut impl Rng) -> usize {
        let mut selector = rng.random::<Probability>();
        for (index, weight) in self.current.iter().enumerate() {
            selector -= weight;
            if selector <= 0. {
                return index;
            }
        }
        self.size() - 1
    }

    /// The regret-matching step, run once per round after both schemes
    /// are revealed.
    ///
    /// Accumulates counterfactual payoff differences against every
    /// alternative, rebuilds the current distribution from the positive
    /// part of those sums, and folds it into the running average. A
    /// probability mass above 1 is never clamped: it means the regret
    /// scale was undersized and the run must abort.
    pub fn update(&mut self, mine: usize, theirs: &Allocation, utility: Utility) -> Result<()> {
        debug_assert!(mine < self.size());
        self.epochs += 1;
        for alt in 0..self.size() {
            self.regrets[mine][alt] += crate::game::utility(&self.allocations[alt], theirs) - utility;
        }
        let denominator = self.epochs as f64 * self.scale;
        let mut mass = 0.;
        for alt in 0..self.size() {
            if alt == mine {
                continue;
            }
            self.current[alt] = self.regrets[mine][alt].max(0) as Probability / denominator;
            mass += self.current[alt];
        }
        if mass > 1. + PROBABILITY_EPSILON {
            return Err(Error::RegretScale {
                mass,
                scale: self.scale,
                epoch: self.epochs,
            });
        }
        self.current[mine] = (1. - mass).max(0.);
        for index in 0..self.size() {
            self.averaged[index] = ((self.epochs - 1) as Probability * self.averaged[index]
                + self.current[index])
                / self.epochs as Probability;
        }
        Ok(())
    }

    /// Ready a winning pool for reuse in the next match: regrets and
    /// epochs cleared, current distribution back to uniform. The averaged
    /// distribution survives; it is the learned strategy, and the first
    /// update after a reset (t = 1) overwrites it regardless.
    pub fn reset(&mut self) {
        let uniform = 1. / self.size() as Probability;
        self.epochs = 0;
        self.current.fill(uniform);
        self.fitness.fill(0.);
        for row in self.regrets.iter_mut() {
            row.fill(0);
        }
    }

    pub fn size(&self) -> usize {
        self.allocations.len()
    }

    pub fn budget(&self) -> Troops {
        self.budget
    }

    pub fn battlefields(&self) -> usize {
        self.allocations[0].len()
    }

    pub fn epochs(&self) -> Epoch {
        self.epochs
    }

    pub fn allocation(&self, index: usize) -> &Allocation {
        &self.allocations[index]
    }

    pub fn allocations(&self) -> impl Iterator<Item = &Allocation> {
        self.allocations.iter()
    }

    pub fn current(&self, index: usize) -> Probability {
        self.current[index]
    }

    pub fn averaged(&self, index: usize) -> Probability {
        self.averaged[index]
    }

    pub fn fitness(&self, index: usize) -> Fitness {
        self.fitness[index]
    }

    pub(crate) fn clear_fitness(&mut self) {
        self.fitness.fill(0.);
    }

    pub(crate) fn add_fitness(&mut self, index: usize, value: Fitness) {
        self.fitness[index] += value;
    }

    /// Reorder members by descending fitness, ties broken by the
    /// lexicographic troop-vector order.
    ///
    /// Head-to-head payoff cannot break ties: Blotto allocations cycle
    /// (A beats B beats C beats A), so it is not transitive and any
    /// comparator built on it is not a strict weak ordering, which the
    /// sort rejects at runtime. Every parallel vector moves with the
    /// permutation, including both regret axes, so member indices stay
    /// coherent.
    pub(crate) fn order(&mut self) {
        let mut permutation = (0..self.size()).collect::<Vec<usize>>();
        permutation.sort_by(|&x, &y| {
            self.fitness[y]
                .partial_cmp(&self.fitness[x])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| self.allocations[x].cmp(&self.allocations[y]))
        });
        self.allocations = permutation
            .iter()
            .map(|&i| self.allocations[i].clone())
            .collect();
        self.current = permutation.iter().map(|&i| self.current[i]).collect();
        self.averaged = permutation.iter().map(|&i| self.averaged[i]).collect();
        self.fitness = permutation.iter().map(|&i| self.fitness[i]).collect();
        self.regrets = permutation
            .iter()
            .map(|&i| permutation.iter().map(|&j| self.regrets[i][j]).collect())
            .collect();
    }

    #[cfg(test)]
    pub(crate) fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, allocation) in self.allocations.iter().enumerate() {
            writeln!(
                f,
                "{:>2}: {} Prob: {:.4}",
                index + 1,
                allocation,
                self.averaged[index],
            )?;
        }
        Ok(())
    }
}

impl crate::Arbitrary for Pool {
    fn random() -> Self {
        let ref mut rng = rand::rng();
        Self::new(
            crate::NUMBER_OF_BATTLEFIELDS,
            crate::POOL_SIZE,
            crate::TROOP_BUDGET,
            rng,
        )
        .expect("default geometry is feasible")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::utility;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn fresh(seed: u64) -> Pool {
        let ref mut rng = SmallRng::seed_from_u64(seed);
        Pool::new(10, 10, 100, rng).unwrap()
    }

    #[test]
    fn members_are_unique_and_budgeted() {
        let pool = fresh(1);
        for i in 0..pool.size() {
            assert_eq!(pool.allocation(i).sum(), 100);
            for j in 0..i {
                assert_ne!(pool.allocation(i), pool.allocation(j));
            }
        }
    }

    #[test]
    fn fresh_pool_is_uniform() {
        let pool = fresh(2);
        for i in 0..pool.size() {
            assert!((pool.current(i) - 0.1).abs() < PROBABILITY_EPSILON);
            assert_eq!(pool.averaged(i), 0.);
        }
        assert_eq!(pool.epochs(), 0);
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        let ref mut rng = SmallRng::seed_from_u64(3);
        assert!(matches!(
            Pool::new(0, 10, 100, rng),
            Err(Error::InfeasiblePool { .. })
        ));
        assert!(matches!(
            Pool::new(10, 0, 100, rng),
            Err(Error::InfeasiblePool { .. })
        ));
    }

    #[test]
    fn infeasible_pool_size_is_bounded() {
        // one battlefield admits exactly one allocation; a pool of two
        // can never fill, and must fail instead of spinning forever
        let ref mut rng = SmallRng::seed_from_u64(4);
        assert!(matches!(
            Pool::new(1, 2, 5, rng),
            Err(Error::InfeasiblePool { size: 2, .. })
        ));
    }

    #[test]
    fn current_mass_stays_normalized() {
        let ref mut rng = SmallRng::seed_from_u64(5);
        let mut hero = Pool::new(10, 10, 100, rng).unwrap();
        let villain = Pool::new(10, 10, 100, rng).unwrap();
        for _ in 0..1_000 {
            let mine = hero.sample(rng);
            let theirs = villain.allocation(villain.sample(rng)).clone();
            let utility = utility(hero.allocation(mine), &theirs);
            hero.update(mine, &theirs, utility).unwrap();
            let mass = (0..hero.size()).map(|i| hero.current(i)).sum::<Probability>();
            assert!((mass - 1.).abs() < 1e-6, "mass {} drifted", mass);
        }
    }

    #[test]
    fn averaged_converges_to_a_distribution() {
        let ref mut rng = SmallRng::seed_from_u64(6);
        let mut hero = Pool::new(10, 10, 100, rng).unwrap();
        let mut villain = Pool::new(10, 10, 100, rng).unwrap();
        for _ in 0..10_000 {
            let h = hero.sample(rng);
            let v = villain.sample(rng);
            let mine = hero.allocation(h).clone();
            let theirs = villain.allocation(v).clone();
            let utility = utility(&mine, &theirs);
            hero.update(h, &theirs, utility).unwrap();
            villain.update(v, &mine, -utility).unwrap();
        }
        for pool in [&hero, &villain] {
            let mass = (0..pool.size()).map(|i| pool.averaged(i)).sum::<Probability>();
            assert!((mass - 1.).abs() < 1e-6, "averaged mass {}", mass);
            assert!((0..pool.size()).all(|i| pool.averaged(i) >= 0.));
            assert!((0..pool.size()).any(|i| pool.averaged(i) > 0.));
        }
    }

    #[test]
    fn sampling_is_deterministic_under_a_seed() {
        let pool = fresh(7);
        let draws = |seed: u64| {
            let ref mut rng = SmallRng::seed_from_u64(seed);
            (0..100).map(|_| pool.sample(rng)).collect::<Vec<usize>>()
        };
        assert_eq!(draws(42), draws(42));
    }

    #[test]
    fn undersized_scale_is_fatal() {
        let ref mut rng = SmallRng::seed_from_u64(8);
        let mut hero = Pool::new(10, 10, 100, rng).unwrap();
        let villain = Pool::new(10, 10, 100, rng).unwrap();
        hero.set_scale(1e-3);
        let mut failed = false;
        for _ in 0..100 {
            let mine = hero.sample(rng);
            let theirs = villain.allocation(villain.sample(rng)).clone();
            let utility = utility(hero.allocation(mine), &theirs);
            match hero.update(mine, &theirs, utility) {
                Err(Error::RegretScale { mass, .. }) => {
                    assert!(mass > 1.);
                    failed = true;
                    break;
                }
                Ok(()) => continue,
                Err(other) => panic!("unexpected failure: {}", other),
            }
        }
        assert!(failed, "tiny regret scale never tripped the mass check");
    }

    #[test]
    fn tied_fitness_orders_lexicographically() {
        // a fresh pool carries all-zero fitness, so every member ties;
        // ranking a large one must neither panic nor depend on arrival
        // order
        let ref mut rng = SmallRng::seed_from_u64(10);
        let mut pool = Pool::new(10, 200, 100, rng).unwrap();
        pool.order();
        for index in 1..pool.size() {
            assert!(pool.allocation(index - 1) < pool.allocation(index));
        }
    }

    #[test]
    fn reset_clears_learning_but_keeps_averaged() {
        let ref mut rng = SmallRng::seed_from_u64(9);
        let mut hero = Pool::new(10, 10, 100, rng).unwrap();
        let villain = Pool::new(10, 10, 100, rng).unwrap();
        for _ in 0..100 {
            let mine = hero.sample(rng);
            let theirs = villain.allocation(villain.sample(rng)).clone();
            let utility = utility(hero.allocation(mine), &theirs);
            hero.update(mine, &theirs, utility).unwrap();
        }
        let averaged = (0..hero.size()).map(|i| hero.averaged(i)).collect::<Vec<_>>();
        hero.reset();
        assert_eq!(hero.epochs(), 0);
        for i in 0..hero.size() {
            assert!((hero.current(i) - 0.1).abs() < PROBABILITY_EPSILON);
            assert_eq!(hero.averaged(i), averaged[i]);
            assert!(hero.regrets[i].iter().all(|&regret| regret == 0));
        }
    }
}
