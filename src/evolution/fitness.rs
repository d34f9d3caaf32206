//! Co-evolution fitness: expected payoff against the opponent's mixture.

use crate::Fitness;
use crate::game::utility;
use crate::strategy::Pool;

/// Score every scheme in each pool against the *other* pool's averaged
/// distribution, then rank both pools by descending fitness.
///
/// This is the cross-pool signal driving elitism and parent selection:
/// a scheme's fitness is its expected round outcome if the opponent
/// plays their learned mixture. It is distinct from the within-pool
/// regret sums of [`Pool::update`], which only compare siblings.
pub fn evaluate(a: &mut Pool, b: &mut Pool) {
    a.clear_fitness();
    b.clear_fitness();
    for i in 0..a.size() {
        for j in 0..b.size() {
            let utility = utility(a.allocation(i), b.allocation(j));
            a.add_fitness(i, b.averaged(j) * utility as Fitness);
            b.add_fitness(j, a.averaged(i) * -(utility as Fitness));
        }
    }
    a.order();
    b.order();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Allocation;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Two-battlefield pools with hand-picked members: against [5, 5],
    /// the allocation [0, 10] wins (takes the 2-point battlefield) and
    /// [10, 0] loses (takes only the 1-point one).
    fn pools() -> (Pool, Pool) {
        let a = Pool::generation(
            vec![
                Allocation::from(vec![10, 0]),
                Allocation::from(vec![0, 10]),
            ],
            10,
            vec![0.5, 0.5],
        );
        let b = Pool::generation(vec![Allocation::from(vec![5, 5])], 10, vec![1.]);
        (a, b)
    }

    #[test]
    fn winners_rank_first() {
        let (mut a, mut b) = pools();
        evaluate(&mut a, &mut b);
        assert_eq!(a.allocation(0), &Allocation::from(vec![0, 10]));
        assert_eq!(a.fitness(0), 1.);
        assert_eq!(a.fitness(1), -1.);
        // villain's lone scheme splits against the hero mixture
        assert_eq!(b.fitness(0), 0.);
    }

    #[test]
    fn ranking_is_reproducible() {
        let ref mut rng = SmallRng::seed_from_u64(13);
        let mut first = Pool::new(10, 10, 100, rng).unwrap();
        let mut other = Pool::new(10, 10, 100, rng).unwrap();
        let mut second = first.clone();
        let mut again = other.clone();
        evaluate(&mut first, &mut other);
        evaluate(&mut second, &mut again);
        for index in 0..first.size() {
            assert_eq!(first.allocation(index), second.allocation(index));
        }
    }

    #[test]
    fn order_is_descending() {
        let ref mut rng = SmallRng::seed_from_u64(14);
        let mut a = Pool::new(10, 10, 100, rng).unwrap();
        let mut b = Pool::new(10, 10, 100, rng).unwrap();
        // give the averaged mixtures some mass so fitness is nonzero
        for _ in 0..100 {
            let i = a.sample(rng);
            let j = b.sample(rng);
            let mine = a.allocation(i).clone();
            let theirs = b.allocation(j).clone();
            let utility = utility(&mine, &theirs);
            a.update(i, &theirs, utility).unwrap();
            b.update(j, &mine, -utility).unwrap();
        }
        evaluate(&mut a, &mut b);
        for pool in [&a, &b] {
            for index in 1..pool.size() {
                assert!(pool.fitness(index - 1) >= pool.fitness(index));
            }
        }
    }
}
