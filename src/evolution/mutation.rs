//! Mutation operators applied to freshly crossed-over children.

use crate::Troops;
use crate::game::Allocation;
use crate::strategy::Pool;
use rand::Rng;

/// How a child allocation gets perturbed after crossover.
///
/// Operators may consult the opposing pool, which lets mutation steer
/// toward battlefields the child is currently losing.
pub trait Mutation {
    fn mutate(&self, child: &mut Allocation, opponent: &Pool, rng: &mut impl Rng);
}

/// Exchanges the troops of two distinct battlefields.
#[derive(Debug, Clone, Copy, Default)]
pub struct Swap;

impl Mutation for Swap {
    fn mutate(&self, child: &mut Allocation, _: &Pool, rng: &mut impl Rng) {
        if child.len() < 2 {
            return;
        }
        let a = rng.random_range(0..child.len());
        let b = loop {
            let b = rng.random_range(0..child.len());
            if b != a {
                break b;
            }
        };
        child.swap(a, b);
    }
}

/// Shifts troops from the battlefield the child loses least often into
/// the one it loses most often, against the opposing pool.
///
/// For each battlefield we measure the fraction of opposing members
/// that outgun the child there, and the largest margin by which they
/// do. Troops then move from the least-lost battlefield to the
/// most-lost one, capped by that margin and by the donor's garrison.
/// The move only fires when the donor precedes the taker, so a single
/// mutation never walks troops backward across the front.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deficit;

impl Mutation for Deficit {
    fn mutate(&self, child: &mut Allocation, opponent: &Pool, _: &mut impl Rng) {
        let mut losses = vec![0f64; child.len()];
        let mut deficits = vec![0 as Troops; child.len()];
        for battlefield in 0..child.len() {
            for index in 0..opponent.size() {
                let enemy = opponent.allocation(index).get(battlefield);
                if child.get(battlefield) < enemy {
                    losses[battlefield] += 1.;
                    deficits[battlefield] =
                        deficits[battlefield].max(enemy - child.get(battlefield));
                }
            }
            losses[battlefield] /= opponent.size() as f64;
        }
        let mut smallest = 1f64;
        let mut largest = 0f64;
        let mut donor: Option<usize> = None;
        let mut taker: Option<usize> = None;
        for battlefield in 0..child.len() {
            if losses[battlefield] < smallest {
                smallest = losses[battlefield];
                donor = Some(battlefield);
            } else if losses[battlefield] >= largest {
                largest = losses[battlefield];
                taker = Some(battlefield);
            }
        }
        if let (Some(donor), Some(taker)) = (donor, taker) {
            if donor < taker {
                let troops = deficits[taker].min(child.get(donor));
                child.shift(taker, donor, troops);
            }
        }
    }
}
