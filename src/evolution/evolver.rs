use super::Mutation;
use super::Selection;
use super::Swap;
use super::Tournament;
use crate::ELITISM_RATE;
use crate::MUTATION_RATE;
use crate::Probability;
use crate::UNIQUENESS_RETRIES;
use crate::error::Error;
use crate::error::Result;
use crate::game::Allocation;
use crate::strategy::Pool;
use rand::Rng;

/// Regenerates the losing pool between matches.
///
/// The fittest members survive unchanged, the rest are bred by
/// crossover over selected parents and occasional mutation. The
/// evolved pool keeps the elites' accumulated average-probability
/// mass and splits whatever mass remains evenly across the children,
/// so the next learning phase starts from what the last one proved.
pub struct Evolver<S: Selection, M: Mutation> {
    selection: S,
    mutation: M,
    elitism: f64,
    rate: f64,
}

impl Default for Evolver<Tournament, Swap> {
    fn default() -> Self {
        Self::new(Tournament, Swap)
    }
}

impl<S: Selection, M: Mutation> Evolver<S, M> {
    pub fn new(selection: S, mutation: M) -> Self {
        Self {
            selection,
            mutation,
            elitism: ELITISM_RATE,
            rate: MUTATION_RATE,
        }
    }

    /// Breed the next generation of the loser against the winner.
    ///
    /// Expects the loser ranked by the fitness pass, so its elites sit
    /// at the front. Duplicate children are rejected and rebred; the
    /// retry budget is bounded by [`UNIQUENESS_RETRIES`].
    pub fn evolve(&self, loser: &Pool, winner: &Pool, rng: &mut impl Rng) -> Result<Pool> {
        let size = loser.size();
        let elites = ((self.elitism * size as f64).ceil() as usize).min(size);
        let mut next = (0..elites)
            .map(|index| loser.allocation(index).clone())
            .collect::<Vec<Allocation>>();
        let mut attempts = 0;
        while next.len() < size {
            attempts += 1;
            if attempts > UNIQUENESS_RETRIES {
                return Err(Error::InfeasiblePool {
                    size,
                    attempts: UNIQUENESS_RETRIES,
                });
            }
            let mother = loser.allocation(self.selection.select(loser, rng));
            let father = loser.allocation(self.selection.select(loser, rng));
            let mut child = Allocation::crossover(mother, father, loser.budget(), rng)?;
            if rng.random::<f64>() < self.rate {
                self.mutation.mutate(&mut child, winner, rng);
            }
            if !next.contains(&child) {
                next.push(child);
            }
        }
        let conserved = (0..elites).map(|index| loser.averaged(index)).sum::<Probability>();
        let fresh = match size - elites {
            0 => 0.,
            children => (1. - conserved).max(0.) / children as Probability,
        };
        let averaged = (0..size)
            .map(|index| match index < elites {
                true => loser.averaged(index),
                false => fresh,
            })
            .collect::<Vec<Probability>>();
        log::debug!("bred {} children behind {} elites", size - elites, elites);
        Ok(Pool::generation(next, loser.budget(), averaged))
    }
}
