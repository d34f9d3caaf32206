//! Co-evolutionary regeneration of losing pools.
//!
//! - `fitness` — Ranks schemes by expected payoff against the opponent's
//!   learned mixture
//! - `selection` — Parent selection schemes (tournament, roulette)
//! - `mutation` — Mutation schemes (blind swap, deficit-seeking)
//! - `evolver` — Elitism + crossover + mutation over a losing pool

mod evolver;
mod fitness;
mod mutation;
mod selection;

pub use evolver::*;
pub use fitness::*;
pub use mutation::*;
pub use selection::*;
