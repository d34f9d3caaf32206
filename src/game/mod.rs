//! Blotto game primitives: pure allocations and battlefield scoring.

mod allocation;
mod payoff;

pub use allocation::*;
pub use payoff::*;
