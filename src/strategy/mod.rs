//! Strategy pools: finite mixtures over pure allocations, refined by
//! regret matching.

mod pool;
mod snapshot;

pub use pool::*;
pub use snapshot::*;
