//! Regret-matching and co-evolutionary search for Colonel Blotto.
//!
//! Two players secretly spread a fixed troop budget across a row of
//! battlefields; battlefield `i` is worth `i + 1` points and falls to
//! whichever side posted strictly more troops there. The side with the
//! higher point total wins the round. This crate approximates a
//! mixed-strategy equilibrium of that game by combining two learners:
//!
//! - **within a match**: each player holds a fixed pool of pure
//!   allocations and runs regret matching over it, so the time-averaged
//!   distribution converges toward a minimax mixture over the pool;
//! - **across matches**: the losing player's pool is regenerated by an
//!   evolutionary operator (elitism, crossover, mutation) ranked by each
//!   allocation's expected payoff against the winner's learned mixture.
//!
//! # Module Structure
//!
//! - `game` — Pure allocations and battlefield scoring
//! - `strategy` — Strategy pools and the regret-matching update
//! - `evolution` — Fitness pass, selection/mutation schemes, evolver
//! - `error` — Typed failure taxonomy

pub mod error;
pub mod evolution;
pub mod game;
pub mod strategy;

pub use error::Error;
pub use error::Result;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Troops posted on a single battlefield.
pub type Troops = i16;
/// Zero-sum round outcomes and accumulated payoff differences.
pub type Utility = i32;
/// Scheme weights in the current and time-averaged mixed strategies.
pub type Probability = f64;
/// Expected payoff of a scheme against the opponent's learned mixture.
pub type Fitness = f64;
/// Update rounds since the owning pool was created or reset.
pub type Epoch = usize;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and Monte Carlo sampling.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// GAME GEOMETRY
// ============================================================================
/// Number of battlefields contested each round.
pub const NUMBER_OF_BATTLEFIELDS: usize = 10;
/// Troops each player distributes across the battlefields.
pub const TROOP_BUDGET: Troops = 100;
/// Pure allocations held in each player's strategy pool.
pub const POOL_SIZE: usize = 10;

// ============================================================================
// REGRET MATCHING
// The scale constant mu must satisfy mu >= (pool size - 1) * spread to keep
// the regret-matched probability mass within [0, 1].
// ============================================================================
/// Widest utility swing between two schemes in one round: outcomes live in {-1, 0, +1}.
pub const UTILITY_SPREAD: Utility = 2;
/// Tolerance for floating-point drift near probability boundaries.
pub const PROBABILITY_EPSILON: Probability = 1e-9;

// ============================================================================
// EVOLUTION
// ============================================================================
/// Fraction of a losing pool carried unchanged into the next generation.
pub const ELITISM_RATE: f64 = 0.2;
/// Chance that a freshly crossed-over child is mutated.
pub const MUTATION_RATE: f64 = 0.05;
/// Minimum tournament size for parent selection.
pub const TOURNAMENT_FLOOR: usize = 5;
/// Attempt bound on rejection sampling for unique allocations.
/// Exhausting it means the feasible allocation space is smaller than the pool.
pub const UNIQUENESS_RETRIES: usize = 10_000;

// ============================================================================
// TRAINING DEFAULTS
// ============================================================================
/// Sample/update rounds played between two pools per match.
pub const ROUNDS_PER_MATCH: usize = 10_000;
/// Matches (evolve/reset cycles) per training run.
pub const MATCHES: usize = 50;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging for driver binaries.
pub fn log() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}
