use anyhow::Context;
use clap::Parser;
use clap::ValueEnum;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use roboblotto::Epoch;
use roboblotto::Troops;
use roboblotto::evolution::Deficit;
use roboblotto::evolution::Evolver;
use roboblotto::evolution::Mutation;
use roboblotto::evolution::Roulette;
use roboblotto::evolution::Selection;
use roboblotto::evolution::Swap;
use roboblotto::evolution::Tournament;
use roboblotto::evolution::evaluate;
use roboblotto::strategy::Pool;
use roboblotto::strategy::Snapshot;
use std::path::Path;
use std::path::PathBuf;

/// Co-evolves two regret-matching strategy pools for Colonel Blotto.
///
/// Each match plays a fixed number of rounds of simultaneous learning,
/// then the pool with the lower total payoff is regenerated by the
/// evolutionary operator while the winner keeps its pool and restarts
/// its learner.
#[derive(Parser)]
#[command(name = "trainer")]
struct Args {
    /// Battlefields per engagement
    #[arg(long, default_value_t = roboblotto::NUMBER_OF_BATTLEFIELDS)]
    battlefields: usize,
    /// Troops each player allocates per scheme
    #[arg(long, default_value_t = roboblotto::TROOP_BUDGET)]
    troops: Troops,
    /// Schemes per strategy pool
    #[arg(long, default_value_t = roboblotto::POOL_SIZE)]
    size: usize,
    /// Learning rounds per match
    #[arg(long, default_value_t = roboblotto::ROUNDS_PER_MATCH)]
    rounds: Epoch,
    /// Matches to play
    #[arg(long, default_value_t = roboblotto::MATCHES)]
    matches: usize,
    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Parent selection scheme
    #[arg(long, value_enum, default_value_t = Select::Tournament)]
    selection: Select,
    /// Child mutation operator
    #[arg(long, value_enum, default_value_t = Mutate::Swap)]
    mutation: Mutate,
    /// Directory to write hero.json and villain.json snapshots into
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Select {
    Tournament,
    Roulette,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mutate {
    Swap,
    Deficit,
}

fn main() -> anyhow::Result<()> {
    roboblotto::log();
    let args = Args::parse();
    let ref mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    match (args.selection, args.mutation) {
        (Select::Tournament, Mutate::Swap) => run(&args, Evolver::new(Tournament, Swap), rng),
        (Select::Tournament, Mutate::Deficit) => run(&args, Evolver::new(Tournament, Deficit), rng),
        (Select::Roulette, Mutate::Swap) => run(&args, Evolver::new(Roulette, Swap), rng),
        (Select::Roulette, Mutate::Deficit) => run(&args, Evolver::new(Roulette, Deficit), rng),
    }
}

fn run<S: Selection, M: Mutation>(
    args: &Args,
    evolver: Evolver<S, M>,
    rng: &mut SmallRng,
) -> anyhow::Result<()> {
    let mut hero = Pool::new(args.battlefields, args.size, args.troops, rng)?;
    let mut villain = Pool::new(args.battlefields, args.size, args.troops, rng)?;
    for game in 1..=args.matches {
        let mut wins = (0usize, 0usize);
        let mut payoff = 0i64;
        for _ in 0..args.rounds {
            let h = hero.sample(rng);
            let v = villain.sample(rng);
            let mine = hero.allocation(h).clone();
            let theirs = villain.allocation(v).clone();
            let utility = roboblotto::game::utility(&mine, &theirs);
            payoff += utility as i64;
            match utility.signum() {
                1 => wins.0 += 1,
                -1 => wins.1 += 1,
                _ => {}
            }
            hero.update(h, &theirs, utility)?;
            villain.update(v, &mine, -utility)?;
        }
        evaluate(&mut hero, &mut villain);
        log::info!(
            "match {:>3} hero {:>5} villain {:>5} payoff {:>+8}",
            game,
            wins.0,
            wins.1,
            payoff
        );
        if payoff > 0 {
            villain = evolver.evolve(&villain, &hero, rng)?;
            hero.reset();
        } else {
            hero = evolver.evolve(&hero, &villain, rng)?;
            villain.reset();
        }
    }
    if let Some(ref output) = args.output {
        std::fs::create_dir_all(output)
            .with_context(|| format!("creating {}", output.display()))?;
        save(&hero, &output.join("hero.json"))?;
        save(&villain, &output.join("villain.json"))?;
    }
    log::info!("hero\n{}", hero);
    log::info!("villain\n{}", villain);
    Ok(())
}

fn save(pool: &Pool, path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, &Snapshot::from(pool))
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("saved {}", path.display());
    Ok(())
}
