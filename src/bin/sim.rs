use battleship_ai::{init_logging, referee, GameRules, PlannerConfig, Referee};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [games]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let games: usize = match args.get(2) {
        Some(n) => n.parse()?,
        None => 100,
    };

    let mut rng = SmallRng::seed_from_u64(seed);
    let config = PlannerConfig::default();
    let rules = GameRules::classic().with_specials(true, true);

    let mut turns = Vec::with_capacity(games);
    let mut airstrikes = 0;
    let mut bombardments = 0;
    for game in 0..games {
        let mut referee = Referee::new(&mut rng, rules.clone()).map_err(|e| anyhow::anyhow!(e))?;
        let summary = referee::play(&mut referee, &config)
            .map_err(|e| anyhow::anyhow!("game {}: {}", game, e))?;
        log::debug!("game {}: {:?}", game, summary);
        turns.push(summary.turns);
        airstrikes += summary.airstrikes;
        bombardments += summary.bombardments;
    }

    let total: usize = turns.iter().sum();
    let mean = if games == 0 { 0.0 } else { total as f64 / games as f64 };
    let result = json!({
        "seed": seed,
        "games": games,
        "mean_turns": mean,
        "min_turns": turns.iter().min(),
        "max_turns": turns.iter().max(),
        "airstrikes": airstrikes,
        "bombardments": bombardments,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
