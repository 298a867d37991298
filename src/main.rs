#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleship_ai::{
    decide, init_logging, serve, Codec, FailureKind, GameState, MoveResponse, PlannerConfig,
    ServerConfig, DEFAULT_HIT_WEIGHT,
};
#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use std::io::Read;
#[cfg(feature = "std")]
use tokio::time::Duration;

#[cfg(feature = "std")]
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board width in cells.
    #[arg(long, default_value_t = battleship_ai::BOARD_WIDTH, global = true)]
    width: usize,
    /// Board height in cells.
    #[arg(long, default_value_t = battleship_ai::BOARD_HEIGHT, global = true)]
    height: usize,
    /// Weight multiplier per unresolved hit a placement covers.
    #[arg(
        long,
        default_value_t = DEFAULT_HIT_WEIGHT,
        value_parser = battleship_ai::parse_hit_weight,
        global = true
    )]
    hit_weight: f64,
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "std")]
#[derive(Subcommand)]
enum Commands {
    /// Serve move requests over TCP.
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: String,
        #[arg(long, default_value = "json", help = "Frame encoding: json or bincode")]
        codec: Codec,
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
        #[arg(long, default_value_t = battleship_ai::transport::tcp::MAX_MESSAGE_SIZE)]
        max_message_size: u32,
    },
    /// Decide one move for a JSON snapshot read from a file or stdin.
    Decide {
        #[arg(long)]
        file: Option<String>,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let planner = PlannerConfig::new(cli.width, cli.height).with_hit_weight(cli.hit_weight);

    match cli.command {
        Commands::Serve {
            bind,
            codec,
            timeout_secs,
            max_message_size,
        } => {
            serve(ServerConfig {
                bind,
                codec,
                timeout: Duration::from_secs(timeout_secs),
                max_message_size,
                planner,
            })
            .await?;
        }
        Commands::Decide { file } => {
            let raw = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path, e))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let state: GameState = serde_json::from_str(&raw)
                .map_err(|e| anyhow::anyhow!("invalid game state: {}", e))?;
            match decide(&state, &planner) {
                Ok(shot) => {
                    log::debug!("{:?} mode, covering {:?}", shot.mode, shot.cells);
                    let response = MoveResponse::from(shot);
                    println!("{}", serde_json::to_string(&response)?);
                }
                Err(e) => {
                    // the engine owns the fallback, so report and exit non-zero
                    log::error!("{:?}: {}", FailureKind::from(&e), e);
                    std::process::exit(2);
                }
            }
        }
    }
    Ok(())
}
