//! Command-line runner for club-swiss tournaments
//!
//! Runs a complete Swiss tournament in memory: registers a field of players,
//! pairs every round, simulates results from the Elo expectation and prints
//! the pairings and final standings.

use anyhow::{Context, Result};
use clap::Parser;
use club_swiss::config::{validate_config, AppConfig};
use club_swiss::rating::expected_score;
use club_swiss::tournament::{InMemoryTournamentStore, TournamentManager};
use club_swiss::types::{GameOutcome, Player};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Club Swiss - Swiss pairing and Elo rating for club tournaments
#[derive(Parser)]
#[command(
    name = "club-swiss",
    version,
    about = "Run a simulated Swiss-system chess tournament with Elo rating updates",
    long_about = "Club Swiss pairs a random first round, then greedy score-bucket Swiss rounds \
                 that never force rematches, and rates every reported game with Elo. This runner \
                 drives a full tournament in memory with simulated results."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Player list
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "JSON array of {\"member_id\", \"rating\"} entries"
    )]
    players: Option<PathBuf>,

    /// Size of the generated field when no player file is given
    #[arg(long, value_name = "N", default_value_t = 9)]
    field_size: usize,

    /// Tournament name
    #[arg(long, default_value = "Club Swiss")]
    name: String,

    /// Number of rounds override
    #[arg(short, long, value_name = "N")]
    rounds: Option<u32>,

    /// Seed override for pairing and result simulation
    #[arg(short, long, value_name = "SEED")]
    seed: Option<u64>,

    /// K-factor override
    #[arg(short, long, value_name = "K")]
    k_factor: Option<f64>,

    /// Probability that a simulated game is drawn
    #[arg(long, value_name = "P", default_value_t = 0.15)]
    draw_rate: f64,

    /// Print Prometheus metrics after the run
    #[arg(long)]
    print_metrics: bool,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        help = "Validate configuration and exit without running a tournament"
    )]
    dry_run: bool,
}

/// One entry of the player list file
#[derive(Debug, Clone, Deserialize)]
struct PlayerEntry {
    member_id: String,
    rating: Option<i32>,
}

/// Final report printed after the last round
#[derive(Debug, Serialize)]
struct TournamentReport {
    name: String,
    rounds_played: u32,
    status: String,
    standings: Vec<StandingRow>,
}

#[derive(Debug, Serialize)]
struct StandingRow {
    rank: usize,
    member_id: String,
    score: f64,
    initial_rating: i32,
    current_rating: i32,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file or environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(rounds) = args.rounds {
        config.tournament.default_total_rounds = rounds;
    }

    if let Some(seed) = args.seed {
        config.pairing.seed = Some(seed);
    }

    if let Some(k_factor) = args.k_factor {
        config.rating.k_factor = k_factor;
    }

    validate_config(&config)?;
    Ok(config)
}

fn load_players(args: &Args) -> Result<Vec<PlayerEntry>> {
    match &args.players {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read player file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse player file {}", path.display()))
        }
        None => Ok((1..=args.field_size)
            .map(|i| PlayerEntry {
                member_id: format!("member-{i:02}"),
                rating: Some(1000 + 75 * i as i32),
            })
            .collect()),
    }
}

/// Draw a result for a game from the Elo expectation
fn simulate_outcome(white: i32, black: i32, draw_rate: f64, rng: &mut ChaCha8Rng) -> GameOutcome {
    if rng.gen::<f64>() < draw_rate {
        GameOutcome::Draw
    } else if rng.gen::<f64>() < expected_score(white, black) {
        GameOutcome::WhiteWins
    } else {
        GameOutcome::BlackWins
    }
}

fn rating_of(players: &[Player], player_id: &str) -> i32 {
    players
        .iter()
        .find(|p| p.id == player_id)
        .map(|p| p.current_rating)
        .unwrap_or_default()
}

fn member_of<'a>(players: &'a [Player], player_id: &'a str) -> &'a str {
    players
        .iter()
        .find(|p| p.id == player_id)
        .map(|p| p.member_id.as_str())
        .unwrap_or(player_id)
}

/// Display startup banner with run information
fn display_startup_banner(config: &AppConfig) {
    info!("♟  Club Swiss");
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!("   K-factor: {}", config.rating.k_factor);
    info!("   Rated: {}", config.rating.rated);
    info!("   Rounds: {}", config.tournament.default_total_rounds);
    match config.pairing.seed {
        Some(seed) => info!("   Seed: {}", seed),
        None => info!("   Seed: (entropy)"),
    }
}

async fn run(args: &Args, config: &AppConfig) -> Result<()> {
    let entries = load_players(args)?;
    let manager = TournamentManager::new(Arc::new(InMemoryTournamentStore::new()), config)?;
    let mut results_rng = config.pairing.create_rng();

    let tournament = manager
        .create_tournament("cli", &args.name, Some(config.tournament.default_total_rounds))
        .await?;
    for entry in &entries {
        manager
            .register_player(tournament.id, &entry.member_id, entry.rating)
            .await?;
    }

    for round in 1..=tournament.total_rounds {
        let pairings = manager.generate_pairings(tournament.id, round).await?;
        let players = manager.players(tournament.id).await?;

        println!("Round {round}");
        for (board, pairing) in pairings.iter().enumerate() {
            let white = member_of(&players, &pairing.white);
            match &pairing.black {
                Some(black_id) => {
                    let outcome = simulate_outcome(
                        rating_of(&players, &pairing.white),
                        rating_of(&players, black_id),
                        args.draw_rate,
                        &mut results_rng,
                    );
                    manager.record_result(pairing.id, outcome).await?;
                    println!(
                        "  {:>2}. {} - {}  {}",
                        board + 1,
                        white,
                        member_of(&players, black_id),
                        outcome
                    );
                }
                None => println!("  {:>2}. {} (bye)", board + 1, white),
            }
        }
    }

    let finished = manager.tournament(tournament.id).await?;
    let standings = manager.standings(tournament.id).await?;
    let report = TournamentReport {
        name: finished.name.clone(),
        rounds_played: finished.current_round,
        status: finished.status.to_string(),
        standings: standings
            .into_iter()
            .enumerate()
            .map(|(i, p)| StandingRow {
                rank: i + 1,
                member_id: p.member_id,
                score: p.score,
                initial_rating: p.initial_rating,
                current_rating: p.current_rating,
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if args.print_metrics {
        print!("{}", manager.metrics().gather_text()?);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    if args.dry_run {
        info!("Dry run completed - configuration is valid");
        return Ok(());
    }

    if let Err(e) = run(&args, &config).await {
        error!("Tournament run failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
