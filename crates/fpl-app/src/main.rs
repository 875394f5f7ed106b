// Squad planner entry point.
//
// Startup sequence:
// 1. Parse arguments
// 2. Initialize tracing (stderr, stdout is reserved for results)
// 3. Load config, copying defaults on first run
// 4. Load the player table
// 5. Seed the tie-break RNG
// 6. Run the requested command and print its result

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

use fpl_app::config;
use fpl_app::report;
use fpl_core::projections;
use fpl_core::selection::{self, TransferQuery};

#[derive(Parser)]
#[command(name = "fpl-assistant")]
#[command(about = "Fantasy football squad planner: drafting, lineups, captaincy and transfers")]
#[command(version)]
struct Cli {
    /// Directory holding config/ and defaults/
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Seed for random tie-breaks (overrides strategy.toml)
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draft a fifteen-man squad from scratch
    Draft {
        /// Starter slots bought on points per game (max 9)
        #[arg(long)]
        plus_stars: Option<usize>,
    },

    /// Pick starters, captain and vice-captain for the owned squad
    Lineup,

    /// Suggest same-position replacements for a player
    Transfers {
        /// Player to replace, as spelled in the player table
        name: String,

        /// Money in the bank on top of the player's price
        #[arg(long)]
        extra_budget: Option<f64>,

        /// Number of suggestions per view
        #[arg(long)]
        results: Option<usize>,
    },

    /// Draft once per plus-star count and compare projected scores
    Sweep {
        #[arg(long, default_value = "9")]
        max_plus_stars: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing()?;

    let config = config::load_config(&cli.base_dir).context("failed to load configuration")?;
    info!(
        "Config loaded: budget {}, bench budget {}, {} plus stars",
        config.draft.budget, config.draft.bench_budget, config.draft.plus_stars
    );

    let players_path = cli.base_dir.join(&config.data_paths.players);
    let table = projections::load_table(&players_path)
        .with_context(|| format!("failed to load players from {}", players_path.display()))?;
    info!("Loaded {} players", table.len());

    let mut rng = match cli.seed.or(config.seed) {
        Some(seed) => {
            info!("Using tie-break seed {}", seed);
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_entropy(),
    };

    match cli.command {
        Commands::Draft { plus_stars } => {
            let mut params = config.draft.to_params();
            if let Some(n) = plus_stars {
                params.plus_stars = n;
            }
            let squad =
                selection::draft_squad(&table, &params, &mut rng).context("drafting failed")?;
            emit(cli.json, &squad, || report::render_draft(&squad, &table))?;
        }
        Commands::Lineup => {
            if config.squad.is_empty() {
                anyhow::bail!("no squad configured; list your players in config/squad.toml");
            }
            let lineup = selection::build_lineup(&config.squad, &table, &mut rng)
                .context("lineup selection failed")?;
            emit(cli.json, &lineup, || report::render_lineup(&lineup))?;
        }
        Commands::Transfers {
            name,
            extra_budget,
            results,
        } => {
            let query = TransferQuery {
                current_starters: &config.squad,
                extra_budget: extra_budget.unwrap_or(config.transfers.extra_budget),
                result_count: results.unwrap_or(config.transfers.results_length),
                min_play_fraction: config.transfers.play_time,
            };
            let options = selection::suggest_transfers(&name, &table, &query)
                .with_context(|| format!("transfer search for {name} failed"))?;
            emit(cli.json, &options, || report::render_transfers(&name, &options))?;
        }
        Commands::Sweep { max_plus_stars } => {
            let variants = selection::sweep_plus_stars(
                &table,
                &config.draft.to_params(),
                max_plus_stars,
                &mut rng,
            )
            .context("plus-star sweep failed")?;
            emit(cli.json, &variants, || report::render_sweep(&variants))?;
        }
    }

    Ok(())
}

/// Print `value` as pretty JSON, or the rendered text.
fn emit<T: Serialize>(json: bool, value: &T, render: impl FnOnce() -> String) -> anyhow::Result<()> {
    if json {
        let text = serde_json::to_string_pretty(value).context("failed to serialize result")?;
        println!("{text}");
    } else {
        print!("{}", render());
    }
    Ok(())
}

/// Initialize tracing to stderr so results on stdout stay clean.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fpl_app=info,fpl_core=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
