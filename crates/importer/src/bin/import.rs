use chrono::Datelike;
use clap::{Parser, Subcommand};
use importer::{AdventOfCodeSource, AocConfig, LeaderboardSource, modifiers, sync};
use std::path::PathBuf;
use storage::Database;
use storage::services::{catalog, leaderboard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "aoc-import")]
#[command(about = "Advent of Code private leaderboard importer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://data.sqlite3?mode=rwc")]
    database_url: String,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the private leaderboard once and store it
    Fetch {
        #[arg(long, env = "AOC_SESSION_ID", hide_env_values = true)]
        session: String,

        #[arg(long, env = "AOC_LEADERBOARD_ID")]
        leaderboard: String,

        /// Event year, defaults to the current year
        #[arg(long, env = "AOC_YEAR")]
        year: Option<i32>,

        /// Print the normalised snapshot instead of storing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Manage the language modifier catalog
    Modifiers {
        #[command(subcommand)]
        action: ModifierAction,
    },
    /// Print the ranked leaderboard of a stored year
    Show {
        #[arg(long, env = "AOC_YEAR")]
        year: Option<i32>,
    },
}

#[derive(Subcommand)]
enum ModifierAction {
    /// Upsert every entry of a JSON seed file
    Load { file: PathBuf },
    Remove { language: String },
    List,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "import={},importer={},storage={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Fetch {
            session,
            leaderboard,
            year,
            dry_run,
        } => {
            let source = AdventOfCodeSource::new(AocConfig {
                session,
                leaderboard_id: leaderboard,
                year: year.unwrap_or_else(current_year),
            })?;

            if dry_run {
                handle_dry_run(&source).await?;
            } else {
                let db = connect(&cli.database_url).await?;
                let count = sync::run_cycle(&source, &db).await?;
                tracing::info!("✓ Stored {} leaderboard row(s)", count);
            }
        }
        Commands::Modifiers { action } => {
            let db = connect(&cli.database_url).await?;
            handle_modifiers(action, &db).await?;
        }
        Commands::Show { year } => {
            let db = connect(&cli.database_url).await?;
            handle_show(year.unwrap_or_else(current_year), &db).await?;
        }
    }

    Ok(())
}

async fn connect(database_url: &str) -> Result<Database, Box<dyn std::error::Error>> {
    tracing::info!("Connecting to database...");
    let db = Database::new(database_url).await?;
    db.run_migrations().await?;
    Ok(db)
}

async fn handle_dry_run(source: &AdventOfCodeSource) -> Result<(), Box<dyn std::error::Error>> {
    match source.fetch().await? {
        Some(snapshot) => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        None => tracing::warn!("{} returned no leaderboard", source.name()),
    }
    Ok(())
}

async fn handle_modifiers(
    action: ModifierAction,
    db: &Database,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ModifierAction::Load { file } => {
            let written = modifiers::seed_from_file(db, &file).await?;
            tracing::info!("✓ Upserted {} modifier(s)", written);
        }
        ModifierAction::Remove { language } => {
            catalog::remove_modifier(db, &language).await?;
            tracing::info!("✓ Removed {}", language);
        }
        ModifierAction::List => {
            for modifier in catalog::list_modifiers(db).await? {
                println!("{:<24} {:>7}", modifier.language_name, modifier.formatted_bonus());
            }
        }
    }
    Ok(())
}

async fn handle_show(year: i32, db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let entries = leaderboard::get_leaderboard(db, year).await?;
    if entries.is_empty() {
        tracing::warn!("No leaderboard stored for {}", year);
        return Ok(());
    }

    for (index, entry) in leaderboard::rank_entries(entries.into_values()).iter().enumerate() {
        println!(
            "{:>3}. {:<32} {:>6} ({:>5} base, {:>2} stars)",
            index + 1,
            entry.display_name,
            entry.adjusted_score(),
            entry.base_score,
            entry.total_stars()
        );
    }
    Ok(())
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}
