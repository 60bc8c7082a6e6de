use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fittrack::config::Config;
use fittrack::models::{Category, Goal, Measurement, ProgressEntry};
use fittrack::services::{GoalService, ProgressService};
use fittrack::store::{GoalStore, ProgressStore};

#[derive(Parser)]
#[command(name = "fittrack")]
#[command(about = "Track running and water-intake goals and progress")]
struct Cli {
    /// Directory holding goals.json and fitness_progress.json [default: $FITTRACK_DATA_DIR or the platform data dir]
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage goals
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
    /// Log and list progress
    Progress {
        #[command(subcommand)]
        command: ProgressCommands,
    },
    /// Convert a value between units of one category
    Convert {
        category: Category,
        value: f64,
        /// Unit the value is in
        from: String,
        /// Unit to convert to
        to: String,
    },
}

#[derive(Subcommand)]
enum GoalCommands {
    /// Set the active goal for a category, deactivating the previous one
    Set {
        category: Category,
        value: f64,
        /// Miles, Meters, Kilometers, Feet for running; Ounces, Cups, Liters for water
        unit: String,
    },
    /// List every goal, active or not
    List,
    /// Show the active goal for a category
    Active { category: Category },
    /// Delete a goal by id
    Delete { id: u32 },
}

#[derive(Subcommand)]
enum ProgressCommands {
    /// Record a progress entry
    Log {
        category: Category,
        value: f64,
        unit: String,
    },
    /// List progress entries, optionally for one category
    List {
        #[arg(short, long)]
        category: Option<Category>,
    },
}

/// Logs go to stderr; stdout carries command output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "fittrack=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = match cli.data_dir {
        Some(dir) => Config::new(dir),
        None => Config::from_env()?,
    };
    tracing::debug!("Using data directory {}", config.data_dir().display());

    match cli.command {
        Commands::Goal { command } => {
            let goals = GoalService::new(GoalStore::goals(&config)?);
            goals.load_goals().await;

            match command {
                GoalCommands::Set {
                    category,
                    value,
                    unit,
                } => {
                    let goal = Goal::from_measurement(Measurement::parse(category, value, &unit)?)?;
                    print_json(&goals.save_goal(goal).await?)?;
                }
                GoalCommands::List => print_json(&goals.all_goals().await)?,
                GoalCommands::Active { category } => match goals.active_goal(category).await {
                    Some(goal) => print_json(&goal)?,
                    None => println!("No active {} goal", category),
                },
                GoalCommands::Delete { id } => {
                    if goals.delete_goal(id).await? {
                        println!("Deleted goal {}", id);
                    } else {
                        anyhow::bail!("Goal {} not found", id);
                    }
                }
            }
        }
        Commands::Progress { command } => {
            let progress = ProgressService::new(ProgressStore::progress(&config)?);
            progress.load_progress().await;

            match command {
                ProgressCommands::Log {
                    category,
                    value,
                    unit,
                } => {
                    let entry =
                        ProgressEntry::from_measurement(Measurement::parse(category, value, &unit)?)?;
                    print_json(&progress.save_progress(entry).await?)?;
                }
                ProgressCommands::List { category } => {
                    let entries = match category {
                        Some(category) => progress.progress_by_category(category).await,
                        None => progress.all_progress().await,
                    };
                    print_json(&entries)?;
                }
            }
        }
        Commands::Convert {
            category,
            value,
            from,
            to,
        } => {
            let converted = Measurement::parse(category, value, &from)?.convert_to(&to)?;
            println!("{} {}", converted.value(), converted.unit_name());
        }
    }

    Ok(())
}
