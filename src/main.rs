mod commands;
mod render;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use slotbook_core::Schedule;
use slotbook_core::config::SlotbookConfig;
use slotbook_core::store::FileStore;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slotbook")]
#[command(about = "Book 15-minute appointment slots between 07:00 and 18:00")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the appointments of one day
    Day {
        /// Day as YYYY/MM/DD (defaults to today)
        path: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show how many appointments each day of a month has
    Month {
        /// Month as YYYY/MM (defaults to this month)
        path: Option<String>,
    },
    /// Book a new appointment
    New {
        name: String,

        /// Day as YYYY/MM/DD, or YYYY/MM for the first bookable day of a month
        #[arg(short, long)]
        day: Option<String>,

        /// Start time (e.g. "09:30") or slot number
        #[arg(short, long)]
        start: String,

        /// End time (e.g. "10:15") or slot number
        #[arg(short, long)]
        end: String,

        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        note: Option<String>,

        /// Contact email
        #[arg(long)]
        email: Option<String>,

        /// Contact phone
        #[arg(long)]
        phone: Option<String>,
    },
    /// Move an appointment to another day or time
    Move {
        id: String,

        /// Current day (YYYY/MM/DD)
        #[arg(short, long)]
        day: String,

        /// New day (YYYY/MM/DD), defaults to the current one
        #[arg(long)]
        to: Option<String>,

        /// New start time or slot. Given alone, the appointment keeps its length
        #[arg(short, long)]
        start: Option<String>,

        /// New end time or slot. Given alone, the start stays where it is
        #[arg(short, long)]
        end: Option<String>,
    },
    /// Delete an appointment
    Delete {
        id: String,

        /// Day of the appointment (YYYY/MM/DD)
        #[arg(short, long)]
        day: String,
    },
    /// List the bookable slots of a day
    Slots,
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("slotbook=warn,slotbook_core=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    if let Commands::Slots = cli.command {
        commands::slots::run();
        return Ok(());
    }

    let config = SlotbookConfig::load().context("Failed to load configuration")?;
    let store = FileStore::new(config.store_path());
    tracing::debug!(path = %store.path().display(), "using store");
    let mut schedule = Schedule::new(store, config.reconcile);
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Day { path, json } => {
            commands::day::run(&mut schedule, path.as_deref(), today, json).await
        }
        Commands::Month { path } => {
            commands::month::run(&mut schedule, path.as_deref(), today).await
        }
        Commands::New {
            name,
            day,
            start,
            end,
            color,
            note,
            email,
            phone,
        } => {
            let args = commands::new::NewArgs {
                name,
                day,
                start,
                end,
                color,
                note,
                email,
                phone,
            };
            commands::new::run(&mut schedule, &config, args, today).await
        }
        Commands::Move {
            id,
            day,
            to,
            start,
            end,
        } => {
            commands::move_event::run(
                &mut schedule,
                &id,
                &day,
                to.as_deref(),
                start.as_deref(),
                end.as_deref(),
            )
            .await
        }
        Commands::Delete { id, day } => commands::delete::run(&mut schedule, &id, &day).await,
        Commands::Slots => Ok(()),
    }
}
