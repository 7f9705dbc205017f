use anyhow::{bail, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use sweep::commands;
use sweep::config::Config;
use sweep::db::Store;

#[derive(Parser)]
#[command(name = "sweep")]
#[command(about = "A CLI for coordinating GitHub issue cleanup campaigns")]
#[command(version)]
struct Cli {
    /// Repository owner
    #[arg(long, default_value = "syl20bnr")]
    owner: String,

    /// Repository name
    #[arg(long, default_value = "spacemacs")]
    repo: String,

    /// Path to the tracking database
    #[arg(long, default_value = "sweep.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all open issues and rebuild the database (destructive)
    #[command(name = "build_db")]
    BuildDb,

    /// Dump every tracking record
    #[command(name = "print_db")]
    PrintDb,

    /// Free claims older than the campaign deadline
    #[command(name = "trigger_db")]
    TriggerDb,

    /// List tracked issues
    List {
        /// Only issues assigned to this user
        #[arg(short, long)]
        user: Option<String>,
        /// Only issues carrying one of these labels
        #[arg(short, long, num_args = 1..)]
        labels: Vec<String>,
    },

    /// Draw random unassigned issues for a volunteer
    Random {
        /// Name of the volunteer
        #[arg(short, long)]
        user: Option<String>,
        /// Only issues carrying one of these labels
        #[arg(short, long, num_args = 1..)]
        labels: Vec<String>,
        /// How many issues to draw
        #[arg(short, long, default_value_t = 5)]
        number: usize,
    },

    /// Assign issues to a volunteer
    Assign {
        /// Name of the volunteer
        #[arg(short, long)]
        user: Option<String>,
        /// Issue numbers to assign
        #[arg(short, long, num_args = 1..)]
        issues: Vec<i64>,
    },

    /// Record verification reports from a volunteer
    Report {
        /// Name of the volunteer
        #[arg(short, long)]
        user: Option<String>,
        /// Issue numbers being reported
        #[arg(short, long, num_args = 1..)]
        issues: Vec<i64>,
    },

    /// Print campaign progress statistics
    Stats,
}

fn require_user(user: Option<String>) -> Result<String> {
    match user {
        Some(user) => Ok(user),
        None => bail!("Please provide a user with '-u'."),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::new(cli.owner, cli.repo, cli.db);
    let today = Local::now().date_naive();
    let program = env::args().next().unwrap_or_else(|| "sweep".to_string());

    let mut store = Store::open(&config.db_path)?;

    match cli.command {
        Commands::BuildDb => commands::build::run(&mut store, &config),

        Commands::PrintDb => commands::print::run(&store),

        Commands::TriggerDb => commands::trigger::run(&store, config.stale_after_days, today),

        Commands::List { user, labels } => {
            commands::list::run(&store, user.as_deref(), &labels)
        }

        Commands::Random {
            user,
            labels,
            number,
        } => {
            let user = require_user(user)?;
            if number == 0 {
                bail!("Please provide a positive number with '-n'.");
            }
            commands::random::run(&store, &config, &program, &user, &labels, number)
        }

        Commands::Assign { user, issues } => {
            let user = require_user(user)?;
            commands::assign::run(&store, &config, &user, &issues, today)
        }

        Commands::Report { user, issues } => {
            let user = require_user(user)?;
            commands::report::run(&store, &user, &issues, today)
        }

        Commands::Stats => commands::stats::run(&store, &config),
    }
}
