use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hiveops",
    version,
    about = "Beekeeping hive and product advisor"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run interactive setup
    Init,
    /// Validate config and database, then show the rule catalogs
    Check,
    /// List the hive and product rules
    Rules,
    /// Hive inspections and advice
    #[command(subcommand)]
    Hive(HiveCommand),
    /// Hive products and marketing advice
    #[command(subcommand)]
    Product(ProductCommand),
    /// List stored recommendations, newest first
    Recommendations,
    /// Production report for a year or a single month
    Report {
        #[arg(long)]
        year: i32,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
}

#[derive(Subcommand)]
pub enum HiveCommand {
    /// Print advice for a hive snapshot without storing it
    Advise {
        /// JSON or YAML hive snapshot
        file: PathBuf,
        /// Evaluate as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Run a single rule by id (see `hiveops rules`)
        #[arg(long)]
        rule: Option<String>,
    },
    /// Store a hive and its recommendation
    Add {
        file: PathBuf,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List stored hives
    List,
    /// Show one stored hive
    Show { id: String },
    /// Replace a stored hive's snapshot
    Update { id: String, file: PathBuf },
    /// Delete a stored hive
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// Print marketing advice for a product without storing it
    Advise {
        /// JSON or YAML product snapshot
        file: PathBuf,
        /// Run a single rule by id (see `hiveops rules`)
        #[arg(long)]
        rule: Option<String>,
    },
    /// Store a product and its recommendation
    Add { file: PathBuf },
    /// List stored products
    List,
    /// Show one stored product
    Show { id: i64 },
    /// Replace a stored product's snapshot
    Update { id: i64, file: PathBuf },
    /// Delete a stored product
    Delete { id: i64 },
}
