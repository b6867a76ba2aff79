mod cli;
mod config;
mod db;
mod error;
mod logic;
mod models;

use chrono::{Local, NaiveDate};
use clap::Parser;
use cli::{Cli, Commands, HiveCommand, ProductCommand};
use config::Config;
use db::Database;
use error::{HiveOpsError, Result};
use logic::report::{render_report, ReportPeriod};
use logic::{generate_hive_recommendation, generate_product_recommendation, RulesEngine};
use models::{Advisory, AdvisoryLine, HiveSnapshot, ProductSnapshot, Recommendation, SubjectKind};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => {
            let (config, path) = Config::setup_interactive(cli.config)?;
            println!(
                "Welcome, {}! Config written to {}",
                config.beekeeper.display_name(),
                path.display()
            );
            Ok(())
        }
        Commands::Check => {
            let config = Config::load(cli.config)?;
            println!("Config OK: beekeeper {}", config.beekeeper.username);
            let db = open_database(cli.data_dir.as_ref())?;
            println!("Database OK: {}", db.path().display());
            println!();
            print_rules();
            Ok(())
        }
        Commands::Rules => {
            print_rules();
            Ok(())
        }
        Commands::Hive(cmd) => run_hive(cmd, cli.config, cli.data_dir.as_ref()),
        Commands::Product(cmd) => run_product(cmd, cli.config, cli.data_dir.as_ref()),
        Commands::Recommendations => {
            let (config, db) = open_workspace(cli.config, cli.data_dir.as_ref())?;
            let recs = db.list_recommendations(&config.beekeeper.username)?;
            if recs.is_empty() {
                println!("No recommendations yet.");
            }
            for rec in recs {
                println!(
                    "[{}] {} {}",
                    rec.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    rec.subject_kind,
                    rec.subject_id
                );
                println!("{}", rec.recommendations);
                println!();
            }
            Ok(())
        }
        Commands::Report { year, month } => {
            let (config, db) = open_workspace(cli.config, cli.data_dir.as_ref())?;
            let period = ReportPeriod::new(year, month)?;
            let products =
                db.products_harvested_between(&config.beekeeper.username, period.start, period.end)?;
            tracing::debug!(count = products.len(), title = %period.title, "Building report");
            println!("{}", render_report(&period, &products));
            Ok(())
        }
    }
}

fn run_hive(cmd: HiveCommand, config_path: Option<PathBuf>, data_dir: Option<&PathBuf>) -> Result<()> {
    match cmd {
        HiveCommand::Advise { file, date, rule } => {
            let snapshot: HiveSnapshot = read_input(&file)?;
            let today = today_or(date);
            match rule {
                Some(rule_id) => {
                    let lines = single_rule(&RulesEngine::hive(), &rule_id, &snapshot, today)?;
                    print_rule_lines(&rule_id, &lines);
                }
                None => println!("{}", generate_hive_recommendation(&snapshot, today)),
            }
        }
        HiveCommand::Add { file, date } => {
            let snapshot: HiveSnapshot = read_input(&file)?;
            let (config, db) = open_workspace(config_path, data_dir)?;
            let owner = &config.beekeeper.username;

            let hive = db.create_hive(owner, &snapshot)?;
            let advisory = RulesEngine::hive().evaluate(&hive.snapshot, today_or(date));
            let text = advisory.render();
            db.save_recommendation(&Recommendation::new(
                SubjectKind::Hive,
                hive.id.as_str(),
                owner.as_str(),
                text.as_str(),
            ))?;
            tracing::info!(hive = %hive.id, "Hive created");

            println!("Hive {} created.", hive.id);
            println!();
            println!("{}", text);
            print_highest_severity(&advisory);
        }
        HiveCommand::List => {
            let (config, db) = open_workspace(config_path, data_dir)?;
            let hives = db.list_hives(&config.beekeeper.username)?;
            if hives.is_empty() {
                println!("No hives recorded.");
            }
            for hive in hives {
                let s = &hive.snapshot;
                println!(
                    "{}  {:<20}  strength {:>2}  stores {:>2}  {}",
                    hive.id,
                    s.hive_name.as_deref().unwrap_or("-"),
                    s.strength(),
                    s.honey_stores(),
                    s.location
                );
            }
        }
        HiveCommand::Show { id } => {
            let (config, db) = open_workspace(config_path, data_dir)?;
            let hive = db
                .get_hive(&config.beekeeper.username, &id)?
                .ok_or_else(|| HiveOpsError::NotFound(format!("Hive {}", id)))?;
            println!("{}", serde_json::to_string_pretty(&hive)?);
        }
        HiveCommand::Update { id, file } => {
            let snapshot: HiveSnapshot = read_input(&file)?;
            let (config, db) = open_workspace(config_path, data_dir)?;
            let hive = db.update_hive(&config.beekeeper.username, &id, &snapshot)?;
            println!("Hive {} updated.", hive.id);
        }
        HiveCommand::Delete { id } => {
            let (config, db) = open_workspace(config_path, data_dir)?;
            db.delete_hive(&config.beekeeper.username, &id)?;
            println!("Hive {} deleted.", id);
        }
    }
    Ok(())
}

fn run_product(
    cmd: ProductCommand,
    config_path: Option<PathBuf>,
    data_dir: Option<&PathBuf>,
) -> Result<()> {
    match cmd {
        ProductCommand::Advise { file, rule } => {
            let snapshot: ProductSnapshot = read_input(&file)?;
            let today = Local::now().date_naive();
            match rule {
                Some(rule_id) => {
                    let lines = single_rule(&RulesEngine::product(), &rule_id, &snapshot, today)?;
                    print_rule_lines(&rule_id, &lines);
                }
                None => println!("{}", generate_product_recommendation(&snapshot, today)),
            }
        }
        ProductCommand::Add { file } => {
            let snapshot: ProductSnapshot = read_input(&file)?;
            require_product_name(&snapshot)?;
            let today = Local::now().date_naive();
            let snapshot = snapshot.with_creation_defaults(today);

            let (config, db) = open_workspace(config_path, data_dir)?;
            let owner = &config.beekeeper.username;

            let product = db.create_product(owner, &snapshot)?;
            let advisory = RulesEngine::product().evaluate(&product.snapshot, today);
            let text = advisory.render();
            db.save_recommendation(&Recommendation::new(
                SubjectKind::Product,
                product.id.to_string(),
                owner.as_str(),
                text.as_str(),
            ))?;
            tracing::info!(product = product.id, "Product created");

            println!("Product {} created.", product.id);
            println!();
            println!("{}", text);
            print_highest_severity(&advisory);
        }
        ProductCommand::List => {
            let (config, db) = open_workspace(config_path, data_dir)?;
            let products = db.list_products(&config.beekeeper.username)?;
            if products.is_empty() {
                println!("No products recorded.");
            }
            for product in products {
                let s = &product.snapshot;
                println!(
                    "{:>4}  {:<24}  {:<12}  {} {}  {}",
                    product.id,
                    s.product_name,
                    s.product_type.map(|t| t.as_str()).unwrap_or("-"),
                    s.quantity(),
                    s.unit(),
                    s.harvest_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".into())
                );
            }
        }
        ProductCommand::Show { id } => {
            let (config, db) = open_workspace(config_path, data_dir)?;
            let product = db
                .get_product(&config.beekeeper.username, id)?
                .ok_or_else(|| HiveOpsError::NotFound(format!("Product {}", id)))?;
            println!("{}", serde_json::to_string_pretty(&product)?);
        }
        ProductCommand::Update { id, file } => {
            let snapshot: ProductSnapshot = read_input(&file)?;
            require_product_name(&snapshot)?;
            let (config, db) = open_workspace(config_path, data_dir)?;
            let product = db.update_product(&config.beekeeper.username, id, &snapshot)?;
            println!("Product {} updated.", product.id);
        }
        ProductCommand::Delete { id } => {
            let (config, db) = open_workspace(config_path, data_dir)?;
            db.delete_product(&config.beekeeper.username, id)?;
            println!("Product {} deleted.", id);
        }
    }
    Ok(())
}

fn print_rules() {
    println!("Hive rules:");
    for (id, name) in RulesEngine::hive().list_rules() {
        println!("  {:<20} {}", id, name);
    }
    println!();
    println!("Product rules:");
    for (id, name) in RulesEngine::product().list_rules() {
        println!("  {:<20} {}", id, name);
    }
}

/// Lines from one rule of `engine`; unknown rule ids are an error.
fn single_rule<S>(
    engine: &RulesEngine<S>,
    rule_id: &str,
    subject: &S,
    today: NaiveDate,
) -> Result<Vec<AdvisoryLine>> {
    if !engine.list_rules().iter().any(|(id, _)| *id == rule_id) {
        return Err(HiveOpsError::NotFound(format!(
            "Rule {} (run `hiveops rules` for the catalog)",
            rule_id
        )));
    }
    Ok(engine.evaluate_rule(rule_id, subject, today))
}

fn print_rule_lines(rule_id: &str, lines: &[AdvisoryLine]) {
    if lines.is_empty() {
        println!("Rule {} did not fire.", rule_id);
    }
    for line in lines {
        println!("[{}] {}: {}", line.severity, line.category, line.text);
    }
}

fn print_highest_severity(advisory: &Advisory) {
    if let Some(severity) = advisory.highest_severity() {
        println!();
        println!("Highest severity: {}", severity);
    }
}

fn require_product_name(snapshot: &ProductSnapshot) -> Result<()> {
    if snapshot.product_name.trim().is_empty() {
        return Err(HiveOpsError::InvalidData("productName is required".into()));
    }
    Ok(())
}

fn today_or(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

fn open_database(data_dir: Option<&PathBuf>) -> Result<Database> {
    let db_path = Config::db_path(data_dir)?;
    Database::open(&db_path)
}

fn open_workspace(config_path: Option<PathBuf>, data_dir: Option<&PathBuf>) -> Result<(Config, Database)> {
    let config = Config::load(config_path)?;
    let db = open_database(data_dir)?;
    Ok((config, db))
}

/// Read a snapshot from a JSON file, or YAML when the extension says so.
fn read_input<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        HiveOpsError::InvalidData(format!("Cannot read {}: {}", path.display(), e))
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    if is_yaml {
        Ok(serde_yaml::from_str(&content)?)
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}
