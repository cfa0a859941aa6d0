#![forbid(unsafe_code)]

mod client;

use clap::{Parser, Subcommand, ValueEnum};
use client::{History, ServerClient, SubmitOutcome, Submission};
use std::path::PathBuf;
use vitalize_core::{compute, BmiRecord, Config, Error, FallbackCache, Gender, Result};

/// File name of the local fallback cache, one JSON array of records
const CACHE_FILE: &str = "bmi_records.json";

#[derive(Parser)]
#[command(name = "vitalize")]
#[command(about = "BMI calculator with record history", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the server URL from the config file
    #[arg(long, global = true)]
    server_url: Option<String>,

    /// Override the data directory holding local history
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute BMI for a measurement and record it
    Calc {
        /// Display name; an empty value becomes "User"
        #[arg(long, default_value = "")]
        name: String,

        /// Age in years, 1 to 120
        #[arg(long, default_value_t = 25)]
        age: u32,

        #[arg(long, value_enum, default_value = "other")]
        gender: GenderArg,

        /// Height in centimeters, 50 to 250
        #[arg(long)]
        height: f64,

        /// Weight in kilograms, 10 to 300
        #[arg(long)]
        weight: f64,

        /// Compute and display only, without recording anywhere
        #[arg(long)]
        offline: bool,
    },

    /// Show recent records from the server or local history
    History,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GenderArg {
    Male,
    Female,
    Other,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
            GenderArg::Other => Gender::Other,
        }
    }
}

fn main() -> Result<()> {
    vitalize_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config = Config::load()?;
    let server_url = cli
        .server_url
        .unwrap_or_else(|| config.client.server_url.clone());
    let data_dir = cli.data_dir.unwrap_or_else(|| config.client.data_dir.clone());

    let client = ServerClient::new(server_url, config.client.timeout_ms);
    let cache = FallbackCache::new(data_dir.join(CACHE_FILE));

    match cli.command {
        Commands::Calc {
            name,
            age,
            gender,
            height,
            weight,
            offline,
        } => cmd_calc(&client, &cache, name, age, gender.into(), height, weight, offline),
        Commands::History => cmd_history(&client, &cache),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_calc(
    client: &ServerClient,
    cache: &FallbackCache,
    name: String,
    age: u32,
    gender: Gender,
    height: f64,
    weight: f64,
    offline: bool,
) -> Result<()> {
    validate_domains(age, height, weight)?;

    let name = match name.trim() {
        "" => "User".to_string(),
        trimmed => trimmed.to_string(),
    };

    // Display never depends on the server; the engine runs locally.
    let result = compute(height, weight)?;

    println!("Analysis for {name}");
    println!();
    println!("  BMI:          {:.2}", result.value);
    println!("  Category:     {} ({})", result.category, result.accent);
    println!(
        "  Ideal weight: {:.1} - {:.1} kg",
        result.ideal_range.min, result.ideal_range.max
    );
    println!("  Tip: {}", result.tip);
    println!();

    if offline {
        println!("[Offline - record not saved]");
        return Ok(());
    }

    let submission = Submission {
        name,
        age,
        gender,
        height,
        weight,
        bmi: result.value,
        category: result.category,
    };

    match client::submit_or_cache(client, cache, submission)? {
        SubmitOutcome::Server { id } => {
            println!("Saved to server (id {id})");
        }
        SubmitOutcome::LocalFallback { cached } => {
            println!("Server unavailable - saved to local history ({cached} recorded)");
        }
    }

    Ok(())
}

fn cmd_history(client: &ServerClient, cache: &FallbackCache) -> Result<()> {
    let (records, from_server) = match client::fetch_history(client, cache)? {
        History::Server(records) => (records, true),
        History::Local(records) => (records, false),
    };

    // Degraded-mode indicator only; a dead server is never a hard failure.
    if !from_server {
        println!("Server unavailable - showing local history.");
    }

    if records.is_empty() {
        println!("No records yet.");
        return Ok(());
    }

    let source = if from_server { "the server" } else { "local history" };
    println!("Showing {} record(s) from {source}:", records.len());
    println!();
    for record in &records {
        print_record(record);
    }

    Ok(())
}

fn print_record(record: &BmiRecord) {
    let age = record
        .age
        .map(|a| a.to_string())
        .unwrap_or_else(|| "-".into());
    println!(
        "  {}  {:<20} age {:>3}  {:>6.2} {}  ({})",
        record.created_at.format("%Y-%m-%d %H:%M:%S"),
        record.name,
        age,
        record.bmi,
        record.category,
        record.id
    );
}

/// Input-boundary domain checks; the core engine only guards positivity
fn validate_domains(age: u32, height: f64, weight: f64) -> Result<()> {
    if !(1..=120).contains(&age) {
        return Err(Error::Validation(format!(
            "age must be within [1, 120], got {age}"
        )));
    }
    if !(50.0..=250.0).contains(&height) {
        return Err(Error::Validation(format!(
            "height must be within [50, 250] cm, got {height}"
        )));
    }
    if !(10.0..=300.0).contains(&weight) {
        return Err(Error::Validation(format!(
            "weight must be within [10, 300] kg, got {weight}"
        )));
    }
    Ok(())
}
