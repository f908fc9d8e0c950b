//! Benefits Engine CLI
//!
//! Reads a claimant profile (or a batch of them) as JSON and prints the
//! Universal Credit assessment as JSON.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;

use benefits_engine::profile::{load_profile_from_reader, load_profiles_from_reader};
use benefits_engine::{LhaService, RateTables, ScenarioRunner};

#[derive(Debug, Parser)]
#[command(name = "benefits_engine", version, about = "UK Universal Credit entitlement calculator")]
struct Cli {
    /// Profile JSON file, or `-` for stdin
    input: String,

    /// JSON rate overrides keyed by tax year
    #[arg(long, value_name = "FILE")]
    rates: Option<PathBuf>,

    /// LHA rates CSV (brma,shared,one_bed,two_bed,three_bed,four_bed)
    #[arg(long, value_name = "FILE")]
    lha: Option<PathBuf>,

    /// Assessment date used for the two-child limit, defaults to today
    #[arg(long, value_name = "YYYY-MM-DD")]
    as_of: Option<NaiveDate>,

    /// Add a Child Benefit estimate and household total
    #[arg(long)]
    child_benefit: bool,

    /// Input is a JSON array of profiles, evaluated in parallel
    #[arg(long)]
    batch: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn read_input(input: &str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    if input == "-" {
        io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read profile from stdin")?;
    } else {
        File::open(input)
            .and_then(|mut f| f.read_to_end(&mut buf))
            .with_context(|| format!("failed to read profile file {}", input))?;
    }
    Ok(buf)
}

fn assessment_instant(as_of: Option<NaiveDate>) -> Result<DateTime<Utc>> {
    match as_of {
        Some(date) => Ok(date
            .and_hms_opt(12, 0, 0)
            .context("invalid --as-of date")?
            .and_utc()),
        None => Ok(Utc::now()),
    }
}

fn write_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let rates = match &cli.rates {
        Some(path) => RateTables::from_json_path(path)
            .with_context(|| format!("failed to load rates from {}", path.display()))?,
        None => RateTables::builtin(),
    };
    let lha = match &cli.lha {
        Some(path) => LhaService::from_csv_path(path)
            .with_context(|| format!("failed to load LHA rates from {}", path.display()))?,
        None => LhaService::builtin(),
    };
    log::debug!("loaded {} LHA areas", lha.area_count());

    let now = assessment_instant(cli.as_of)?;
    let runner = ScenarioRunner::with_data(rates, lha).with_child_benefit(cli.child_benefit);
    let input = read_input(&cli.input)?;

    if cli.batch {
        let profiles = load_profiles_from_reader(input.as_slice())
            .context("failed to parse profile batch")?;
        let summaries = runner.run_batch_parallel(&profiles, now);
        write_json(&summaries, cli.pretty)?;
    } else {
        let profile =
            load_profile_from_reader(input.as_slice()).context("failed to parse profile")?;
        let summary = runner.run(&profile, now);
        if cli.child_benefit {
            write_json(&summary, cli.pretty)?;
        } else {
            write_json(&summary.universal_credit, cli.pretty)?;
        }
    }

    Ok(())
}
