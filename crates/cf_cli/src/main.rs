//! Counterfactual football CLI
//!
//! Freeform parsing and play/drive simulation over JSON specs.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

#[derive(Parser)]
#[command(name = "cf")]
#[command(about = "Simulate football play and drive counterfactuals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a freeform play description into a structured spec
    Parse {
        /// Play description, e.g. "3rd & 7 Q4 2:00 at KC 35, deep pass"
        #[arg(long)]
        text: String,

        /// Offense team code
        #[arg(long)]
        offense: String,

        /// Defense team code
        #[arg(long)]
        defense: String,
    },

    /// Simulate one play call N times and report the outcome distribution
    Play {
        /// PlaySpec JSON file path, or `-` for stdin
        #[arg(long)]
        spec: PathBuf,

        /// Trial count (100-5000)
        #[arg(long, default_value = "1000")]
        n: usize,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Simulate full drives from the given state
    Drive {
        /// PlaySpec JSON file path, or `-` for stdin
        #[arg(long)]
        spec: PathBuf,

        /// Drive count (1-20)
        #[arg(long, default_value = "1")]
        n: usize,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn read_spec(path: &PathBuf) -> Result<serde_json::Value> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading spec from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading spec file {}", path.display()))?
    };
    serde_json::from_str(&raw).context("spec file is not valid JSON")
}

fn print_pretty(response_json: &str) -> Result<()> {
    let value: serde_json::Value = serde_json::from_str(response_json)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            text,
            offense,
            defense,
        } => {
            let request = json!({ "text": text, "offense": offense, "defense": defense });
            let response = cf_core::parse_freeform_json(&request.to_string())?;
            print_pretty(&response)?;
        }
        Commands::Play { spec, n, seed } => {
            let spec = read_spec(&spec)?;
            let request = json!({ "spec": spec, "n": n, "seed": seed });
            let response = cf_core::simulate_play_json(&request.to_string())?;
            print_pretty(&response)?;
        }
        Commands::Drive { spec, n, seed } => {
            let spec = read_spec(&spec)?;
            let request = json!({ "spec": spec, "n": n, "seed": seed });
            let response = cf_core::simulate_drive_json(&request.to_string())?;
            print_pretty(&response)?;
        }
    }

    Ok(())
}
