//! epimap CLI
//!
//! Command-line interface over the snapshot data directory:
//! - List available dates
//! - Show grand totals for a date
//! - Rank countries by confirmed cases
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use epimap::aggregate::{hotspot, summarize};
use epimap::config::generate_default_config;
use epimap::snapshot::SnapshotStore;

#[derive(Parser)]
#[command(name = "epimap")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "COVID-19 snapshot aggregation from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Snapshot CSV directory
    #[arg(long, default_value = "./data", global = true)]
    pub data_dir: PathBuf,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available snapshot dates
    Dates,

    /// Show grand totals for a date
    Totals {
        /// Date label, e.g. 04-2020
        label: String,
    },

    /// Rank countries by confirmed cases for a date
    Top {
        /// Date label, e.g. 04-2020
        label: String,
        /// Number of countries to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let store = SnapshotStore::new(&cli.data_dir);
    let json = cli.format == "json";

    match cli.command {
        Commands::Dates => {
            let labels = store
                .labels()
                .with_context(|| format!("Failed to list {}", cli.data_dir.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&labels)?);
            } else {
                for label in labels {
                    println!("{}", label);
                }
            }
        }

        Commands::Totals { label } => {
            let snapshot = store.load(&label)?;
            let summary = summarize(&snapshot.rows);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary.totals)?);
            } else {
                println!("Snapshot:        {}", label);
                println!("Rows:            {}", snapshot.len());
                println!("Countries:       {}", summary.countries.len());
                println!(
                    "Total Confirmed: {}",
                    format_count(summary.totals.grand_confirmed)
                );
                println!(
                    "Total Deaths:    {}",
                    format_count(summary.totals.grand_deaths)
                );
                if let Some(top) = hotspot(&summary.countries) {
                    println!("Hotspot:         {}", top.country);
                }
            }
        }

        Commands::Top { label, limit } => {
            let snapshot = store.load(&label)?;
            let summary = summarize(&snapshot.rows);

            // Ranking is a presentation concern; the aggregate map is unordered
            let mut ranked: Vec<_> = summary.countries.values().collect();
            ranked.sort_by(|a, b| {
                b.total_confirmed
                    .cmp(&a.total_confirmed)
                    .then_with(|| a.country.cmp(&b.country))
            });
            ranked.truncate(limit);

            if json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                println!("{:<4} {:<30} {:>14} {:>12}", "#", "Country", "Confirmed", "Deaths");
                for (i, summary) in ranked.iter().enumerate() {
                    println!(
                        "{:<4} {:<30} {:>14} {:>12}",
                        i + 1,
                        summary.country,
                        format_count(summary.total_confirmed),
                        format_count(summary.total_deaths),
                    );
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Wrote config to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Format a count with thousands separators (1234567 -> "1,234,567")
fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }
}
