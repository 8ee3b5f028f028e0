#![forbid(unsafe_code)]
//! Build, tamper with and verify hash-linked ledgers from the command line.

use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color as TableColor, ContentArrangement, Table};
use hashledger::clock::SteppingClock;
use hashledger::config::{load_config, load_config_from, Config};
use hashledger::summary::{chain_diagram, dump_with, render_record, RecordSummary};
use hashledger::{Ledger, Verification};
use serde::Serialize;
use std::path::PathBuf;

const DEMO_TRANSFERS: [&str; 3] = [
    "Alice pays Bob 10",
    "Bob pays Carol 5",
    "Carol pays Alice 3",
];
const DEMO_FORGED: &str = "Alice pays Bob 1000";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a hashledger.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walks through building, verifying and tampering with a small ledger
    Demo,
    /// Builds a ledger from the given payloads and verifies it
    Build {
        /// Payloads to append after the genesis record, in order
        payloads: Vec<String>,
        /// Index of a record whose payload is overwritten before verifying
        #[arg(long, requires = "with")]
        tamper: Option<usize>,
        /// Replacement payload for the tampered record
        #[arg(long, requires = "tamper")]
        with: Option<String>,
        /// Print the dump and verification as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct BuildReport {
    records: Vec<RecordSummary>,
    verification: Verification,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    match cli.command {
        Commands::Demo => demo(&config)?,
        Commands::Build {
            payloads,
            tamper,
            with,
            json,
        } => build(&config, &payloads, tamper.zip(with), json)?,
    }

    Ok(())
}

fn stepping_ledger(config: &Config) -> Ledger {
    // One second per record keeps successive timestamps distinct.
    let clock = SteppingClock::new(Utc::now(), Duration::seconds(1));
    Ledger::with_clock(Box::new(clock), config.ledger.genesis_payload.as_str())
}

fn demo(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let preview = config.display.hash_preview_len;

    println!("{}", "=== Creating the ledger ===".bright_cyan().bold());
    let mut ledger = stepping_ledger(config);
    println!("{}", render_record(ledger.tail()?, preview));

    for payload in DEMO_TRANSFERS {
        println!("\n{} {}", "Appending:".bright_green(), payload);
        let record = ledger.append(payload)?;
        println!("{}", render_record(record, preview));
    }

    println!("\n{}", "=== Verifying the ledger ===".bright_cyan().bold());
    print_verification(&ledger.verify());

    println!("\n{}", "=== Tampering with record #1 ===".bright_cyan().bold());
    println!(
        "{}",
        format!("Rewriting '{}' as '{}'...", DEMO_TRANSFERS[0], DEMO_FORGED).yellow()
    );
    ledger.tamper(1)?.payload = DEMO_FORGED.as_bytes().to_vec();
    print_verification(&ledger.verify());

    println!("\n{}", "=== Full ledger ===".bright_cyan().bold());
    println!("{}", records_table(&dump_with(&ledger, preview)));

    println!("\n{}", "=== Chain structure ===".bright_cyan().bold());
    println!("{}", chain_diagram(&ledger, config.display.diagram_hash_len));

    println!("\n{}", "Key points:".bright_green().underline());
    println!("  1. Every record carries the hash of the record before it.");
    println!("  2. Changing any field of a record changes its hash.");
    println!("  3. A changed hash no longer matches what the next record points to.");

    Ok(())
}

fn build(
    config: &Config,
    payloads: &[String],
    tamper: Option<(usize, String)>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = stepping_ledger(config);
    for payload in payloads {
        ledger.append(payload.as_str())?;
    }

    if let Some((index, replacement)) = tamper {
        ledger.tamper(index)?.payload = replacement.into_bytes();
    }

    let records = dump_with(&ledger, config.display.hash_preview_len);
    let verification = ledger.verify();

    if json {
        let report = BuildReport {
            records,
            verification,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", records_table(&records));
        println!("{}", chain_diagram(&ledger, config.display.diagram_hash_len));
        print_verification(&verification);
    }

    Ok(())
}

fn records_table(records: &[RecordSummary]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Created").add_attribute(Attribute::Bold),
            Cell::new("Payload").add_attribute(Attribute::Bold),
            Cell::new("Hash").add_attribute(Attribute::Bold),
            Cell::new("Previous Hash").add_attribute(Attribute::Bold),
        ]);

    for summary in records {
        let position = if summary.genesis {
            Cell::new(format!("{} (genesis)", summary.position)).fg(TableColor::Magenta)
        } else {
            Cell::new(summary.position)
        };
        table.add_row(vec![
            position,
            Cell::new(&summary.created_at),
            Cell::new(&summary.payload),
            Cell::new(&summary.hash).fg(TableColor::Cyan),
            Cell::new(&summary.previous_hash),
        ]);
    }

    table
}

fn print_verification(verification: &Verification) {
    match &verification.failure {
        None => println!("{}", "✅ Ledger intact: every record verifies.".green().bold()),
        Some(failure) => {
            println!(
                "{}",
                format!(
                    "❌ {} detected at record #{}",
                    failure.kind, failure.index
                )
                .red()
                .bold()
            );
            println!("   expected: {}", failure.expected);
            println!("   actual:   {}", failure.actual);
        }
    }
}
