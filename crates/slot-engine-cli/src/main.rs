//! `slots` CLI — compute open appointment slots for a provider snapshot.
//!
//! ## Usage
//!
//! ```sh
//! # Next open slot label (stdin → stdout)
//! cat provider.json | slots next --now 2026-03-16T08:00:00+01:00
//!
//! # Same, as a JSON slot object (or null)
//! slots next -i provider.json --json
//!
//! # Quick-pick morning/evening slots for the next 5 days, 90-minute service
//! slots quick -i provider.json --duration 90 --days 5
//!
//! # Override engine defaults from a JSON file
//! slots quick -i provider.json --config engine.json
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use slot_engine::availability::{next_available_with_config, quick_slots_with_config};
use slot_engine::{EngineConfig, ProviderSnapshot};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Printed by `slots next` when nothing is free within the horizon.
const NO_SLOT: &str = "Нет свободных слотов";

#[derive(Parser)]
#[command(name = "slots", version, about = "Appointment slot finder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CommonArgs {
    /// Provider snapshot JSON (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Current instant as RFC 3339 (defaults to the system clock)
    #[arg(long)]
    now: Option<String>,
    /// IANA timezone the provider works in
    #[arg(long, default_value = "Europe/Berlin")]
    tz: String,
    /// Service duration in minutes (default 60, clamped to 15-240)
    #[arg(short, long, allow_negative_numbers = true)]
    duration: Option<i64>,
    /// JSON file overriding engine defaults
    #[arg(long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the next open slot within the search horizon
    Next {
        #[command(flatten)]
        common: CommonArgs,
        /// Print the slot as JSON instead of its label
        #[arg(long)]
        json: bool,
    },
    /// List morning and evening quick-pick slots
    Quick {
        #[command(flatten)]
        common: CommonArgs,
        /// Number of days to scan (default 7)
        #[arg(long)]
        days: Option<u32>,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Next { common, json } => {
            let ctx = Invocation::load(&common)?;
            let slot = ctx.schedule_and_bookings().and_then(|(schedule, bookings)| {
                next_available_with_config(
                    &schedule,
                    &bookings,
                    common.duration,
                    ctx.now,
                    &ctx.config,
                )
            });
            debug!(found = slot.is_some(), "next slot computed");

            if json {
                println!("{}", serde_json::to_string_pretty(&slot)?);
            } else {
                match slot {
                    Some(slot) => println!("{}", slot.label),
                    None => println!("{}", NO_SLOT),
                }
            }
        }
        Commands::Quick { common, days } => {
            let ctx = Invocation::load(&common)?;
            let schedule = ctx.snapshot.schedule();
            let bookings = ctx.snapshot.active_bookings();
            let quick = quick_slots_with_config(
                schedule.as_ref(),
                &bookings,
                common.duration,
                ctx.now,
                days,
                &ctx.config,
            );
            println!("{}", serde_json::to_string_pretty(&quick)?);
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Everything one invocation needs, resolved from the command line.
struct Invocation {
    snapshot: ProviderSnapshot,
    now: DateTime<Tz>,
    config: EngineConfig,
}

impl Invocation {
    fn load(args: &CommonArgs) -> Result<Self> {
        let tz = slot_engine::clock::parse_timezone(&args.tz)?;
        let now = parse_now(args.now.as_deref(), tz)?;
        let config = match args.config.as_deref() {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("Invalid engine config: {}", path))?
            }
            None => EngineConfig::default(),
        };
        let raw = read_input(args.input.as_deref())?;
        let snapshot =
            ProviderSnapshot::from_json(&raw).context("Failed to parse provider snapshot")?;

        Ok(Self {
            snapshot,
            now,
            config,
        })
    }

    fn schedule_and_bookings(
        &self,
    ) -> Option<(slot_engine::WorkingSchedule, Vec<slot_engine::Booking>)> {
        let schedule = self.snapshot.schedule()?;
        Some((schedule, self.snapshot.active_bookings()))
    }
}

fn parse_now(now: Option<&str>, tz: Tz) -> Result<DateTime<Tz>> {
    match now {
        Some(raw) => {
            let instant = DateTime::parse_from_rfc3339(raw)
                .with_context(|| format!("Invalid --now '{}': expected RFC 3339", raw))?;
            Ok(instant.with_timezone(&tz))
        }
        None => Ok(Utc::now().with_timezone(&tz)),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
