//! nextup - operations front-end for the marker-tag rotation engine.
//!
//! Wires the in-memory adapters to the engine so the rotation behavior can
//! be driven end to end: seed fixture events (built-in or from a JSON file),
//! run a rotation, inspect status and the activity log, or keep the daily
//! loop running in the foreground. A real deployment implements the
//! `nextup-core` ports against its own datastore instead of using this
//! binary's in-memory store.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use nextup_core::app::RotationLoop;
use nextup_core::domain::{DEFAULT_UPCOMING_LIMIT, RotationResult, RotatorConfig};
use nextup_core::engine::{Rotator, StatusView, UpcomingEvent};
use nextup_core::impls::{EventSeed, MemoryActivityLog, MemoryEventStore};
use nextup_core::ports::{Clock, DailySchedule, SystemClock, UlidIdGenerator};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "nextup: rotates a marker tag to the next upcoming event",
    long_about = None
)]
struct Cli {
    /// Marker tag slug (defaults to "next-event").
    #[arg(long, global = true)]
    tag: Option<String>,

    /// JSON file of fixture events to seed instead of the built-in sample.
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one rotation check now and print the result.
    Run,

    /// Show the current/next event, tag state, and next scheduled run.
    Status,

    /// List the soonest upcoming events.
    Upcoming {
        #[arg(long, default_value_t = DEFAULT_UPCOMING_LIMIT)]
        limit: usize,
    },

    /// Show the retained rotation outcomes, oldest first.
    Log,

    /// Clear the activity log.
    ClearLog,

    /// Run the daily rotation loop in the foreground until Ctrl-C.
    Watch,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("NEXTUP_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "nextup=debug,info"
        } else {
            "nextup=info,warn"
        })
    });

    let format = env::var("NEXTUP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());
    let registry = tracing_subscriber::registry().with(filter);
    match format.as_str() {
        "json" => registry.with(fmt::layer().json().with_ansi(false)).init(),
        _ => registry.with(fmt::layer().compact()).init(),
    }
}

/// Built-in sample calendar: one elapsed tagged event and a few upcoming
/// ones, pinned relative to the current instant so `run` demonstrates a
/// full rotation.
fn sample_seeds(now: DateTime<Utc>) -> Vec<EventSeed> {
    serde_json::from_value(serde_json::json!([
        {
            "title": "Spring Wine Tasting",
            "start": now - Duration::days(5),
            "tagged": true
        },
        { "title": "Summer Wine Dinner", "start": now + Duration::days(3) },
        { "title": "Harvest Festival", "start": now + Duration::days(10) },
        { "title": "Winter Cellar Tour", "start": now + Duration::days(24) }
    ]))
    .expect("built-in sample seeds are valid")
}

fn load_seeds(path: &PathBuf) -> anyhow::Result<Vec<EventSeed>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading seed file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing seed file {}", path.display()))
}

fn format_date(start: &Option<DateTime<Utc>>) -> String {
    match start {
        Some(start) => start.format("%Y-%m-%d").to_string(),
        None => "N/A".to_string(),
    }
}

fn print_result(result: &RotationResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    let flag = if result.success { "ok" } else { "FAILED" };
    println!("[{}] {} {}", result.action, flag, result.message);
    Ok(())
}

fn print_status(status: &StatusView, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(status)?);
        return Ok(());
    }

    let existence = if status.tag_exists {
        "exists"
    } else {
        "not created yet"
    };
    println!("Marker tag: {} ({})", status.tag_slug, existence);

    match &status.current {
        Some(current) => {
            let elapsed = if current.elapsed { ", elapsed" } else { "" };
            println!(
                "Current:    {} ({}{})",
                current.title,
                format_date(&current.start),
                elapsed
            );
        }
        None => println!("Current:    none"),
    }

    match &status.next {
        Some(next) => {
            let tagged = if next.has_tag { ", already tagged" } else { "" };
            println!(
                "Next up:    {} ({}{})",
                next.title,
                format_date(&next.start),
                tagged
            );
        }
        None => println!("Next up:    none"),
    }

    match status.next_run_at {
        Some(at) => println!("Next run:   {}", at.format("%Y-%m-%d %H:%M UTC")),
        None => println!("Next run:   not scheduled"),
    }
    Ok(())
}

fn print_upcoming(listing: &[UpcomingEvent], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(listing)?);
        return Ok(());
    }

    if listing.is_empty() {
        println!("No upcoming events.");
        return Ok(());
    }
    for event in listing {
        let tagged = if event.has_tag { "  [tagged]" } else { "" };
        println!("{}  {}{}", format_date(&event.start), event.title, tagged);
    }
    Ok(())
}

fn print_log(entries: &[RotationResult], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("Activity log is empty.");
        return Ok(());
    }
    for entry in entries {
        let flag = if entry.success { "ok" } else { "FAILED" };
        println!(
            "{}  [{}] {} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.action,
            flag,
            entry.message
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.tag {
        Some(tag) => RotatorConfig::new(tag.clone()),
        None => RotatorConfig::default(),
    };

    let clock = Arc::new(SystemClock);
    let ids = Arc::new(UlidIdGenerator::new(SystemClock));
    let store = Arc::new(MemoryEventStore::new(ids.clone()));
    let log = Arc::new(MemoryActivityLog::new());
    let schedule = Arc::new(DailySchedule::utc());

    let now = clock.now();
    let seeds = match &cli.seed {
        Some(path) => load_seeds(path)?,
        None => sample_seeds(now),
    };
    let seeded = store.seed_events(seeds, &config.tag_slug).await.len();
    info!(events = seeded, tag = %config.tag_slug, "seeded in-memory store");

    let rotator = Arc::new(
        Rotator::new(store.clone(), store.clone(), log.clone(), ids, config)
            .with_schedule(schedule.clone()),
    );

    match cli.command {
        Commands::Run => {
            let result = rotator.run_rotation(clock.now()).await?;
            print_result(&result, cli.json)?;
        }
        Commands::Status => {
            let status = rotator.status(clock.now()).await?;
            print_status(&status, cli.json)?;
        }
        Commands::Upcoming { limit } => {
            let listing = rotator.upcoming(clock.now(), limit).await?;
            print_upcoming(&listing, cli.json)?;
        }
        Commands::Log => {
            // Demonstrate against a freshly seeded store: one rotation has
            // run, so the log has something to show.
            rotator.run_rotation(clock.now()).await?;
            let entries = rotator.activity_log().await?;
            print_log(&entries, cli.json)?;
        }
        Commands::ClearLog => {
            rotator.clear_activity_log().await?;
            println!("Activity log cleared.");
        }
        Commands::Watch => {
            let status = rotator.status(clock.now()).await?;
            print_status(&status, cli.json)?;
            match status.next_run_at {
                Some(at) => println!("Rotation loop running; next fire at {at}. Ctrl-C to stop."),
                None => println!("Rotation loop running. Ctrl-C to stop."),
            }

            let handle = RotationLoop::spawn(rotator.clone(), clock.clone(), schedule);
            tokio::signal::ctrl_c()
                .await
                .context("waiting for Ctrl-C")?;
            handle.shutdown_and_join().await;

            let entries = rotator.activity_log().await?;
            print_log(&entries, cli.json)?;
        }
    }

    Ok(())
}
