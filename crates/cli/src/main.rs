// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod output;

use accessmap_api::Repository;
use accessmap_persistence::{EventGateway, JsonFileGateway, MemoryGateway};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Access Map - edit the gates, venues, zones and checkpoints of an event
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding one `<event-id>.json` per event. If not provided,
    /// uses an in-memory backend that is discarded on exit.
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// The event to edit
    #[arg(short, long, default_value = "EVENT_050")]
    event_id: String,

    #[command(subcommand)]
    command: Action,
}

/// What to do with the event's topology.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Action {
    /// Print the stored topology document
    Show,
    /// Print counts and capacity totals
    Summary,
    /// Print entities grouped by kind
    Classify,
    /// Print checkpoints of one entity, or of every entity
    Checkpoints {
        /// Limit to this entity
        #[arg(long)]
        entity: Option<String>,
    },
    /// Print subzones grouped by parent
    Subzones,
    /// Print subzones whose parent was deleted
    Orphans,
    /// Create a gate with its entry checkpoint
    CreateGate {
        /// Gate name
        name: String,
        /// IMEI of the entry scanner
        #[arg(long)]
        imei: Option<String>,
        /// Operator role of the entry scanner
        #[arg(long)]
        role: Option<String>,
    },
    /// Create a top-level zone
    CreateZone {
        /// Zone name
        name: String,
        #[command(flatten)]
        area: AreaArgs,
    },
    /// Create a top-level venue
    CreateVenue {
        /// Venue name
        name: String,
        #[command(flatten)]
        area: AreaArgs,
    },
    /// Create a subzone inside a venue or zone
    CreateSubzone {
        /// Parent venue or zone id
        #[arg(long)]
        parent: String,
        /// Subzone name
        name: String,
        #[command(flatten)]
        area: AreaArgs,
    },
    /// Add a checkpoint to an entity
    AddCheckpoint {
        /// Owning entity id
        #[arg(long)]
        entity: String,
        /// Checkpoint name
        name: String,
        /// IN or OUT
        #[arg(long, default_value = "IN")]
        direction: String,
        /// Operator role (defaults to STEWARD-ZONEIN)
        #[arg(long)]
        role: Option<String>,
        /// IMEI of the scanner
        #[arg(long)]
        imei: Option<String>,
    },
    /// Change fields of an existing checkpoint
    UpdateCheckpoint {
        /// Owning entity id
        #[arg(long)]
        entity: String,
        /// Checkpoint id
        #[arg(long)]
        checkpoint: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New direction
        #[arg(long)]
        direction: Option<String>,
        /// New operator role
        #[arg(long)]
        role: Option<String>,
        /// New scanner IMEI; an empty value clears it
        #[arg(long)]
        imei: Option<String>,
    },
    /// Remove a checkpoint
    DeleteCheckpoint {
        /// Owning entity id
        #[arg(long)]
        entity: String,
        /// Checkpoint id
        #[arg(long)]
        checkpoint: String,
    },
    /// Enable or disable occupancy reports for an entity
    SetPolicy {
        /// Entity id
        #[arg(long)]
        entity: String,
        /// Whether reports are accepted
        #[arg(long, action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Flip the occupancy report policy of an entity
    TogglePolicy {
        /// Entity id
        #[arg(long)]
        entity: String,
    },
    /// Record a reported occupancy
    RecordOccupancy {
        /// Entity id
        #[arg(long)]
        entity: String,
        /// Current occupancy
        #[arg(long)]
        occupancy: u32,
    },
    /// Remove an entity; its subzones are kept
    DeleteEntity {
        /// Entity id
        #[arg(long)]
        entity: String,
    },
}

/// Capacity and access settings shared by zones, venues and subzones.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
struct AreaArgs {
    /// Maximum occupancy
    #[arg(short, long, default_value_t = 0)]
    capacity: u32,
    /// Admitted access types (GENERAL, BACKSTAGE, STAGE, COMPROMIS, VIP)
    #[arg(short, long, value_delimiter = ',')]
    access: Vec<String>,
}

fn build_gateway(args: &Args) -> Arc<dyn EventGateway> {
    match &args.data_dir {
        Some(dir) => {
            let gateway: JsonFileGateway = JsonFileGateway::new(dir.clone());
            info!("Using event documents in {}", gateway.root().display());
            Arc::new(gateway)
        }
        None => {
            info!("Using in-memory backend");
            Arc::new(MemoryGateway::new())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let gateway: Arc<dyn EventGateway> = build_gateway(&args);
    let mut repository: Repository = Repository::open(&args.event_id, gateway).await;
    if repository.show_seed_banner() {
        eprintln!("{}", output::seed_banner(&args.event_id));
        repository.dismiss_seed_banner();
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> =
        commands::execute(&mut repository, &args.command).await;
    let command_error: Option<String> = result.as_ref().err().map(ToString::to_string);
    for notification in output::notices(repository.take_notifications(), command_error.as_deref())
    {
        eprintln!("{notification}");
    }
    println!("{}", serde_json::to_string_pretty(&result?)?);

    Ok(())
}

#[cfg(test)]
mod tests;
