// sprinkler-console/src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

use sprinkler_console::{ConfigSession, HttpStore, Snapshot, DEFAULT_URL};

#[derive(Parser)]
#[command(name="sprinkler-console", version, about="Operator console for the sprinkler controller")]
struct Args {
    /// Configuration endpoint of the controller
    #[arg(long, env = "SPRINKLER_URL", default_value = DEFAULT_URL)]
    url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the current configuration
    Show,
    /// Turn the schedule on
    Enable,
    /// Turn the schedule off
    Disable,
    /// Set the overwrite flag: true | false
    Overwrite {
        #[arg(action = clap::ArgAction::Set)]
        on: bool,
    },
    /// Add a schedule event (times as HH:MM:SS)
    Add { from: String, to: String },
    /// Remove the schedule event at the given index
    Remove { index: usize },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let store = Arc::new(HttpStore::new(args.url)?);
    let session = ConfigSession::new(store);

    let loaded = session.load().await?;
    let snapshot = match args.command {
        Commands::Show => loaded,
        Commands::Enable => {
            session.set_enabled(true);
            session.commit().await?
        }
        Commands::Disable => {
            session.set_enabled(false);
            session.commit().await?
        }
        Commands::Overwrite { on } => {
            session.set_overwrite(on);
            session.commit().await?
        }
        Commands::Add { from, to } => {
            session.add_event(from, to);
            session.commit().await?
        }
        Commands::Remove { index } => {
            session.remove_event(index)?;
            session.commit().await?
        }
    };
    print_snapshot(&snapshot)?;
    Ok(())
}

fn print_snapshot(snapshot: &Snapshot) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&snapshot.document)?);
    println!(
        "connected: {}  dirty: {}  pending write: {}",
        snapshot.state.connected, snapshot.state.dirty, snapshot.state.pending_write
    );
    Ok(())
}
