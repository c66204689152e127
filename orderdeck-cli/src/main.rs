//! OrderDeck CLI — order store inspection and management.
//!
//! Commands:
//! - `list` — enumerate stored order records (key, entries, saved-at)
//! - `show` — print one stored record as a table
//! - `clear` — delete a stored record (dry run without --confirm)
//! - `pull` — fetch a record from a remote endpoint into the local store

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use orderdeck_core::{FileOrderStore, OrderStore, RemoteOrderClient};

#[derive(Parser)]
#[command(
    name = "orderdeck",
    about = "OrderDeck CLI — durable order store management"
)]
struct Cli {
    /// Order store directory. Defaults to the dashboard's store.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate stored order records.
    List,
    /// Print one stored record as a table.
    Show {
        /// Storage key (e.g. watchlist, portfolio, strategies).
        key: String,

        /// Emit the record as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Delete a stored record.
    Clear {
        /// Storage key to delete.
        key: String,

        /// Actually delete (without this flag, only previews what would be removed).
        #[arg(long, default_value_t = false)]
        confirm: bool,
    },
    /// Fetch a record from a remote endpoint and write it into the local store.
    Pull {
        /// Storage key to fetch.
        key: String,

        /// Remote endpoint base URL.
        #[arg(long)]
        endpoint: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = FileOrderStore::new(store_dir(cli.dir));

    match cli.command {
        Commands::List => run_list(&store),
        Commands::Show { key, json } => run_show(&store, &key, json),
        Commands::Clear { key, confirm } => run_clear(&store, &key, confirm),
        Commands::Pull { key, endpoint } => run_pull(&store, &key, &endpoint),
    }
}

/// The dashboard's store location, unless overridden.
fn store_dir(dir: Option<PathBuf>) -> PathBuf {
    dir.unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("orderdeck")
            .join("orders")
    })
}

fn run_list(store: &FileOrderStore) -> Result<()> {
    let records = store.records()?;
    if records.is_empty() {
        println!("Store is empty: {}", store.dir().display());
        return Ok(());
    }

    println!("Store: {}", store.dir().display());
    println!();
    println!("{:<16} {:>8} {:<20}", "Key", "Entries", "Saved at");
    println!("{}", "-".repeat(46));
    for record in &records {
        println!(
            "{:<16} {:>8} {:<20}",
            record.key,
            record.order.len(),
            record.saved_at.format("%Y-%m-%d %H:%M:%S"),
        );
    }
    Ok(())
}

fn run_show(store: &FileOrderStore, key: &str, json: bool) -> Result<()> {
    let Some(entries) = store.load(key)? else {
        bail!("no stored order for key '{key}'");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Key: {key}");
    println!();
    println!("{:>6} {:<12}", "Pos", "Id");
    println!("{}", "-".repeat(19));
    let mut entries = entries;
    entries.sort_by_key(|entry| entry.order);
    for entry in &entries {
        println!("{:>6} {:<12}", entry.order, entry.id);
    }
    Ok(())
}

fn run_clear(store: &FileOrderStore, key: &str, confirm: bool) -> Result<()> {
    let Some(entries) = store.load(key)? else {
        println!("No stored order for key '{key}'.");
        return Ok(());
    };

    println!("Key '{key}' holds {} entries.", entries.len());
    if !confirm {
        println!();
        println!("Dry run — pass --confirm to actually delete.");
        return Ok(());
    }

    store.delete(key)?;
    println!("Removed: {key}");
    Ok(())
}

fn run_pull(store: &FileOrderStore, key: &str, endpoint: &str) -> Result<()> {
    let client = RemoteOrderClient::new(endpoint);
    match client.fetch(key)? {
        Some(entries) => {
            store.save(key, &entries)?;
            println!("Pulled {} entries for '{key}' into the local store.", entries.len());
        }
        None => {
            println!("Remote has no stored order for '{key}'.");
        }
    }
    Ok(())
}
