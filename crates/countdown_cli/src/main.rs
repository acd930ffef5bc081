//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `countdown_core` linkage by printing its version.
//! - Optionally print the persisted countdown list from a database file.

use clap::{Parser, ValueEnum};
use countdown_core::db::open_db;
use countdown_core::{CountdownService, EntryStore, SortMethod, SqliteKeyValueStore, SystemClock};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum SortArg {
    /// Soonest first (default)
    #[default]
    Days,
    /// By name
    Alphabetical,
}

impl From<SortArg> for SortMethod {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Days => SortMethod::ByProximity,
            SortArg::Alphabetical => SortMethod::Alphabetical,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "countdown_cli")]
#[command(about = "Print core version and the persisted countdown list", version)]
struct Cli {
    /// SQLite database holding the countdown collection
    db_path: Option<PathBuf>,

    /// List order
    #[arg(short, long, value_enum, default_value = "days")]
    sort: SortArg,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    println!("countdown_core version={}", countdown_core::core_version());

    let Some(db_path) = cli.db_path else {
        return ExitCode::SUCCESS;
    };
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open `{}`: {err}", db_path.display());
            return ExitCode::FAILURE;
        }
    };
    let store = EntryStore::new(SqliteKeyValueStore::new(&conn));
    let service = CountdownService::new(store, SystemClock);

    for row in service.list(cli.sort.into()) {
        println!("{}\t{}\t{}\t{}", row.id, row.name, row.target_day, row.label());
    }
    ExitCode::SUCCESS
}
