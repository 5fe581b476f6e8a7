//! Interactive employee-management shell entry point.
//!
//! # Responsibility
//! - Bootstrap logging and the SQLite store, then hand control to the menu
//!   loop.
//! - Keep process exit codes honest: recoverable data errors never terminate
//!   the session; only storage bootstrap failures exit non-zero.

use staffbook_core::db::open_db;
use staffbook_core::{default_log_level, init_logging};

mod menu;
mod prompt;
mod table;

const DB_FILE: &str = "staffbook.db";
const LOG_DIR: &str = "logs";

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = std::env::current_dir()?.join(LOG_DIR);
    if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
        // The shell stays usable without file logging.
        eprintln!("Warning: file logging disabled: {err}");
    }

    let mut conn = open_db(DB_FILE)?;
    menu::run(&mut conn)?;
    Ok(())
}
