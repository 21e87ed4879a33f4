//! Ledger Processor CLI
//!
//! Reads an account snapshot as JSON, processes its transactions and prints
//! the result as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- snapshot.json > result.json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use ledger_processor::{process, AccountSnapshot, LedgerError, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(LedgerError::MissingArgument);
    }

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let snapshot: AccountSnapshot = serde_json::from_reader(reader)?;
    let result = process(&snapshot);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, &result)?;
    writeln!(handle)?;

    Ok(())
}
