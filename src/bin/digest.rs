//! Document digest helper.
//!
//! Computes the content digest the dashboard stores documents under, so a
//! downloaded file can be checked against its storage key by hand.
//!
//! Usage:
//!   cargo run --bin creditchain-digest <file> [expected-digest]

use creditchain_dashboard::DocumentHash;
use std::env;
use std::fs;
use std::process::ExitCode;

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("usage: creditchain-digest <file> [expected-digest]");
        return Ok(ExitCode::from(2));
    }

    let content = fs::read(&args[1])?;
    let digest = DocumentHash::of_content(&content);
    println!("{digest}");

    if let Some(expected) = args.get(2) {
        let expected: DocumentHash = expected.parse()?;
        if expected != digest {
            eprintln!("MISMATCH: expected {expected}");
            return Ok(ExitCode::FAILURE);
        }
        println!("match");
    }

    Ok(ExitCode::SUCCESS)
}
