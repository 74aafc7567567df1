mod cli;
mod config;
mod identifier;
mod index;
mod manifest;
mod model;
mod sort;

use std::{io, process};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
