use std::io;
use std::process::ExitCode;

use clap::Parser;
use log::{error, log_enabled, Level};

use httpget::{Fetcher, DEFAULT_URL};

/// Fetch a URL with a single GET and print the response body to stderr.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// URL to fetch.
    #[arg(default_value = DEFAULT_URL)]
    url: String,

    /// Log connection and response details.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(args.verbose);

    let fetcher = Fetcher::new();
    let mut sink = io::stderr().lock();

    match fetcher.fetch_and_print(&args.url, &mut sink) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The failure is reported even when RUST_LOG filters it out.
            if log_enabled!(Level::Error) {
                error!("{}", e);
            } else {
                eprintln!("{}", e);
            }
            ExitCode::FAILURE
        }
    }
}

// RUST_LOG overrides the level picked here.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
