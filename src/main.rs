//! Reads tree commands from stdin, one per line, and prints each reply on stdout.

use std::io::{self, BufRead, Write};

use bstree::Session;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Binary search trees over several value types, driven by text commands
#[derive(Parser, Debug)]
#[command(name = "bstree")]
#[command(about = "Build and inspect binary search trees from text commands")]
struct Args {
    /// Default log directive, added to whatever RUST_LOG says
    #[arg(long, default_value = "warn", env = "BSTREE_LOG")]
    log_level: String,

    /// Echo each command before its reply
    #[arg(long, env = "BSTREE_ECHO")]
    echo: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(args.log_level.parse()?))
        .with_writer(io::stderr)
        .init();

    info!(echo = args.echo, "starting session");

    let mut session = Session::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if args.echo && !line.trim().is_empty() {
            writeln!(out, "> {}", line)?;
        }
        match session.execute(&line) {
            Ok(Some(reply)) => writeln!(out, "{}", reply)?,
            Ok(None) => {}
            Err(err) => {
                debug!(error = ?err, "command failed");
                writeln!(out, "{}", err)?;
            }
        }
    }

    if session.awaiting_pairs() {
        info!("input ended before the pair list was complete");
    }
    Ok(())
}
