//! # rserasure
//!
//! CLI shell around the `rserasure` Reed-Solomon erasure coding library:
//! argument parsing, shard file layout, progress reporting, process exit
//! handling. The codec itself (field arithmetic, matrix construction,
//! inversion, streaming encode/repair) lives in the library crate and knows
//! nothing about files or the command line.
//!
//! ```bash
//! # encode 4 data shards + 2 coding shards under prefix "out"
//! rserasure -n 4 -m 2 -p out -c
//!
//! # repair (delete some out.d*/out.c* files first) and re-encode
//! rserasure -n 4 -m 2 -p out -r
//!
//! # run the self-test
//! rserasure -u
//! ```

mod cli;
mod shell;

use anyhow::Result;
use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use cli::commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let result = shell::run(cli).await;
    if let Err(e) = &result {
        error!("operation failed: {:?}", e);
        std::process::exit(1);
    }
    result
}
