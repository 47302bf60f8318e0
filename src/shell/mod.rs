//! The CLI shell: everything external to the coding core (argument
//! parsing, shard file layout, progress reporting, process exit handling).

pub mod encode;
pub mod repair;
pub mod shards;

use std::sync::Arc;

use anyhow::{bail, Result};
use rserasure::codec::Codec;
use rserasure::field::Width;
use tracing::info;

use crate::cli::commands::Cli;
use shards::ShardPaths;

fn parse_width(bits: u32) -> Result<Width> {
    match bits {
        4 => Ok(Width::W4),
        8 => Ok(Width::W8),
        16 => Ok(Width::W16),
        other => bail!("unsupported field width -w {other}: must be 4, 8, or 16"),
    }
}

/// Dispatches on the CLI flags: `-u` runs the self-test and exits;
/// otherwise `-r` (if set) repairs missing data shards first, and the
/// coding shards are then (re-)written unconditionally from the resulting
/// data set, so a bare `-r` leaves freshly-rebuilt coding shards on disk
/// too.
pub async fn run(cli: Cli) -> Result<()> {
    if cli.self_test {
        info!("running self-test");
        rserasure::self_test::run()?;
        info!("self-test passed");
        return Ok(());
    }

    let k = cli.n_data.ok_or_else(|| anyhow::anyhow!("-n <k> is required"))?;
    let m = cli.n_coding.ok_or_else(|| anyhow::anyhow!("-m <m> is required"))?;
    let prefix = cli
        .prefix
        .clone()
        .ok_or_else(|| anyhow::anyhow!("-p <prefix> is required"))?;

    if !cli.encode && !cli.repair {
        bail!("one of -c (encode) or -r (repair) is required");
    }

    let width = parse_width(cli.width)?;
    let codec = Arc::new(Codec::new(width, k, m, cli.cauchy)?);

    if cli.verbose {
        info!(
            "distribution matrix ({}x{}):\n{}",
            codec.m(),
            codec.k(),
            codec.distribution_matrix().dump()
        );
    }

    let paths = ShardPaths::new(&prefix, k, m);

    if cli.repair {
        let repaired = repair::run_repair(codec.clone(), &paths).await?;
        if !repaired {
            info!("no repair necessary");
        }
    }

    encode::run_encode(codec, &paths).await?;

    Ok(())
}
