//! Repair shell: opens every shard that exists, drives `Codec::repair`,
//! writes back only the data shards that were missing. Existence is the
//! sole survival signal; a "no data shard missing" inventory is a fast
//! no-op.

use std::sync::Arc;

use anyhow::Result;
use futures_util::future::try_join_all;
use indicatif::{ProgressBar, ProgressStyle};
use rserasure::codec::Codec;
use rserasure::error::CodecError;
use tracing::{info, instrument};

use crate::shell::shards::{read_if_present, write_shard, ShardPaths};

/// Returns `true` if any data shard was reconstructed (useful for the
/// caller deciding whether to log a "nothing to do" message).
#[instrument(skip(codec, paths))]
pub async fn run_repair(codec: Arc<Codec>, paths: &ShardPaths) -> Result<bool> {
    let k = paths.data.len();
    let m = paths.coding.len();

    info!("inventorying {} data and {} coding shards", k, m);
    let pb = ProgressBar::new((k + m) as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.yellow/black}] inventorying shards {pos}/{len}",
        )
        .unwrap()
        .progress_chars("=> "),
    );

    let data_reads = paths.data.iter().map(|p| {
        let pb = pb.clone();
        async move {
            let v = read_if_present(p).await?;
            pb.inc(1);
            Ok::<_, anyhow::Error>(v)
        }
    });
    let coding_reads = paths.coding.iter().map(|p| {
        let pb = pb.clone();
        async move {
            let v = read_if_present(p).await?;
            pb.inc(1);
            Ok::<_, anyhow::Error>(v)
        }
    });
    let mut data_slots = try_join_all(data_reads).await?;
    let coding_slots = try_join_all(coding_reads).await?;
    pb.finish_with_message("shards inventoried");

    // S0 open -> S1 inventoried: every present shard must agree on size
    // before the trivial-success shortcut or the repair path is taken.
    let shard_len = data_slots
        .iter()
        .chain(coding_slots.iter())
        .flatten()
        .map(|v| v.len())
        .next();
    if let Some(shard_len) = shard_len {
        let labeled = data_slots
            .iter()
            .zip(paths.data.iter())
            .chain(coding_slots.iter().zip(paths.coding.iter()));
        for (slot, path) in labeled {
            if let Some(buf) = slot {
                if buf.len() != shard_len {
                    return Err(CodecError::ShardSize {
                        path: path.clone(),
                        expected: shard_len as u64,
                        observed: buf.len() as u64,
                    }
                    .into());
                }
            }
        }
    }

    let missing_before: Vec<usize> = (0..k).filter(|&i| data_slots[i].is_none()).collect();
    if missing_before.is_empty() {
        info!("no data shards missing, repair is a no-op");
        return Ok(false);
    }

    let shards: Vec<Option<Vec<u8>>> = data_slots.drain(..).chain(coding_slots).collect();

    let codec_for_blocking = codec.clone();
    let repaired = tokio::task::spawn_blocking(move || {
        let mut shards = shards;
        codec_for_blocking.repair(&mut shards)?;
        Ok::<_, anyhow::Error>(shards)
    })
    .await??;

    info!("writing {} recovered data shards", missing_before.len());
    let pb_write = ProgressBar::new(missing_before.len() as u64);
    pb_write.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.magenta/black}] writing recovered shards {pos}/{len}",
        )
        .unwrap()
        .progress_chars("=> "),
    );
    let writes = missing_before.iter().map(|&i| {
        let pb = pb_write.clone();
        let path = &paths.data[i];
        let buf = repaired[i]
            .as_ref()
            .expect("repair must fill every previously-missing data slot");
        async move {
            write_shard(path, buf).await?;
            pb.inc(1);
            Ok::<_, anyhow::Error>(())
        }
    });
    try_join_all(writes).await?;
    pb_write.finish_with_message("recovered shards written");

    Ok(true)
}
