//! Encode shell: opens the `k` data shards, drives `Codec::encode`, writes
//! the `m` coding shards, with progress bars and `tokio::task::spawn_blocking`
//! around the synchronous core.

use std::sync::Arc;

use anyhow::Result;
use futures_util::future::try_join_all;
use indicatif::{ProgressBar, ProgressStyle};
use rserasure::codec::Codec;
use tracing::{info, instrument};

use crate::shell::shards::{read_required, write_shard, ShardPaths};

#[instrument(skip(codec, paths))]
pub async fn run_encode(codec: Arc<Codec>, paths: &ShardPaths) -> Result<()> {
    info!("reading {} data shards", paths.data.len());
    let pb = ProgressBar::new(paths.data.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/black}] reading data shards {pos}/{len}",
        )
        .unwrap()
        .progress_chars("=> "),
    );

    let reads = paths.data.iter().map(|p| {
        let pb = pb.clone();
        async move {
            let bytes = read_required(p).await?;
            pb.inc(1);
            Ok::<_, anyhow::Error>(bytes)
        }
    });
    let data_shards = try_join_all(reads).await?;
    pb.finish_with_message("data shards read");

    let codec_for_blocking = codec.clone();
    let parities = tokio::task::spawn_blocking(move || codec_for_blocking.encode(&data_shards))
        .await??;

    info!("writing {} coding shards", paths.coding.len());
    let pb_write = ProgressBar::new(paths.coding.len() as u64);
    pb_write.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.green/black}] writing coding shards {pos}/{len}",
        )
        .unwrap()
        .progress_chars("=> "),
    );
    let writes = paths.coding.iter().zip(parities.iter()).map(|(p, buf)| {
        let pb = pb_write.clone();
        async move {
            write_shard(p, buf).await?;
            pb.inc(1);
            Ok::<_, anyhow::Error>(())
        }
    });
    try_join_all(writes).await?;
    pb_write.finish_with_message("coding shards written");

    Ok(())
}
