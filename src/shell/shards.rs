//! Shard file layout: `<prefix>.d<i>` / `<prefix>.c<j>`, existence-as-
//! survival, no in-band metadata. Kept outside the coding core: this
//! module only knows about paths and bytes.

use std::path::{Path, PathBuf};

use rserasure::error::CodecError;

/// Filenames for a `k`+`m` codec run rooted at `prefix`.
pub struct ShardPaths {
    pub data: Vec<PathBuf>,
    pub coding: Vec<PathBuf>,
}

impl ShardPaths {
    pub fn new(prefix: &str, k: usize, m: usize) -> Self {
        ShardPaths {
            data: (0..k).map(|i| PathBuf::from(format!("{prefix}.d{i}"))).collect(),
            coding: (0..m).map(|j| PathBuf::from(format!("{prefix}.c{j}"))).collect(),
        }
    }
}

/// Reads a shard that must exist (encode's data shards): `ShardMissing` if
/// absent, `ShardOpen` for any other I/O failure.
pub async fn read_required(path: &Path) -> Result<Vec<u8>, CodecError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(CodecError::ShardMissing(path.to_path_buf()));
    }
    tokio::fs::read(path)
        .await
        .map_err(|source| CodecError::ShardOpen {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads a shard for repair: existence is the sole survival signal, so a
/// missing shard is `Ok(None)`, not an error.
pub async fn read_if_present(path: &Path) -> Result<Option<Vec<u8>>, CodecError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Ok(None);
    }
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CodecError::ShardOpen {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(bytes))
}

/// Writes a shard, then re-reads its length from disk and fails with
/// `ShortIo` if fewer bytes landed than were given (distinct from
/// `ShardOpen`, which covers failures to open or access the file at all).
pub async fn write_shard(path: &Path, data: &[u8]) -> Result<(), CodecError> {
    tokio::fs::write(path, data)
        .await
        .map_err(|source| CodecError::ShardOpen {
            path: path.to_path_buf(),
            source,
        })?;
    let written = tokio::fs::metadata(path)
        .await
        .map_err(|source| CodecError::ShardOpen {
            path: path.to_path_buf(),
            source,
        })?
        .len() as usize;
    if written != data.len() {
        return Err(CodecError::ShortIo {
            path: path.to_path_buf(),
            expected: data.len(),
            observed: written,
        });
    }
    Ok(())
}
