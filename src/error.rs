use std::path::PathBuf;

use thiserror::Error;

/// Every way a codec call can fail. All variants are fatal to the call that
/// raised them, nothing here is retried inside the core; see the streaming
/// driver for the "outputs are indeterminate on error" policy.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("bad configuration: {0}")]
    ConfigError(String),

    #[error("data shard missing: {0:?}")]
    ShardMissing(PathBuf),

    #[error("could not open shard {path:?}: {source}")]
    ShardOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("shard size mismatch: {path:?} is {observed} bytes, expected {expected}")]
    ShardSize {
        path: PathBuf,
        expected: u64,
        observed: u64,
    },

    /// A shard write transferred fewer bytes than were given. The buffered
    /// driver reads a whole shard up front, so a short read surfaces as
    /// `ShardSize` instead; this variant covers a truncated write, checked
    /// by re-reading the written file's length.
    #[error("short I/O on {path:?}: expected to transfer {expected} bytes, got {observed}")]
    ShortIo {
        path: PathBuf,
        expected: usize,
        observed: usize,
    },

    #[error("too many losses: {survivors} shards survived, need at least {required}")]
    TooManyLosses { survivors: usize, required: usize },

    #[error("matrix is singular, cannot invert")]
    Singular,

    #[error("out of memory: failed to allocate {0} bytes")]
    OutOfMemory(usize),
}
