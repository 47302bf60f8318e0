//! CLI surface: a flat flag struct (`-n -m -p -s -c -r -u -v`) rather than
//! subcommands, since the mode flags combine (`-r` followed by re-encoding
//! the rebuilt set), which doesn't fit a subcommand model.

use clap::Parser;

/// Field width is a runtime value rather than a compile-time constant, so
/// this flag is the CLI's way of choosing it. Defaults to 8.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Reed-Solomon erasure coding over GF(2^w)",
    long_about = "RAID-like fault tolerance: k data shards + m coding shards, any k of k+m recover the rest."
)]
pub struct Cli {
    /// Number of data shards (k).
    #[arg(short = 'n', long = "data-shards")]
    pub n_data: Option<usize>,

    /// Number of coding shards (m).
    #[arg(short = 'm', long = "coding-shards")]
    pub n_coding: Option<usize>,

    /// Filename prefix; shards are `<prefix>.d<i>` / `<prefix>.c<j>`.
    #[arg(short = 'p', long = "prefix")]
    pub prefix: Option<String>,

    /// Field width in bits: 4, 8, or 16.
    #[arg(short = 'w', long = "width", default_value_t = 8)]
    pub width: u32,

    /// Use a Cauchy distribution matrix instead of corrected Vandermonde.
    #[arg(short = 's', long = "cauchy")]
    pub cauchy: bool,

    /// Encode: read the k data shards, write the m coding shards.
    #[arg(short = 'c', long = "encode")]
    pub encode: bool,

    /// Repair: reconstruct missing data shards, then re-encode all coding
    /// shards from the (now complete) data set.
    #[arg(short = 'r', long = "repair")]
    pub repair: bool,

    /// Run the self-test (known-answer GF/matrix scenarios) and exit.
    #[arg(short = 'u', long = "self-test")]
    pub self_test: bool,

    /// Verbose: dump the distribution/survivor matrices and raise the log
    /// level for the duration of the call.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
