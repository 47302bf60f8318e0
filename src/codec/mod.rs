//! The codec: owns the field tables, the distribution matrix, and a
//! survivor-keyed inverse cache, and drives encode/repair symbol-by-symbol
//! across in-memory shard buffers.

pub mod symbols;

use std::path::PathBuf;

use dashmap::DashMap;
use rayon::prelude::*;

use crate::error::CodecError;
use crate::field::{GaloisField, Symbol, Width};
use crate::matrix_ops;
use crate::numeric::Matrix;

/// Owns one codec configuration: field width, `k`/`m`, the distribution
/// matrix `D`, and a cache of inverted survivor matrices keyed by the
/// sorted global-index survivor set. Safe to share (`&Codec`) across a
/// `rayon` scope or multiple sequential repair calls; nothing here is
/// mutated except through the cache's internal locking.
pub struct Codec {
    width: Width,
    k: usize,
    m: usize,
    gf: GaloisField,
    distribution: Matrix,
    inverse_cache: DashMap<Vec<usize>, Matrix>,
}

impl Codec {
    /// Builds the field tables and the `m x k` distribution matrix.
    /// Rejects `k + m > 2^w` as `ConfigError` before any table is touched.
    pub fn new(width: Width, k: usize, m: usize, use_cauchy: bool) -> Result<Self, CodecError> {
        if k == 0 || m == 0 {
            return Err(CodecError::ConfigError(
                "k and m must both be greater than zero".into(),
            ));
        }
        let nw = width.nw() as usize;
        if k + m > nw {
            return Err(CodecError::ConfigError(format!(
                "k+m ({}) exceeds field capacity 2^{} ({})",
                k + m,
                width.bits(),
                nw
            )));
        }

        let gf = GaloisField::new(width);
        let distribution = if use_cauchy {
            matrix_ops::cauchy(&gf, m, k)?
        } else {
            matrix_ops::vandermonde_correct(&gf, m, k)?
        };

        Ok(Codec {
            width,
            k,
            m,
            gf,
            distribution,
            inverse_cache: DashMap::new(),
        })
    }

    pub fn width(&self) -> Width {
        self.width
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn m(&self) -> usize {
        self.m
    }

    pub fn distribution_matrix(&self) -> &Matrix {
        &self.distribution
    }

    /// Encode. `data_shards` must be exactly `k` buffers of equal byte
    /// length (`ShardSize` otherwise, checked before any symbol is
    /// touched). Returns the `m` coding shard buffers in order.
    pub fn encode(&self, data_shards: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, CodecError> {
        if data_shards.len() != self.k {
            return Err(CodecError::ConfigError(format!(
                "encode expects {} data shards, got {}",
                self.k,
                data_shards.len()
            )));
        }
        let shard_len = data_shards.first().map_or(0, |v| v.len());
        for (i, s) in data_shards.iter().enumerate() {
            if s.len() != shard_len {
                return Err(CodecError::ShardSize {
                    path: PathBuf::from(format!(".d{i}")),
                    expected: shard_len as u64,
                    observed: s.len() as u64,
                });
            }
        }

        let columns: Vec<Vec<Symbol>> = data_shards
            .iter()
            .map(|bytes| symbols::unpack(self.width, bytes))
            .collect::<Result<Vec<Vec<Symbol>>, CodecError>>()?;
        let n_symbols = columns.first().map_or(0, |c| c.len());

        let parities: Vec<Vec<u8>> = (0..self.m)
            .into_par_iter()
            .map(|r| -> Result<Vec<u8>, CodecError> {
                let row = self.distribution.row(r);
                let mut out_symbols = zeroed_symbols(n_symbols)?;
                for (t, out) in out_symbols.iter_mut().enumerate() {
                    let mut acc = self.gf.mul(row[0], columns[0][t]);
                    for (j, col) in columns.iter().enumerate().skip(1) {
                        acc ^= self.gf.mul(row[j], col[t]);
                    }
                    *out = acc;
                }
                symbols::pack(self.width, &out_symbols)
            })
            .collect::<Result<Vec<Vec<u8>>, CodecError>>()?;

        Ok(parities)
    }

    /// Looks up (or computes and caches) the inverted survivor matrix for
    /// the given survival bitmaps, returning it alongside the global-index
    /// packing order (surviving data ascending, then surviving coding
    /// ascending, stopping at `k`).
    fn get_or_build_inverse(
        &self,
        data_survives: &[bool],
        coding_survives: &[bool],
    ) -> Result<(Matrix, Vec<usize>), CodecError> {
        let (a_prime, order) =
            matrix_ops::build_survivor_matrix(&self.distribution, data_survives, coding_survives, self.k)?;
        if let Some(cached) = self.inverse_cache.get(&order) {
            return Ok((cached.value().clone(), order));
        }
        let inv = matrix_ops::invert(&self.gf, &a_prime)?;
        self.inverse_cache.insert(order.clone(), inv.clone());
        Ok((inv, order))
    }

    /// Repair. `shards` has length `k+m`: slots `0..k` are data, slots
    /// `k..k+m` are coding; `None` means missing. Only missing *data* slots
    /// are filled in; a repair call never recomputes a missing coding
    /// shard; present-and-intact shards are never overwritten, and a
    /// missing coding shard simply stays `None` (the caller re-encodes
    /// afterwards if it wants coding shards regenerated).
    pub fn repair(&self, shards: &mut [Option<Vec<u8>>]) -> Result<(), CodecError> {
        let n = self.k + self.m;
        if shards.len() != n {
            return Err(CodecError::ConfigError(format!(
                "repair expects {} shard slots, got {}",
                n,
                shards.len()
            )));
        }

        // S0 open -> S1 inventoried: every present shard must agree on size
        // before any trivial-success or repair path is taken, matching the
        // original's n_data_ok-counting loop which validates size in the
        // same pass.
        let shard_len = shards
            .iter()
            .flatten()
            .map(|v| v.len())
            .next()
            .ok_or(CodecError::TooManyLosses {
                survivors: 0,
                required: self.k,
            })?;
        for (i, slot) in shards.iter().enumerate() {
            if let Some(buf) = slot {
                if buf.len() != shard_len {
                    return Err(CodecError::ShardSize {
                        path: PathBuf::from(shard_label(i, self.k)),
                        expected: shard_len as u64,
                        observed: buf.len() as u64,
                    });
                }
            }
        }

        let data_survives: Vec<bool> = (0..self.k).map(|i| shards[i].is_some()).collect();
        if data_survives.iter().all(|&ok| ok) {
            return Ok(()); // S1 -> S2 trivial-success
        }
        let coding_survives: Vec<bool> =
            (0..self.m).map(|j| shards[self.k + j].is_some()).collect();

        let (a_prime_inv, order) = self.get_or_build_inverse(&data_survives, &coding_survives)?;

        let columns: Vec<Vec<Symbol>> = order
            .iter()
            .map(|&idx| symbols::unpack(self.width, shards[idx].as_ref().unwrap()))
            .collect::<Result<Vec<Vec<Symbol>>, CodecError>>()?;
        let n_symbols = columns.first().map_or(0, |c| c.len());

        let missing_data: Vec<usize> = (0..self.k).filter(|&i| shards[i].is_none()).collect();

        let recovered: Vec<(usize, Vec<u8>)> = missing_data
            .par_iter()
            .map(|&slot| -> Result<(usize, Vec<u8>), CodecError> {
                let row = a_prime_inv.row(slot);
                let mut out_symbols = zeroed_symbols(n_symbols)?;
                for (t, out) in out_symbols.iter_mut().enumerate() {
                    let mut acc = self.gf.mul(row[0], columns[0][t]);
                    for (j, col) in columns.iter().enumerate().skip(1) {
                        acc ^= self.gf.mul(row[j], col[t]);
                    }
                    *out = acc;
                }
                Ok((slot, symbols::pack(self.width, &out_symbols)?))
            })
            .collect::<Result<Vec<(usize, Vec<u8>)>, CodecError>>()?;

        for (slot, buf) in recovered {
            shards[slot] = Some(buf);
        }

        Ok(())
    }
}

fn shard_label(global_index: usize, k: usize) -> String {
    if global_index < k {
        format!(".d{global_index}")
    } else {
        format!(".c{}", global_index - k)
    }
}

/// Shard-sized symbol buffer, surfacing allocation failure as
/// `CodecError::OutOfMemory` instead of aborting.
fn zeroed_symbols(n: usize) -> Result<Vec<Symbol>, CodecError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(n)
        .map_err(|_| CodecError::OutOfMemory(n * std::mem::size_of::<Symbol>()))?;
    buf.resize(n, 0);
    Ok(buf)
}
