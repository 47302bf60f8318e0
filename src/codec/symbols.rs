//! Width-aware symbol packing for shard payloads. A shard is read into
//! memory up front and unpacked into a `Vec<Symbol>` once, rather than
//! transferred one word at a time.
//!
//! w=4 packs two symbols per byte, high nibble first.

use crate::error::CodecError;
use crate::field::{Symbol, Width};

/// Number of symbols carried by `bytes` bytes of shard payload at `width`.
pub fn symbol_count(width: Width, bytes: usize) -> usize {
    width.symbols_in(bytes as u64) as usize
}

/// Reserves `cap` elements up front, surfacing allocation failure as
/// `CodecError::OutOfMemory` instead of aborting. `unpack`/`pack` allocate
/// the largest buffers in the pipeline (one per data/surviving shard), so
/// they go through this instead of plain `with_capacity`/`collect`.
fn try_with_capacity<T>(cap: usize) -> Result<Vec<T>, CodecError> {
    let mut v = Vec::new();
    v.try_reserve_exact(cap)
        .map_err(|_| CodecError::OutOfMemory(cap * std::mem::size_of::<T>()))?;
    Ok(v)
}

/// Unpacks a raw shard buffer into one `Symbol` per field element.
pub fn unpack(width: Width, bytes: &[u8]) -> Result<Vec<Symbol>, CodecError> {
    match width {
        Width::W4 => {
            let mut out = try_with_capacity(bytes.len() * 2)?;
            for &b in bytes {
                out.push(((b >> 4) & 0x0F) as Symbol);
                out.push((b & 0x0F) as Symbol);
            }
            Ok(out)
        }
        Width::W8 => {
            let mut out = try_with_capacity(bytes.len())?;
            out.extend(bytes.iter().map(|&b| b as Symbol));
            Ok(out)
        }
        Width::W16 => {
            let mut out = try_with_capacity(bytes.len() / 2)?;
            out.extend(
                bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]) as Symbol),
            );
            Ok(out)
        }
    }
}

/// Packs symbols back into the raw shard byte layout. Inverse of `unpack`.
pub fn pack(width: Width, symbols: &[Symbol]) -> Result<Vec<u8>, CodecError> {
    match width {
        Width::W4 => {
            debug_assert_eq!(symbols.len() % 2, 0);
            let mut out = try_with_capacity(symbols.len() / 2)?;
            for pair in symbols.chunks_exact(2) {
                let hi = (pair[0] as u8) & 0x0F;
                let lo = (pair[1] as u8) & 0x0F;
                out.push((hi << 4) | lo);
            }
            Ok(out)
        }
        Width::W8 => {
            let mut out = try_with_capacity(symbols.len())?;
            out.extend(symbols.iter().map(|&s| s as u8));
            Ok(out)
        }
        Width::W16 => {
            let mut out = try_with_capacity(symbols.len() * 2)?;
            for &s in symbols {
                out.extend_from_slice(&(s as u16).to_ne_bytes());
            }
            Ok(out)
        }
    }
}
