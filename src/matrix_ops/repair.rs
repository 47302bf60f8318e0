//! Survivor matrix (A') construction: identity rows for surviving data
//! shards, Vandermonde/Cauchy rows for surviving coding shards.

use crate::error::CodecError;
use crate::numeric::Matrix;

/// Assembles the `k x k` survivor matrix from a distribution matrix `d`
/// (`m x k`) and the bitmaps of which data/coding shards survived. Ascending
/// index order for both data and coding rows; stops as soon as `k` rows are
/// collected. Fails with `TooManyLosses` if fewer than `k` shards survive
/// in total.
pub fn build_survivor_matrix(
    d: &Matrix,
    data_survives: &[bool],
    coding_survives: &[bool],
    k: usize,
) -> Result<(Matrix, Vec<usize>), CodecError> {
    debug_assert_eq!(data_survives.len(), k);
    debug_assert_eq!(coding_survives.len(), d.n_rows());

    let total_survivors = data_survives.iter().filter(|&&b| b).count()
        + coding_survives.iter().filter(|&&b| b).count();
    if total_survivors < k {
        return Err(CodecError::TooManyLosses {
            survivors: total_survivors,
            required: k,
        });
    }

    let mut a_prime = Matrix::zeroed(k, k);
    // `order[row]` records which global shard index (data: 0..k, coding:
    // k..k+m) contributed that row of A', in the same order the streaming
    // driver must pack symbols.
    let mut order = Vec::with_capacity(k);

    for r in 0..k {
        if data_survives[r] {
            let mut row = vec![0; k];
            row[r] = 1;
            a_prime.set_row(order.len(), &row);
            order.push(r);
            if order.len() == k {
                return Ok((a_prime, order));
            }
        }
    }
    for c in 0..d.n_rows() {
        if coding_survives[c] {
            a_prime.set_row(order.len(), d.row(c));
            order.push(k + c);
            if order.len() == k {
                break;
            }
        }
    }

    Ok((a_prime, order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{GaloisField, Width};
    use crate::matrix_ops::constructors::vandermonde_correct;

    #[test]
    fn picks_identities_first_then_coding_rows_in_order() {
        let gf = GaloisField::new(Width::W8);
        let k = 3;
        let m = 3;
        let d = vandermonde_correct(&gf, m, k).unwrap();

        // data shard 1 and coding shard 0 missing
        let data_survives = vec![true, false, true];
        let coding_survives = vec![false, true, true];

        let (a_prime, order) =
            build_survivor_matrix(&d, &data_survives, &coding_survives, k).unwrap();
        assert_eq!(order, vec![0, 2, 4]); // data 0, data 2, coding index 1 (global k+1=4)
        assert_eq!(a_prime.row(0), &[1, 0, 0]);
        assert_eq!(a_prime.row(1), &[0, 0, 1]);
        assert_eq!(a_prime.row(2), d.row(1));
    }

    #[test]
    fn too_few_survivors_is_rejected() {
        let gf = GaloisField::new(Width::W8);
        let k = 3;
        let m = 2;
        let d = vandermonde_correct(&gf, m, k).unwrap();
        let data_survives = vec![true, false, false];
        let coding_survives = vec![true, false];
        let err = build_survivor_matrix(&d, &data_survives, &coding_survives, k).unwrap_err();
        assert!(matches!(err, CodecError::TooManyLosses { .. }));
    }
}
