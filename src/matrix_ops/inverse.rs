//! Gauss-Jordan matrix inversion over GF(2^w).

use crate::error::CodecError;
use crate::field::GaloisField;
use crate::numeric::Matrix;

/// Inverts a square matrix over GF(2^w). Builds the `dim x 2*dim`
/// augmentation `[M | I]`, then for each pivot column selects the row with
/// the largest *integer* cell value at or below the pivot (not a GF norm;
/// any non-zero pivot works, and this selection is simply deterministic),
/// swaps it into place, rescales it to 1, and cancels that column out of
/// every other row.
pub fn invert(gf: &GaloisField, mat: &Matrix) -> Result<Matrix, CodecError> {
    let dim = mat.n_rows();
    if dim != mat.n_cols() {
        return Err(CodecError::ConfigError(
            "matrix must be square to invert".into(),
        ));
    }

    let mut aug = Matrix::try_zeroed(dim, 2 * dim)?;
    for i in 0..dim {
        for j in 0..dim {
            aug.set(i, j, mat.get(i, j));
        }
        aug.set(i, dim + i, 1);
    }

    for j in 0..dim {
        let mut pivot_row = j;
        for i in (j + 1)..dim {
            if aug.get(i, j) > aug.get(pivot_row, j) {
                pivot_row = i;
            }
        }
        if pivot_row != j {
            let (a, b) = (aug.row(j).to_vec(), aug.row(pivot_row).to_vec());
            aug.set_row(j, &b);
            aug.set_row(pivot_row, &a);
        }
        if aug.get(j, j) == 0 {
            return Err(CodecError::Singular);
        }

        for i in 0..dim {
            if i == j {
                let r = aug.get(i, j);
                for k in 0..2 * dim {
                    let v = gf.div(aug.get(i, k), r)?;
                    aug.set(i, k, v);
                }
            } else {
                let r = aug.get(i, j);
                if r == 0 {
                    continue;
                }
                let denom = aug.get(j, j);
                for k in 0..2 * dim {
                    let factor = gf.mul(gf.div(aug.get(j, k), denom)?, r);
                    let v = aug.get(i, k) ^ factor;
                    aug.set(i, k, v);
                }
            }
        }
    }

    let mut inv = Matrix::zeroed(dim, dim);
    for i in 0..dim {
        for j in 0..dim {
            inv.set(i, j, aug.get(i, dim + j));
        }
    }
    Ok(inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Width;
    use crate::numeric::{matrix::mul_vec, Vector};

    #[test]
    fn inverts_the_sample_matrix() {
        let gf = GaloisField::new(Width::W4);
        let mut m = Matrix::zeroed(3, 3);
        let rows: [[i32; 3]; 3] = [[1, 0, 0], [1, 1, 1], [1, 2, 3]];
        for (i, row) in rows.iter().enumerate() {
            m.set_row(i, row);
        }
        let inv = invert(&gf, &m).unwrap();

        let v = Vector::from_cells(vec![3, 11, 9]);
        let mut out = Vector::zeroed(3);
        mul_vec(&gf, &inv, &v, &mut out);
        assert_eq!(out.get(1), 1);
        assert_eq!(out.get(2), 9);
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let gf = GaloisField::new(Width::W8);
        let mut m = Matrix::zeroed(2, 2);
        m.set_row(0, &[1, 1]);
        m.set_row(1, &[2, 2]);
        assert!(matches!(invert(&gf, &m), Err(CodecError::Singular)));
    }

    #[test]
    fn inverse_round_trips_identity() {
        let gf = GaloisField::new(Width::W8);
        let d = crate::matrix_ops::constructors::vandermonde_correct(&gf, 2, 3).unwrap();
        // build [I ; D] and invert an arbitrary k-subset of its rows
        let mut a = Matrix::zeroed(3, 3);
        a.set_row(0, &[1, 0, 0]);
        a.set_row(1, d.row(0));
        a.set_row(2, d.row(1));
        let inv = invert(&gf, &a).unwrap();

        let v = Vector::from_cells(vec![5, 9, 200]);
        let mut coded = Vector::zeroed(3);
        mul_vec(&gf, &a, &v, &mut coded);
        let mut recovered = Vector::zeroed(3);
        mul_vec(&gf, &inv, &coded, &mut recovered);
        assert_eq!(recovered.as_slice(), v.as_slice());
    }
}
