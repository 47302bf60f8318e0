//! Distribution-matrix constructors: raw Vandermonde, corrected Vandermonde
//! (identity top block), Cauchy.

use crate::error::CodecError;
use crate::field::GaloisField;
use crate::numeric::Matrix;

/// `mat[i][j] = (j+1)^i` over GF. Not itself MDS for every k,m; used as a
/// building block for the corrected construction and directly where a raw
/// Vandermonde matrix is needed.
pub fn vandermonde(gf: &GaloisField, n_rows: usize, n_cols: usize) -> Matrix {
    let mut mat = Matrix::zeroed(n_rows, n_cols);
    for i in 0..n_rows {
        for j in 0..n_cols {
            mat.set(i, j, gf.exp((j + 1) as i32, i as u32));
        }
    }
    mat
}

/// Rescales column `i` by `f_i_i^-1` so the pivot cell becomes 1.
fn rescale_pivot_column(gf: &GaloisField, tmp: &mut Matrix, i: usize) -> Result<(), CodecError> {
    let f_inv = gf.div(1, tmp.get(i, i))?;
    for k in 0..tmp.n_rows() {
        let v = tmp.get(k, i);
        tmp.set(k, i, gf.mul(f_inv, v));
    }
    Ok(())
}

/// Cancels row `i`'s entry in column `j` by subtracting the appropriate
/// multiple of column `i` from column `j`.
fn cancel_row_entry(gf: &GaloisField, tmp: &mut Matrix, i: usize, j: usize) {
    let f_i_j = tmp.get(i, j);
    for k in 0..tmp.n_rows() {
        let a = tmp.get(k, j);
        let b = gf.mul(f_i_j, tmp.get(k, i));
        tmp.set(k, j, a ^ b);
    }
}

/// Builds the `(n_rows+n_cols) x n_cols` matrix whose top `n_cols` rows are
/// the identity, returning only the bottom `n_rows` rows: the distribution
/// matrix `D`. The scratch matrix is an ordinary owned value, dropped at the
/// end of this function once its cells are no longer needed.
pub fn vandermonde_correct(
    gf: &GaloisField,
    n_rows: usize,
    n_cols: usize,
) -> Result<Matrix, CodecError> {
    let dim = n_rows + n_cols;
    let mut tmp = Matrix::zeroed(dim, n_cols);
    for i in 0..dim {
        for j in 0..n_cols {
            tmp.set(i, j, gf.exp(i as i32, j as u32));
        }
    }

    // Drive rows 0..n_cols to the identity via column operations. A
    // zero-pivot case is unreachable for these row/column indices and is
    // not handled.
    let mut i = 0;
    while i < n_cols {
        if tmp.is_row_identity(i) {
            i += 1;
            continue;
        }
        if tmp.get(i, i) != 1 {
            rescale_pivot_column(gf, &mut tmp, i)?;
        }
        for j in 0..n_cols {
            if i != j && tmp.get(i, j) != 0 {
                cancel_row_entry(gf, &mut tmp, i, j);
            }
        }
        i += 1;
    }

    let mut mat = Matrix::zeroed(n_rows, n_cols);
    for i in 0..n_rows {
        mat.set_row(i, tmp.row(n_cols + i));
    }
    Ok(mat)
}

/// `mat[i][j] = 1 / (i XOR (j + n_rows))`, then normalized so the first row
/// and first column are all-ones.
pub fn cauchy(gf: &GaloisField, n_rows: usize, n_cols: usize) -> Result<Matrix, CodecError> {
    let mut mat = Matrix::zeroed(n_rows, n_cols);
    for i in 0..n_rows {
        for j in 0..n_cols {
            let denom = (i ^ (j + n_rows)) as i32;
            mat.set(i, j, gf.div(1, denom)?);
        }
    }

    // force the first row to all-ones: divide every column by its row-0 entry
    for j in 0..n_cols {
        let top = mat.get(0, j);
        for i in 0..n_rows {
            let v = mat.get(i, j);
            mat.set(i, j, gf.div(v, top)?);
        }
    }
    // force the first column to all-ones: divide every row by its column-0 entry
    for i in 1..n_rows {
        let left = mat.get(i, 0);
        for j in 0..n_cols {
            let v = mat.get(i, j);
            mat.set(i, j, gf.div(v, left)?);
        }
    }

    Ok(mat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Width;
    use crate::numeric::Vector;

    #[test]
    fn raw_vandermonde_matches_concrete_scenario() {
        let gf = GaloisField::new(Width::W4);
        let mat = vandermonde(&gf, 3, 3);

        let mut out = Vector::zeroed(3);
        let v = Vector::from_cells(vec![3, 13, 9]);
        crate::numeric::matrix::mul_vec(&gf, &mat, &v, &mut out);
        assert_eq!(out.as_slice(), &[7, 2, 9]);

        let v2 = Vector::from_cells(vec![3, 1, 9]);
        crate::numeric::matrix::mul_vec(&gf, &mat, &v2, &mut out);
        assert_eq!(out.as_slice(), &[11, 9, 12]);
    }

    #[test]
    fn corrected_vandermonde_has_identity_top_block() {
        for (k, m) in [(1, 1), (3, 3), (5, 2), (2, 5)] {
            let gf = GaloisField::new(Width::W8);
            // build the full (k+m) x k matrix the same way, to check the top block
            let dim = k + m;
            let mut tmp = Matrix::zeroed(dim, k);
            for i in 0..dim {
                for j in 0..k {
                    tmp.set(i, j, gf.exp(i as i32, j as u32));
                }
            }
            let mut i = 0;
            while i < k {
                if !tmp.is_row_identity(i) {
                    if tmp.get(i, i) != 1 {
                        rescale_pivot_column(&gf, &mut tmp, i).unwrap();
                    }
                    for j in 0..k {
                        if i != j && tmp.get(i, j) != 0 {
                            cancel_row_entry(&gf, &mut tmp, i, j);
                        }
                    }
                }
                i += 1;
            }
            for row in 0..k {
                assert!(tmp.is_row_identity(row), "k={} m={} row={}", k, m, row);
            }
            let d = vandermonde_correct(&gf, m, k).unwrap();
            assert_eq!(d.n_rows(), m);
            assert_eq!(d.n_cols(), k);
        }
    }

    #[test]
    fn cauchy_first_row_and_column_are_all_ones() {
        let gf = GaloisField::new(Width::W4);
        let mat = cauchy(&gf, 3, 3).unwrap();
        for j in 0..3 {
            assert_eq!(mat.get(0, j), 1);
        }
        for i in 0..3 {
            assert_eq!(mat.get(i, 0), 1);
        }
    }
}
