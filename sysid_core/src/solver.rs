//! Least-squares solve via column-pivoted Householder QR.
//!
//! `X·P = Q·R` is factored once; the coefficients come from back-substituting
//! `R·z = Qᵀ·y` and undoing the column permutation. The normal equations are
//! never formed, so collinear columns (for example a sweep that never
//! decelerates) cost accuracy in the affected direction only.
//!
//! Rank deficiency is not an error. A pivot with
//! `|r_ii| <= max|r_jj| · n · ε` marks a dependent direction; its coefficient
//! is pinned to zero and the remaining ones absorb the fit. Only non-finite
//! output is rejected.

use nalgebra::{DMatrix, DVector};

use crate::error::IdentifyError;

/// Solve `min ‖X·β − y‖²`.
pub fn solve(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, IdentifyError> {
    let (rows, cols) = x.shape();
    if cols == 0 {
        return Err(IdentifyError::NoColumns);
    }
    if rows < cols {
        return Err(IdentifyError::Underdetermined { rows, cols });
    }
    if y.len() != rows {
        return Err(IdentifyError::DimensionMismatch {
            rows,
            len: y.len(),
        });
    }
    // Storage is column-major
    if let Some(idx) = x.iter().position(|v| !v.is_finite()) {
        return Err(IdentifyError::NonFiniteInput {
            row: idx % rows,
            col: idx / rows,
        });
    }

    let (q, r, p) = x.clone().col_piv_qr().unpack();
    let qty = q.tr_mul(y);
    let threshold = rank_threshold(&r);

    let mut beta = DVector::<f64>::zeros(cols);
    for i in (0..cols).rev() {
        let pivot = r[(i, i)];
        if pivot.abs() <= threshold {
            tracing::debug!(pivot_index = i, pivot, threshold, "dropping dependent column");
            continue;
        }
        let tail: f64 = ((i + 1)..cols).map(|j| r[(i, j)] * beta[j]).sum();
        beta[i] = (qty[i] - tail) / pivot;
    }
    p.inv_permute_rows(&mut beta);

    if beta.iter().any(|b| !b.is_finite()) {
        return Err(IdentifyError::NonFiniteSolution);
    }
    Ok(beta)
}

/// Pivots at or below this magnitude count as zero.
fn rank_threshold(r: &DMatrix<f64>) -> f64 {
    let k = r.nrows().min(r.ncols());
    let max_pivot = (0..k).map(|i| r[(i, i)].abs()).fold(0.0, f64::max);
    max_pivot * (k as f64) * f64::EPSILON
}
