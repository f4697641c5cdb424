//! Design matrix construction.

use nalgebra::{DMatrix, DVector};

use crate::error::IdentifyError;
use crate::model::{ModelSpec, Term};
use crate::sample::Sample;

/// Fewest samples a regression is attempted on.
pub const MIN_SAMPLES: usize = 3;

/// Regression inputs built from a sample snapshot.
///
/// `x` has one row per sample and one column per active term of `spec`;
/// `y` holds the recorded voltages in the same row order.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix {
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
    pub spec: ModelSpec,
}

impl DesignMatrix {
    #[inline]
    pub fn rows(&self) -> usize {
        self.x.nrows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.x.ncols()
    }
}

/// Build `(X, y)` for `spec`. Rejects fewer than [`MIN_SAMPLES`] samples.
pub fn build(samples: &[Sample], spec: ModelSpec) -> Result<DesignMatrix, IdentifyError> {
    if samples.len() < MIN_SAMPLES {
        return Err(IdentifyError::InsufficientData {
            count: samples.len(),
        });
    }
    Ok(DesignMatrix {
        x: regressors(samples, spec),
        y: response(samples),
        spec,
    })
}

/// Design matrix alone, without the sample-count guard.
pub fn regressors(samples: &[Sample], spec: ModelSpec) -> DMatrix<f64> {
    let terms: Vec<Term> = spec.terms().collect();
    DMatrix::from_fn(samples.len(), terms.len(), |row, col| {
        terms[col].value(&samples[row])
    })
}

/// Response vector alone: recorded voltages in row order.
pub fn response(samples: &[Sample]) -> DVector<f64> {
    DVector::from_iterator(samples.len(), samples.iter().map(|s| s.voltage))
}
