//! Goodness-of-fit metrics.

/// Responses whose total sum of squares falls below this are treated as
/// constant and score `0.0`.
pub const TSS_EPSILON: f64 = 1e-10;

/// Coefficient of determination, `1 − RSS/TSS`.
///
/// Returns `0.0` for empty or mismatched inputs and for a near-constant
/// `actual` (TSS below [`TSS_EPSILON`]). May be negative for a model that
/// fits worse than the mean.
pub fn r_squared(predicted: &[f64], actual: &[f64]) -> f64 {
    if predicted.len() != actual.len() || actual.is_empty() {
        return 0.0;
    }
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let tss: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    // `!(tss >= eps)` also routes NaN here
    if !(tss >= TSS_EPSILON) {
        return 0.0;
    }
    let rss: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    1.0 - rss / tss
}

/// Root mean squared residual. `0.0` for empty or mismatched inputs.
pub fn rms_error(predicted: &[f64], actual: &[f64]) -> f64 {
    if predicted.len() != actual.len() || actual.is_empty() {
        return 0.0;
    }
    let rss: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    (rss / actual.len() as f64).sqrt()
}
