//! Identification state machine and prediction.
//!
//! [`SystemIdentification`] owns the samples of one characterization pass.
//! It starts *unidentified*; a successful [`identify`](SystemIdentification::identify)
//! makes it *identified* until the next `append`, `clear` or failed identify.
//! A fit is only valid for the exact sample snapshot that produced it.

use std::fmt;
use std::path::Path;

use nalgebra::{DMatrix, DVector};

use crate::design;
use crate::error::{ExportError, IdentifyError};
use crate::export::{self, ExportCfg};
use crate::feedforward::FeedforwardConstants;
use crate::fit;
use crate::model::ModelSpec;
use crate::sample::{Sample, SampleSink, SampleStore};
use crate::solver;

/// Outcome of one successful regression.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub constants: FeedforwardConstants,
    /// Raw solution in column order of `spec`.
    pub coefficients: Vec<f64>,
    pub r_squared: f64,
    pub rms_error: f64,
    pub sample_count: usize,
    pub spec: ModelSpec,
}

/// Run the full pipeline on a sample snapshot: design matrix, solve, score.
pub fn fit_samples(samples: &[Sample], spec: ModelSpec) -> Result<FitResult, IdentifyError> {
    let dm = design::build(samples, spec)?;
    let beta = solver::solve(&dm.x, &dm.y)?;
    let constants = FeedforwardConstants::from_coefficients(spec, beta.as_slice()).ok_or(
        IdentifyError::DimensionMismatch {
            rows: dm.cols(),
            len: beta.len(),
        },
    )?;
    let predicted = &dm.x * &beta;
    Ok(FitResult {
        constants,
        coefficients: beta.iter().copied().collect(),
        r_squared: fit::r_squared(predicted.as_slice(), dm.y.as_slice()),
        rms_error: fit::rms_error(predicted.as_slice(), dm.y.as_slice()),
        sample_count: dm.rows(),
        spec,
    })
}

#[derive(Debug, Clone, Default)]
pub struct SystemIdentification {
    store: SampleStore,
    last_fit: Option<FitResult>,
    identified: bool,
}

impl SystemIdentification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: SampleStore::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Add one measurement. Invalidates any previous fit.
    pub fn append(&mut self, voltage: f64, velocity: f64, acceleration: f64, timestamp: f64) {
        self.push(Sample::new(voltage, velocity, acceleration, timestamp));
    }

    pub fn push(&mut self, sample: Sample) {
        self.store.push(sample);
        self.identified = false;
    }

    /// Drop all samples. Invalidates any previous fit.
    pub fn clear(&mut self) {
        self.store.clear();
        self.identified = false;
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.store.count()
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        self.store.samples()
    }

    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    /// Fit the model selected by `spec`. Returns `false` on any failure.
    pub fn identify(&mut self, spec: ModelSpec) -> bool {
        self.try_identify(spec).is_ok()
    }

    /// Like [`identify`](Self::identify) but keeps the reason for failure.
    pub fn try_identify(&mut self, spec: ModelSpec) -> Result<&FitResult, IdentifyError> {
        self.identified = false;
        tracing::debug!(
            samples = self.store.count(),
            columns = spec.column_count(),
            static_friction = spec.include_static_friction,
            acceleration = spec.include_acceleration,
            "identify start"
        );
        let fit = match fit_samples(self.store.samples(), spec) {
            Ok(fit) => fit,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    insufficient_data = e.is_insufficient_data(),
                    "identification failed"
                );
                return Err(e);
            }
        };
        tracing::info!(
            ks = fit.constants.ks,
            kv = fit.constants.kv,
            ka = fit.constants.ka,
            r_squared = fit.r_squared,
            samples = fit.sample_count,
            "identification complete"
        );
        self.identified = true;
        Ok(&*self.last_fit.insert(fit))
    }

    #[inline]
    pub fn is_identified(&self) -> bool {
        self.identified
    }

    /// Current fit, `None` while unidentified.
    pub fn fit(&self) -> Option<&FitResult> {
        self.last_fit.as_ref().filter(|_| self.identified)
    }

    /// Gains of the most recent successful fit, even if since invalidated.
    /// All zero before the first success.
    pub fn coefficients(&self) -> FeedforwardConstants {
        self.last_fit
            .as_ref()
            .map(|f| f.constants)
            .unwrap_or_default()
    }

    /// R² of the most recent successful fit, `0.0` before the first success.
    pub fn r_squared(&self) -> f64 {
        self.last_fit.as_ref().map_or(0.0, |f| f.r_squared)
    }

    /// Predicted voltage; `0.0` while unidentified.
    pub fn predict(&self, velocity: f64, acceleration: f64) -> f64 {
        self.fit()
            .map_or(0.0, |f| f.constants.calculate(velocity, acceleration))
    }

    /// `actual_voltage - predict(velocity, acceleration)`
    pub fn error(&self, actual_voltage: f64, velocity: f64, acceleration: f64) -> f64 {
        actual_voltage - self.predict(velocity, acceleration)
    }

    /// Design matrix of the current samples for `spec`, without the
    /// minimum-sample guard.
    pub fn design_matrix(&self, spec: ModelSpec) -> DMatrix<f64> {
        design::regressors(self.store.samples(), spec)
    }

    pub fn response_vector(&self) -> DVector<f64> {
        design::response(self.store.samples())
    }

    pub fn report(&self) -> Report<'_> {
        Report {
            sample_count: self.count(),
            fit: self.fit(),
        }
    }

    pub fn write_csv<W: std::io::Write>(
        &self,
        writer: W,
        cfg: ExportCfg,
    ) -> Result<(), ExportError> {
        export::write_csv(self.store.samples(), writer, cfg)
    }

    /// Write the samples to `path`. `false` if the file could not be written.
    pub fn export_csv(&self, path: &Path, cfg: ExportCfg) -> bool {
        match export::export_csv(self.store.samples(), path, cfg) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "export failed");
                false
            }
        }
    }
}

impl SampleSink for SystemIdentification {
    fn record(&mut self, sample: Sample) {
        self.push(sample);
    }
}

/// Human-readable summary of an identification.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    sample_count: usize,
    fit: Option<&'a FitResult>,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(fit) = self.fit else {
            return writeln!(f, "System has not been identified yet.");
        };
        let c = fit.constants;
        writeln!(f, "=== System Identification Results ===")?;
        writeln!(f, "Data points: {}", self.sample_count)?;
        writeln!(f, "R-squared: {:.4}", fit.r_squared)?;
        writeln!(f, "RMS error: {:.4}", fit.rms_error)?;
        writeln!(f)?;
        writeln!(f, "Feedforward Constants:")?;
        writeln!(f, "kS (Static Friction): {:.4}", c.ks)?;
        writeln!(f, "kV (Velocity): {:.4}", c.kv)?;
        writeln!(f, "kA (Acceleration): {:.4}", c.ka)?;
        writeln!(f)?;
        writeln!(f, "Model: V = kS*sign(v) + kV*v + kA*a")?;
        writeln!(f, "=====================================")
    }
}
