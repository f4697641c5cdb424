#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Feedforward identification for a velocity-controlled actuator.
//!
//! Samples of `(voltage, velocity, acceleration, timestamp)` are collected
//! while the actuator is driven, then a linear model
//!
//! ```text
//! V = kS * sign(v) + kV * v + kA * a
//! ```
//!
//! is fitted by least squares. The gains feed a feedforward controller.
//!
//! ## Architecture
//!
//! - **Samples**: append-only store (`sample` module)
//! - **Model**: which terms are regressed (`model` module)
//! - **Design**: regressor matrix and response vector (`design` module)
//! - **Solver**: rank-revealing QR least squares (`solver` module)
//! - **Fit**: R² and RMS scoring (`fit` module)
//! - **Identification**: identified/unidentified state machine (`identification` module)
//! - **Recorder**: finite-difference acceleration from a velocity stream (`recorder` module)
//! - **Export**: fixed-precision CSV dump (`export` module)
//!
//! ```
//! use sysid_core::{ModelSpec, SystemIdentification};
//!
//! let mut id = SystemIdentification::new();
//! for i in 0..20 {
//!     let v = f64::from(i) * 0.5 - 4.0;
//!     let a = f64::from(i % 3);
//!     let volts = 0.6 * if v > 0.0 { 1.0 } else { -1.0 } + 0.2 * v + 0.05 * a;
//!     id.append(volts, v, a, f64::from(i) * 0.02);
//! }
//! assert!(id.identify(ModelSpec::FULL));
//! assert!((id.coefficients().kv - 0.2).abs() < 1e-9);
//! ```

pub mod conversions;
pub mod design;
pub mod error;
pub mod export;
pub mod feedforward;
pub mod fit;
pub mod identification;
pub mod model;
pub mod recorder;
pub mod sample;
pub mod solver;

pub use design::{DesignMatrix, MIN_SAMPLES};
pub use error::{ExportError, IdentifyError, Report, Result};
pub use export::{EXPORT_HEADERS, ExportCfg};
pub use feedforward::FeedforwardConstants;
pub use fit::{r_squared, rms_error};
pub use identification::{FitResult, SystemIdentification, fit_samples};
pub use model::{ModelSpec, Term, velocity_sign};
pub use recorder::{AccelerationEstimator, RecorderCfg, SampleRecorder, replay};
pub use sample::{Sample, SampleSink, SampleStore};
pub use solver::solve;

/// Printable identification summary.
pub type IdentificationReport<'a> = identification::Report<'a>;
