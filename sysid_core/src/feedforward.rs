//! Identified feedforward gains.

use crate::model::{ModelSpec, Term, velocity_sign};

/// `V = kS·sign(v) + kV·v + kA·a`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeedforwardConstants {
    /// Static friction
    pub ks: f64,
    /// Velocity
    pub kv: f64,
    /// Acceleration
    pub ka: f64,
}

impl FeedforwardConstants {
    pub const fn new(ks: f64, kv: f64, ka: f64) -> Self {
        Self { ks, kv, ka }
    }

    /// Map a coefficient vector laid out by `spec` back onto named gains.
    /// Inactive terms are exactly `0.0`.
    ///
    /// Returns `None` if `coefficients.len() != spec.column_count()`.
    pub fn from_coefficients(spec: ModelSpec, coefficients: &[f64]) -> Option<Self> {
        if coefficients.len() != spec.column_count() {
            return None;
        }
        let mut out = Self::default();
        for (term, &c) in spec.terms().zip(coefficients) {
            match term {
                Term::StaticFriction => out.ks = c,
                Term::Velocity => out.kv = c,
                Term::Acceleration => out.ka = c,
            }
        }
        Some(out)
    }

    /// Feedforward voltage. Zero velocity takes the `-kS` branch.
    #[inline]
    pub fn calculate(&self, velocity: f64, acceleration: f64) -> f64 {
        self.ks * velocity_sign(velocity) + self.kv * velocity + self.ka * acceleration
    }
}
