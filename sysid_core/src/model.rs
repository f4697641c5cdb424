//! Regression term selection.
//!
//! The term set is closed: static friction and acceleration can be toggled,
//! velocity is always present. Column order is fixed as
//! `[sign(v)?, v, a?]` and is shared by fitting and prediction.

use crate::sample::Sample;

/// Sign used by the static-friction term.
///
/// `+1` for strictly positive velocity, `-1` otherwise. Zero (and NaN)
/// velocity therefore resolves to `-1`, in both the design matrix and
/// [`FeedforwardConstants::calculate`](crate::FeedforwardConstants::calculate).
#[inline]
pub fn velocity_sign(velocity: f64) -> f64 {
    if velocity > 0.0 { 1.0 } else { -1.0 }
}

/// One regression column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    StaticFriction,
    Velocity,
    Acceleration,
}

impl Term {
    /// Design-matrix cell for this term.
    #[inline]
    pub fn value(self, sample: &Sample) -> f64 {
        match self {
            Self::StaticFriction => velocity_sign(sample.velocity),
            Self::Velocity => sample.velocity,
            Self::Acceleration => sample.acceleration,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::StaticFriction => "kS",
            Self::Velocity => "kV",
            Self::Acceleration => "kA",
        }
    }
}

/// Which optional terms are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelSpec {
    pub include_static_friction: bool,
    pub include_acceleration: bool,
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self::FULL
    }
}

impl ModelSpec {
    /// `kS·sign(v) + kV·v + kA·a`
    pub const FULL: Self = Self::new(true, true);
    /// `kV·v`
    pub const VELOCITY_ONLY: Self = Self::new(false, false);

    pub const fn new(include_static_friction: bool, include_acceleration: bool) -> Self {
        Self {
            include_static_friction,
            include_acceleration,
        }
    }

    /// Active terms in column order.
    pub fn terms(self) -> impl Iterator<Item = Term> {
        let ks = self.include_static_friction.then_some(Term::StaticFriction);
        let ka = self.include_acceleration.then_some(Term::Acceleration);
        ks.into_iter()
            .chain(std::iter::once(Term::Velocity))
            .chain(ka)
    }

    /// Number of design-matrix columns (1..=3).
    pub const fn column_count(self) -> usize {
        1 + self.include_static_friction as usize + self.include_acceleration as usize
    }
}
