//! Measurement records and the append-only store that owns them.

/// One timestamped measurement of the actuator.
///
/// Units are whatever the caller measures in (volts or millivolts, RPM,
/// RPM/s, seconds); the regression is unit-agnostic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub voltage: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub timestamp: f64,
}

impl Sample {
    pub const fn new(voltage: f64, velocity: f64, acceleration: f64, timestamp: f64) -> Self {
        Self {
            voltage,
            velocity,
            acceleration,
            timestamp,
        }
    }
}

/// Anything that accepts recorded samples in order.
pub trait SampleSink {
    fn record(&mut self, sample: Sample);
}

/// Ordered, append-only collection of samples.
///
/// Values are stored as given; NaN or out-of-range readings are not
/// filtered here and surface later as a poor fit or a solver rejection.
#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    samples: Vec<Sample>,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn append(&mut self, voltage: f64, velocity: f64, acceleration: f64, timestamp: f64) {
        self.push(Sample::new(voltage, velocity, acceleration, timestamp));
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Read-only view in insertion order.
    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }
}

impl SampleSink for SampleStore {
    fn record(&mut self, sample: Sample) {
        self.push(sample);
    }
}

impl Extend<Sample> for SampleStore {
    fn extend<I: IntoIterator<Item = Sample>>(&mut self, iter: I) {
        self.samples.extend(iter);
    }
}

impl FromIterator<Sample> for SampleStore {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SampleStore {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
