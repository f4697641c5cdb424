//! Acceleration estimation from a velocity stream.
//!
//! Acceleration is the backward difference of the two most recent
//! `(timestamp, velocity)` readings. The first reading after a reset only
//! primes the estimator; no sample is produced for it.

use sysid_config::SampleLog;

use crate::sample::{Sample, SampleSink};

/// Recorder tuning.
#[derive(Debug, Clone, Copy)]
pub struct RecorderCfg {
    /// Readings closer than this (seconds) give zero acceleration.
    pub min_dt_s: f64,
}

impl Default for RecorderCfg {
    fn default() -> Self {
        Self { min_dt_s: 1e-6 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccelerationEstimator {
    cfg: RecorderCfg,
    last: Option<(f64, f64)>,
}

impl AccelerationEstimator {
    pub fn new(cfg: RecorderCfg) -> Self {
        Self { cfg, last: None }
    }

    /// Feed one reading. `None` until a previous reading exists.
    ///
    /// A step shorter than `min_dt_s`, negative or NaN yields `Some(0.0)`.
    pub fn observe(&mut self, timestamp: f64, velocity: f64) -> Option<f64> {
        let prev = self.last.replace((timestamp, velocity));
        let (t0, v0) = prev?;
        let dt = timestamp - t0;
        if !(dt >= self.cfg.min_dt_s) {
            return Some(0.0);
        }
        Some((velocity - v0) / dt)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Turns `(voltage, velocity, timestamp)` readings into samples.
#[derive(Debug, Clone, Default)]
pub struct SampleRecorder {
    estimator: AccelerationEstimator,
}

impl SampleRecorder {
    pub fn new(cfg: RecorderCfg) -> Self {
        Self {
            estimator: AccelerationEstimator::new(cfg),
        }
    }

    /// Record one reading into `sink` once an acceleration is available.
    pub fn record<S: SampleSink + ?Sized>(
        &mut self,
        sink: &mut S,
        voltage: f64,
        velocity: f64,
        timestamp: f64,
    ) -> Option<Sample> {
        let acceleration = self.estimator.observe(timestamp, velocity)?;
        let sample = Sample::new(voltage, velocity, acceleration, timestamp);
        tracing::trace!(voltage, velocity, acceleration, timestamp, "sample recorded");
        sink.record(sample);
        Some(sample)
    }

    /// Start a new test level; the next reading only primes the estimator.
    pub fn reset(&mut self) {
        self.estimator.reset();
    }
}

/// Push every row of `log` into `sink`, returning how many samples were
/// recorded.
///
/// Rows with an acceleration are taken as-is. For a velocity-only log the
/// acceleration is estimated, restarting whenever the applied voltage
/// changes, so one priming row per voltage level is consumed.
pub fn replay<S: SampleSink + ?Sized>(log: &SampleLog, cfg: RecorderCfg, sink: &mut S) -> usize {
    let mut recorder = SampleRecorder::new(cfg);
    let mut level: Option<f64> = None;
    let mut recorded = 0;
    for row in &log.rows {
        if let Some(acceleration) = row.acceleration {
            sink.record(Sample::new(
                row.voltage,
                row.velocity,
                acceleration,
                row.timestamp,
            ));
            recorded += 1;
            continue;
        }
        if level.is_some_and(|v| v.to_bits() != row.voltage.to_bits()) {
            recorder.reset();
        }
        level = Some(row.voltage);
        if recorder
            .record(sink, row.voltage, row.velocity, row.timestamp)
            .is_some()
        {
            recorded += 1;
        }
    }
    tracing::debug!(rows = log.rows.len(), recorded, "sample log replayed");
    recorded
}
