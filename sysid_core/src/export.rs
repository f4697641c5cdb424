//! Flat CSV export of recorded samples.
//!
//! Layout: one header row `Timestamp,Voltage,Velocity,Acceleration`, then one
//! row per sample in insertion order, every field rendered with a fixed number
//! of decimals. Nothing in this crate reads the format back.

use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::sample::Sample;

pub const EXPORT_HEADERS: [&str; 4] = ["Timestamp", "Voltage", "Velocity", "Acceleration"];

#[derive(Debug, Clone, Copy)]
pub struct ExportCfg {
    /// Decimals per numeric field.
    pub precision: usize,
}

impl Default for ExportCfg {
    fn default() -> Self {
        Self { precision: 6 }
    }
}

pub fn write_csv<W: Write>(
    samples: &[Sample],
    writer: W,
    cfg: ExportCfg,
) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    wtr.write_record(EXPORT_HEADERS)?;
    let p = cfg.precision;
    for s in samples {
        wtr.write_record([
            format!("{:.*}", p, s.timestamp),
            format!("{:.*}", p, s.voltage),
            format!("{:.*}", p, s.velocity),
            format!("{:.*}", p, s.acceleration),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_csv(samples: &[Sample], path: &Path, cfg: ExportCfg) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_csv(samples, std::io::BufWriter::new(file), cfg)?;
    tracing::info!(path = %path.display(), rows = samples.len(), "samples exported");
    Ok(())
}
