#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and sample-log parsing for the identification tool.
//!
//! - `Config` and its sections are deserialized from TOML and validated.
//!   Every section is optional; an empty document is a valid config.
//! - The sample CSV loader enforces exact headers. Two layouts are accepted:
//!   the full export layout (with acceleration) and a velocity-only layout
//!   where acceleration is derived downstream.
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Header of a full sample log. Identical to the export header.
pub const FULL_HEADERS: [&str; 4] = ["Timestamp", "Voltage", "Velocity", "Acceleration"];
/// Header of a velocity-only sample log.
pub const VELOCITY_HEADERS: [&str; 3] = ["Timestamp", "Voltage", "Velocity"];

/// Regression terms to include when identifying.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct ModelCfg {
    pub include_static_friction: bool,
    pub include_acceleration: bool,
}

impl Default for ModelCfg {
    fn default() -> Self {
        Self {
            include_static_friction: true,
            include_acceleration: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct RecorderCfg {
    /// Readings closer together than this (seconds) yield zero acceleration.
    pub min_dt_s: f64,
}

impl Default for RecorderCfg {
    fn default() -> Self {
        Self { min_dt_s: 1e-6 }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct ExportCfg {
    /// Fixed number of decimals for every numeric CSV field.
    pub precision: usize,
}

impl Default for ExportCfg {
    fn default() -> Self {
        Self { precision: 6 }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct QualityCfg {
    /// Fits scoring below this R² are reported with a warning. Never an error.
    pub min_r_squared: f64,
}

impl Default for QualityCfg {
    fn default() -> Self {
        Self { min_r_squared: 0.9 }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub model: ModelCfg,
    pub recorder: RecorderCfg,
    pub export: ExportCfg,
    pub quality: QualityCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Recorder
        if !(self.recorder.min_dt_s.is_finite() && self.recorder.min_dt_s > 0.0) {
            eyre::bail!("recorder.min_dt_s must be a finite value > 0");
        }

        // Export
        if self.export.precision > 12 {
            eyre::bail!("export.precision must be in [0, 12]");
        }

        // Quality
        let r2 = self.quality.min_r_squared;
        if !(0.0..=1.0).contains(&r2) {
            eyre::bail!("quality.min_r_squared must be in [0.0, 1.0]");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref() {
            if !matches!(rot, "never" | "daily" | "hourly") {
                eyre::bail!("logging.rotation must be one of never|daily|hourly, got {rot:?}");
            }
        }

        Ok(())
    }
}

/// One row of a sample log.
///
/// `acceleration` is `None` for every row of a velocity-only log.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SampleRow {
    #[serde(rename = "Timestamp")]
    pub timestamp: f64,
    #[serde(rename = "Voltage")]
    pub voltage: f64,
    #[serde(rename = "Velocity")]
    pub velocity: f64,
    #[serde(rename = "Acceleration", default)]
    pub acceleration: Option<f64>,
}

/// Parsed sample log, rows in file order.
#[derive(Debug, Clone, Default)]
pub struct SampleLog {
    /// True when the log carried an `Acceleration` column.
    pub has_acceleration: bool,
    pub rows: Vec<SampleRow>,
}

impl SampleLog {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn load_samples_csv(path: &Path) -> eyre::Result<SampleLog> {
    let file = std::fs::File::open(path)
        .map_err(|e| eyre::eyre!("open sample CSV {:?}: {}", path, e))?;
    read_samples_csv(file).map_err(|e| eyre::eyre!("{:?}: {e}", path))
}

pub fn read_samples_csv<R: Read>(reader: R) -> eyre::Result<SampleLog> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers: {e}"))?
        .clone();
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    let has_acceleration = if actual == FULL_HEADERS {
        true
    } else if actual == VELOCITY_HEADERS {
        false
    } else {
        eyre::bail!(
            "sample CSV must have headers '{}' or '{}', got: {}",
            FULL_HEADERS.join(","),
            VELOCITY_HEADERS.join(","),
            actual.join(",")
        );
    };

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<SampleRow>().enumerate() {
        match rec {
            Ok(row) => {
                if has_acceleration && row.acceleration.is_none() {
                    eyre::bail!("invalid CSV row {}: missing Acceleration value", idx + 2);
                }
                rows.push(row);
            }
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }

    Ok(SampleLog {
        has_acceleration,
        rows,
    })
}
