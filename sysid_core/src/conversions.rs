//! `From` implementations bridging `sysid_config` types to `sysid_core` types.

use crate::export::ExportCfg;
use crate::model::ModelSpec;
use crate::recorder::RecorderCfg;

// ── ModelSpec ────────────────────────────────────────────────────────────────

impl From<&sysid_config::ModelCfg> for ModelSpec {
    fn from(c: &sysid_config::ModelCfg) -> Self {
        Self::new(c.include_static_friction, c.include_acceleration)
    }
}

// ── RecorderCfg ──────────────────────────────────────────────────────────────

impl From<&sysid_config::RecorderCfg> for RecorderCfg {
    fn from(c: &sysid_config::RecorderCfg) -> Self {
        Self {
            min_dt_s: c.min_dt_s,
        }
    }
}

// ── ExportCfg ────────────────────────────────────────────────────────────────

impl From<&sysid_config::ExportCfg> for ExportCfg {
    fn from(c: &sysid_config::ExportCfg) -> Self {
        Self {
            precision: c.precision,
        }
    }
}
