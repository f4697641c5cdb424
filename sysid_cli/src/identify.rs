//! Command execution: sample log loading, identification, prediction, export.

use std::path::Path;

use eyre::WrapErr;
use serde_json::json;
use sysid_config::Config;
use sysid_core::{ExportCfg, FitResult, ModelSpec, SystemIdentification};

use crate::cli::ModelArgs;

/// Regression terms from config, narrowed by CLI flags. Flags can only drop terms.
pub fn model_spec(cfg: &Config, args: &ModelArgs) -> ModelSpec {
    let base = ModelSpec::from(&cfg.model);
    ModelSpec::new(
        base.include_static_friction && !args.no_static_friction,
        base.include_acceleration && !args.no_acceleration,
    )
}

/// Load a sample log into a fresh identification session.
pub fn load_session(cfg: &Config, path: &Path) -> eyre::Result<SystemIdentification> {
    let log = sysid_config::load_samples_csv(path)?;
    let mut id = SystemIdentification::with_capacity(log.len());
    let recorded = sysid_core::replay(&log, (&cfg.recorder).into(), &mut id);
    tracing::info!(
        path = %path.display(),
        rows = log.len(),
        recorded,
        acceleration_column = log.has_acceleration,
        "sample log loaded"
    );
    Ok(id)
}

fn fit_session(cfg: &Config, args: &ModelArgs) -> eyre::Result<(SystemIdentification, FitResult)> {
    let mut id = load_session(cfg, &args.samples)?;
    let fit = id.try_identify(model_spec(cfg, args))?.clone();
    if fit.r_squared < cfg.quality.min_r_squared {
        tracing::warn!(
            r_squared = fit.r_squared,
            min_r_squared = cfg.quality.min_r_squared,
            "poor fit quality; check the sweep covers both directions and several speeds"
        );
    }
    Ok((id, fit))
}

pub fn run_identify(
    cfg: &Config,
    args: &ModelArgs,
    export: Option<&Path>,
    json: bool,
) -> eyre::Result<()> {
    let (id, fit) = fit_session(cfg, args)?;

    if let Some(path) = export {
        let export_cfg = ExportCfg::from(&cfg.export);
        sysid_core::export::export_csv(id.samples(), path, export_cfg)
            .wrap_err_with(|| format!("export samples to {}", path.display()))?;
    }

    if json {
        let c = fit.constants;
        let obj = json!({
            "ks": c.ks,
            "kv": c.kv,
            "ka": c.ka,
            "r_squared": fit.r_squared,
            "rms_error": fit.rms_error,
            "samples": fit.sample_count,
            "identified": id.is_identified(),
        });
        println!("{obj}");
    } else {
        print!("{}", id.report());
    }
    Ok(())
}

pub fn run_predict(
    cfg: &Config,
    args: &ModelArgs,
    velocity: f64,
    acceleration: f64,
    json: bool,
) -> eyre::Result<()> {
    let (id, fit) = fit_session(cfg, args)?;
    let voltage = id.predict(velocity, acceleration);
    tracing::debug!(velocity, acceleration, voltage, "predicted");

    if json {
        let c = fit.constants;
        let obj = json!({
            "velocity": velocity,
            "acceleration": acceleration,
            "voltage": voltage,
            "ks": c.ks,
            "kv": c.kv,
            "ka": c.ka,
            "r_squared": fit.r_squared,
        });
        println!("{obj}");
    } else {
        println!("Predicted voltage: {voltage:.6}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(no_sf: bool, no_acc: bool) -> ModelArgs {
        ModelArgs {
            samples: PathBuf::from("unused.csv"),
            no_static_friction: no_sf,
            no_acceleration: no_acc,
        }
    }

    #[test]
    fn flags_only_drop_terms() {
        let mut cfg = Config::default();
        assert_eq!(model_spec(&cfg, &args(false, false)), ModelSpec::FULL);
        assert_eq!(
            model_spec(&cfg, &args(true, true)),
            ModelSpec::VELOCITY_ONLY
        );

        cfg.model.include_acceleration = false;
        assert_eq!(
            model_spec(&cfg, &args(false, false)),
            ModelSpec::new(true, false)
        );
    }
}
