//! Human-readable error descriptions and structured JSON error formatting.

use sysid_core::{ExportError, IdentifyError, MIN_SAMPLES};

pub fn identify_error_name(e: &IdentifyError) -> &'static str {
    match e {
        IdentifyError::InsufficientData { .. } => "InsufficientData",
        IdentifyError::Underdetermined { .. } => "Underdetermined",
        IdentifyError::DimensionMismatch { .. } => "DimensionMismatch",
        IdentifyError::NoColumns => "NoColumns",
        IdentifyError::NonFiniteInput { .. } => "NonFiniteInput",
        IdentifyError::NonFiniteSolution => "NonFiniteSolution",
    }
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(ie) = err.downcast_ref::<IdentifyError>() {
        return match ie {
            IdentifyError::InsufficientData { count } => format!(
                "What happened: Not enough samples to identify ({count} recorded, {MIN_SAMPLES} required).\nLikely causes: Empty or truncated sample log; a velocity-only log spends one row per voltage level priming the acceleration estimate.\nHow to fix: Record a longer sweep covering several voltage levels."
            ),
            IdentifyError::Underdetermined { rows, cols } => format!(
                "What happened: Fewer samples ({rows}) than model terms ({cols}).\nLikely causes: Very short sample log.\nHow to fix: Record more samples or drop terms with --no-static-friction / --no-acceleration."
            ),
            IdentifyError::NonFiniteInput { row, col } => format!(
                "What happened: Sample data contains NaN or infinity (row {row}, column {col} of the design matrix).\nLikely causes: Sensor dropouts logged as NaN, or a corrupted log.\nHow to fix: Filter out non-finite rows before identifying."
            ),
            IdentifyError::NonFiniteSolution
            | IdentifyError::NoColumns
            | IdentifyError::DimensionMismatch { .. } => format!(
                "What happened: The regression is degenerate ({ie}).\nLikely causes: The sweep does not excite the model terms (constant voltage, one direction only, no acceleration changes).\nHow to fix: Sweep both directions at several speeds, or drop unexcited terms."
            ),
        };
    }

    if let Some(ee) = err.downcast_ref::<ExportError>() {
        return format!(
            "What happened: Could not write the sample export ({ee}).\nLikely causes: Missing directory or no write permission.\nHow to fix: Point --export at a writable path."
        );
    }

    // String-based heuristics for errors coming from config or sample loading
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("sample csv must have headers") {
        return "Invalid headers in sample CSV. Expected 'Timestamp,Voltage,Velocity,Acceleration' or 'Timestamp,Voltage,Velocity'.".to_string();
    }

    if lower.contains("open sample csv") {
        return format!(
            "What happened: The sample log could not be opened.\nLikely causes: Wrong path or missing file.\nHow to fix: Check the --samples argument. Original: {msg}"
        );
    }

    if lower.contains("invalid csv row") {
        return format!(
            "What happened: The sample log has a malformed row ({msg}).\nLikely causes: Non-numeric or missing fields.\nHow to fix: Fix or remove the offending row."
        );
    }

    if lower.contains("invalid configuration") {
        return format!(
            "What happened: Configuration is invalid ({msg}).\nLikely causes: Out-of-range values or wrong types in the TOML.\nHow to fix: Edit the config file, then rerun."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Identification failures get stable exit codes; everything else is 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match err.downcast_ref::<IdentifyError>() {
        Some(e) if e.is_insufficient_data() => 3,
        Some(_) => 4,
        None => 1,
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    if let Some(ie) = err.downcast_ref::<IdentifyError>() {
        let msg = humanize(err);
        let details = match ie {
            IdentifyError::InsufficientData { count } => {
                Some(json!({ "count": count, "min_samples": MIN_SAMPLES }))
            }
            IdentifyError::Underdetermined { rows, cols } => {
                Some(json!({ "rows": rows, "cols": cols }))
            }
            IdentifyError::NonFiniteInput { row, col } => Some(json!({ "row": row, "col": col })),
            _ => None,
        };
        let obj = if let Some(d) = details {
            json!({ "reason": identify_error_name(ie), "details": d, "message": msg })
        } else {
            json!({ "reason": identify_error_name(ie), "message": msg })
        };
        return obj.to_string();
    }

    // Generic error JSON
    json!({ "reason": "Error", "message": humanize(err) }).to_string()
}
