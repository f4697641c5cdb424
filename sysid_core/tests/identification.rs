use rstest::rstest;
use sysid_core::{
    FeedforwardConstants, IdentifyError, MIN_SAMPLES, ModelSpec, SystemIdentification,
    velocity_sign,
};

const KS: f64 = 2.0;
const KV: f64 = 0.1;
const KA: f64 = 0.001;

fn voltage_for(c: FeedforwardConstants, v: f64, a: f64) -> f64 {
    c.ks * velocity_sign(v) + c.kv * v + c.ka * a
}

// Forward and reverse ramps with a varying acceleration profile.
fn sweep(c: FeedforwardConstants, n: usize) -> SystemIdentification {
    let mut id = SystemIdentification::with_capacity(n);
    for i in 0..n {
        let t = i as f64 * 0.02;
        let v = (i as f64 - n as f64 / 2.0) * 0.75;
        let a = ((i * 7) % 11) as f64 * 3.0 - 15.0;
        id.append(voltage_for(c, v, a), v, a, t);
    }
    id
}

#[test]
fn noiseless_sweep_recovers_known_gains() {
    let truth = FeedforwardConstants::new(KS, KV, KA);
    let mut id = sweep(truth, 60);
    assert!(id.identify(ModelSpec::FULL));
    assert!(id.is_identified());

    let c = id.coefficients();
    assert!((c.ks - KS).abs() < 1e-6, "ks = {}", c.ks);
    assert!((c.kv - KV).abs() < 1e-6, "kv = {}", c.kv);
    assert!((c.ka - KA).abs() < 1e-6, "ka = {}", c.ka);
    assert!(id.r_squared() >= 0.999);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
fn fewer_than_three_samples_fail(#[case] n: usize) {
    let mut id = SystemIdentification::new();
    for i in 0..n {
        id.append(1.0 + i as f64, 2.0 + i as f64, 0.0, i as f64);
    }
    let err = id.try_identify(ModelSpec::FULL).unwrap_err();
    assert_eq!(err, IdentifyError::InsufficientData { count: n });
    assert!(!id.is_identified());
    assert_eq!(id.coefficients(), FeedforwardConstants::default());
    assert_eq!(id.r_squared(), 0.0);
    assert_eq!(id.predict(5.0, 1.0), 0.0);
}

#[test]
fn three_samples_are_enough_for_velocity_only() {
    let mut id = SystemIdentification::new();
    for v in [1.0, 2.0, 3.0] {
        id.append(0.5 * v, v, 0.0, v);
    }
    assert_eq!(id.count(), MIN_SAMPLES);
    assert!(id.identify(ModelSpec::VELOCITY_ONLY));
    assert!((id.coefficients().kv - 0.5).abs() < 1e-12);
}

#[test]
fn identify_is_idempotent() {
    let mut id = sweep(FeedforwardConstants::new(KS, KV, KA), 40);
    assert!(id.identify(ModelSpec::FULL));
    let first = id.fit().cloned().unwrap();
    assert!(id.identify(ModelSpec::FULL));
    let second = id.fit().cloned().unwrap();
    assert_eq!(first.constants.ks.to_bits(), second.constants.ks.to_bits());
    assert_eq!(first.constants.kv.to_bits(), second.constants.kv.to_bits());
    assert_eq!(first.constants.ka.to_bits(), second.constants.ka.to_bits());
    assert_eq!(first.r_squared.to_bits(), second.r_squared.to_bits());
}

#[test]
fn append_and_clear_invalidate_the_fit() {
    let mut id = sweep(FeedforwardConstants::new(KS, KV, KA), 30);
    assert!(id.identify(ModelSpec::FULL));
    let gains = id.coefficients();

    id.append(1.0, 1.0, 0.0, 99.0);
    assert!(!id.is_identified());
    assert!(id.fit().is_none());
    assert_eq!(id.predict(3.0, 0.0), 0.0);
    // Last-fit values stay readable after invalidation.
    assert_eq!(id.coefficients(), gains);

    assert!(id.identify(ModelSpec::FULL));
    id.clear();
    assert!(!id.is_identified());
    assert_eq!(id.count(), 0);
}

#[test]
fn failed_identify_leaves_unidentified() {
    let mut id = sweep(FeedforwardConstants::new(KS, KV, KA), 30);
    assert!(id.identify(ModelSpec::FULL));
    id.clear();
    id.append(1.0, 1.0, 0.0, 0.0);
    assert!(!id.identify(ModelSpec::FULL));
    assert!(!id.is_identified());
}

#[test]
fn predict_at_rest_is_negative_static_friction() {
    let mut id = sweep(FeedforwardConstants::new(KS, KV, KA), 50);
    assert!(id.identify(ModelSpec::FULL));
    let ks = id.coefficients().ks;
    assert_eq!(id.predict(0.0, 0.0), -ks);
}

#[test]
fn predict_and_error_agree() {
    let mut id = sweep(FeedforwardConstants::new(KS, KV, KA), 50);
    assert!(id.identify(ModelSpec::FULL));
    let p = id.predict(4.0, 2.0);
    assert!((p - voltage_for(id.coefficients(), 4.0, 2.0)).abs() < 1e-12);
    assert!((id.error(10.0, 4.0, 2.0) - (10.0 - p)).abs() < 1e-12);
}

#[test]
fn constant_voltage_scores_zero_or_fails() {
    let mut id = SystemIdentification::new();
    for i in 0..20 {
        let v = i as f64 * 0.3;
        id.append(3.0, v, 0.0, i as f64 * 0.01);
    }
    match id.try_identify(ModelSpec::FULL) {
        Ok(fit) => assert_eq!(fit.r_squared, 0.0),
        Err(e) => assert!(!e.is_insufficient_data(), "unexpected {e}"),
    }
}

#[test]
fn velocity_only_model_pins_inactive_terms() {
    let mut id = SystemIdentification::new();
    for i in 1..=25 {
        let v = i as f64 * 0.4;
        id.append(0.1 * v, v, (i % 4) as f64, i as f64 * 0.02);
    }
    assert!(id.identify(ModelSpec::VELOCITY_ONLY));
    let c = id.coefficients();
    assert_eq!(c.ks, 0.0);
    assert_eq!(c.ka, 0.0);
    assert!((c.kv - 0.1).abs() < 1e-9);
}

#[test]
fn partial_spec_keeps_column_order() {
    let truth = FeedforwardConstants::new(0.0, 0.25, 0.5);
    let mut id = SystemIdentification::new();
    for i in 0..30 {
        let v = i as f64 * 0.5 - 7.0;
        let a = (i % 5) as f64 - 2.0;
        id.append(0.25 * v + 0.5 * a, v, a, i as f64);
    }
    let fit = id.try_identify(ModelSpec::new(false, true)).unwrap();
    assert_eq!(fit.coefficients.len(), 2);
    assert!((fit.constants.kv - truth.kv).abs() < 1e-9);
    assert!((fit.constants.ka - truth.ka).abs() < 1e-9);
    assert_eq!(fit.constants.ks, 0.0);
}

#[test]
fn design_matrix_matches_samples() {
    let mut id = SystemIdentification::new();
    id.append(1.0, -2.0, 0.5, 0.0);
    id.append(2.0, 3.0, -0.5, 0.1);
    let x = id.design_matrix(ModelSpec::FULL);
    assert_eq!((x.nrows(), x.ncols()), (2, 3));
    assert_eq!(x[(0, 0)], -1.0);
    assert_eq!(x[(1, 0)], 1.0);
    assert_eq!(x[(0, 1)], -2.0);
    assert_eq!(x[(1, 2)], -0.5);
    let y = id.response_vector();
    assert_eq!(y.iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0]);
}

#[test]
fn report_text() {
    let mut id = SystemIdentification::new();
    assert_eq!(
        id.report().to_string(),
        "System has not been identified yet.\n"
    );

    let mut fitted = sweep(FeedforwardConstants::new(KS, KV, KA), 40);
    assert!(fitted.identify(ModelSpec::FULL));
    let text = fitted.report().to_string();
    assert!(text.starts_with("=== System Identification Results ===\n"));
    assert!(text.contains("Data points: 40\n"));
    assert!(text.contains("kS (Static Friction): 2.0000\n"));
    assert!(text.contains("kV (Velocity): 0.1000\n"));
    assert!(text.contains("kA (Acceleration): 0.0010\n"));
    assert!(text.contains("Model: V = kS*sign(v) + kV*v + kA*a\n"));

    id.append(0.0, 0.0, 0.0, 0.0);
    assert!(id.report().to_string().contains("not been identified"));
}
