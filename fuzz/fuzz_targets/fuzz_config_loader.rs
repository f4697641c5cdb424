#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parse errors and validation errors are both fine; panics are not.
    if let Ok(cfg) = sysid_config::load_toml(data) {
        if cfg.validate().is_ok() {
            assert!(cfg.recorder.min_dt_s > 0.0);
            assert!(cfg.export.precision <= 12);
        }
    }
});
