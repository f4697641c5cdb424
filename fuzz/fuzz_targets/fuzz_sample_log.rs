#![no_main]
use libfuzzer_sys::fuzz_target;
use sysid_core::{ModelSpec, RecorderCfg, SystemIdentification};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes through the CSV loader and the full identify pipeline.
    let Ok(log) = sysid_config::read_samples_csv(data) else {
        return;
    };
    let mut id = SystemIdentification::new();
    sysid_core::replay(&log, RecorderCfg::default(), &mut id);
    if let Ok(fit) = id.try_identify(ModelSpec::FULL) {
        assert!(fit.constants.ks.is_finite());
        assert!(fit.constants.kv.is_finite());
        assert!(fit.constants.ka.is_finite());
        assert!(fit.r_squared <= 1.0 || fit.r_squared.is_nan());
    }
});
