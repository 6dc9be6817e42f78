#![no_main]

use folio_core::RevealConfig;
use folio_runtime::{PolicyFormat, RevealPolicy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    for format in [PolicyFormat::Toml, PolicyFormat::Json] {
        if let Ok(policy) = RevealPolicy::parse(source, format) {
            // Anything that applies must also validate.
            if let Ok(config) = policy.apply(RevealConfig::default()) {
                assert!(config.validate().is_ok());
            }
        }
    }
});
