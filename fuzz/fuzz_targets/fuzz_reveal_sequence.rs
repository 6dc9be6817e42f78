#![no_main]

use arbitrary::Arbitrary;
use folio_core::{IntersectionEntry, Observation, RevealConfig};
use folio_widgets::{RevealMachine, RevealState};
use libfuzzer_sys::fuzz_target;
use std::time::Duration;
use web_time::Instant;

#[derive(Debug, Arbitrary)]
struct Input {
    threshold: u8,
    trigger_once: bool,
    delay_ms: u16,
    steps: Vec<(u8, u16)>,
}

fuzz_target!(|input: Input| {
    let threshold = f64::from(input.threshold) / 255.0;
    let config = RevealConfig::default()
        .visibility_threshold(threshold)
        .trigger_once(input.trigger_once)
        .delay_ms(u64::from(input.delay_ms));
    let mut machine = RevealMachine::new(config);
    let mut now = Instant::now();
    let mut latched = false;

    for (ratio, gap_ms) in input.steps {
        now += Duration::from_millis(u64::from(gap_ms));
        let entry = IntersectionEntry::from_ratio(f64::from(ratio) / 255.0);
        let flow = machine.observe(&entry, now);
        if latched {
            assert_eq!(machine.state(), RevealState::Visible);
            assert_eq!(flow, Observation::Disconnect);
        }
        latched |= input.trigger_once && machine.state() == RevealState::Visible;

        let style = machine.style_at(now + Duration::from_millis(u64::from(gap_ms)));
        assert!((0.0..=1.0).contains(&style.opacity));
    }
});
