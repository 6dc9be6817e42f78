#![no_main]

use folio_core::Easing;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(easing) = source.parse::<Easing>() else {
        return;
    };
    if !easing.is_valid() {
        return;
    }
    // Curves whose control points stay inside the unit square never overshoot.
    let bounded = easing
        .control_points()
        .is_none_or(|(_, y1, _, y2)| (0.0..=1.0).contains(&y1) && (0.0..=1.0).contains(&y2));
    let mut last = 0.0;
    for step in 0..=64 {
        let y = easing.apply(f64::from(step) / 64.0);
        assert!(y.is_finite());
        if bounded {
            assert!(y + 1e-9 >= last, "non-monotonic {easing:?} at {step}");
        }
        last = y;
    }
});
