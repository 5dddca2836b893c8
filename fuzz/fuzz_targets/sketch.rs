#![no_main]

use cardinality_sketch::{Sketch, SketchConfig};
use libfuzzer_sys::fuzz_target;
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let split_index = wyhash(data, 0) as usize % data.len();
    let (first_half, second_half) = data.split_at(split_index);
    let precision = 1 + u32::from(data[0]) % 16;
    let seed = u32::from(data[data.len() - 1]);
    let config = SketchConfig::new(precision, seed).unwrap();

    let mut sketch1 = Sketch::with_config(config);
    for chunk in first_half.chunks(4) {
        sketch1.update(chunk).unwrap();
        assert!(sketch1.estimate() > 0.0);
    }

    let mut sketch2 = Sketch::with_config(config);
    for chunk in second_half.chunks(4) {
        sketch2.update(chunk).unwrap();
        assert!(sketch2.estimate() > 0.0);
    }

    let merged = sketch1.merged(&sketch2).unwrap();
    assert_eq!(merged, sketch2.merged(&sketch1).unwrap());
    assert_eq!(merged, merged.merged(&merged).unwrap());
});
