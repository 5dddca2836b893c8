#![no_main]

use cardinality_sketch::Sketch;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(mut sketch) = serde_json::from_slice::<Sketch>(data) {
        sketch.update("key").unwrap();
        assert!(sketch.estimate() > 0.0);
        assert_eq!(sketch.registers().len(), sketch.num_registers());
    }
});
