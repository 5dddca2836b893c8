#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use cardinality_sketch::{MergeDriver, Sketch, SketchConfig};

/// Run `f` under a dhat testing profiler and return (total bytes, total blocks) it allocated.
fn measure_allocations<T>(f: impl FnOnce() -> T) -> (T, u64, u64) {
    let _profiler = dhat::Profiler::builder().testing().build();
    let result = f();
    let stats = dhat::HeapStats::get();
    (result, stats.total_bytes, stats.total_blocks)
}

// dhat allows a single profiler per process, so all measurements share one test.
#[test]
fn test_allocations() {
    for precision in [4, 10, 12, 16] {
        let (sketch, bytes, blocks) = measure_allocations(|| Sketch::new(precision, 0).unwrap());
        assert_eq!(blocks, 1, "p = {precision}");
        assert_eq!(bytes, 1 << precision, "p = {precision}");

        let mut sketch = sketch;
        let (_, bytes, blocks) = measure_allocations(|| {
            for i in 0..100_000u64 {
                sketch.update(&i.to_le_bytes()).unwrap();
            }
        });
        assert_eq!((bytes, blocks), (0, 0), "p = {precision}");
        assert_eq!(sketch.size_of(), std::mem::size_of::<Sketch>() + (1 << precision));

        let other = sketch.clone();
        let (_, bytes, blocks) = measure_allocations(|| sketch.merge(&other).unwrap());
        assert_eq!((bytes, blocks), (0, 0), "p = {precision}");

        let (estimate, bytes, blocks) = measure_allocations(|| sketch.estimate());
        assert_eq!((bytes, blocks), (0, 0), "p = {precision}");
        assert!(estimate > 0.0);
    }

    // driver collects partials once, merges in place and reuses the first partial's registers
    let config = SketchConfig::new(10, 0).unwrap();
    let partials: Vec<Sketch> = (0..8).map(|_| Sketch::with_config(config)).collect();
    let (merged, _, blocks) = measure_allocations(|| MergeDriver::new(config).reduce(partials));
    assert!(merged.unwrap().is_empty());
    assert!(blocks <= 4, "blocks = {blocks}");
}
