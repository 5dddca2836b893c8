use cardinality_sketch::{MergeDriver, Result, Sketch, SketchConfig};

fn main() -> Result<()> {
    let config = SketchConfig::new(10, 0)?;

    let mut sketch1 = Sketch::with_config(config);
    for i in 0..10_000 {
        sketch1.update(&format!("word{i}"))?;
    }
    println!("sketch1 estimate = {:.0}", sketch1.estimate());

    let mut sketch2 = Sketch::with_config(config);
    for i in 10_000..25_000 {
        sketch2.update(&format!("word{i}"))?;
    }
    println!("sketch2 estimate = {:.0}", sketch2.estimate());

    let merged = MergeDriver::new(config).estimate([sketch1, sketch2])?;
    println!("merged estimate = {merged:.0}");
    Ok(())
}
