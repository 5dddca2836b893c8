//! Approximate number of distinct words in all `.txt` files under a directory.
//!
//! Files are split across worker threads, each building its own sketch, and the partial
//! sketches are reduced with `MergeDriver`:
//!
//! ```text
//! RUST_LOG=debug cargo run --release --example distinct_words -- -w 8 -m 4096 ./corpus
//! ```

mod cli;

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use std::{fs, thread};

use cardinality_sketch::{MergeDriver, Sketch, SketchConfig};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(about)]
struct Args {
    /// Path to walk
    #[clap(value_parser = parse_dir)]
    path: PathBuf,
    /// Seed value, decimal or `0x` hex
    #[clap(short, long, default_value = "0", value_parser = cli::parse_seed)]
    seed: u32,
    /// Number of registers, a power of two
    #[clap(short = 'm', long)]
    num_registers: usize,
    /// Number of worker threads, at least 1
    #[clap(short = 'w', long, default_value = "1")]
    num_workers: NonZeroUsize,
}

fn parse_dir(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("`{value}` is not a valid directory"))
    }
}

fn txt_files(root: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() {
            txt_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    Ok(())
}

/// Sketch every word of `files`, returning the sketch and the number of rejected words.
fn sketch_files(config: SketchConfig, files: &[PathBuf]) -> (Sketch, usize) {
    let mut sketch = Sketch::with_config(config);
    let mut rejected = 0;
    for path in files {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable file");
                continue;
            }
        };
        for word in text.split_whitespace() {
            if let Err(e) = sketch.update(word) {
                warn!(path = %path.display(), error = %e, "rejected word");
                rejected += 1;
            }
        }
    }
    (sketch, rejected)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = cli::sketch_config(args.num_registers, args.seed)?;
    let workers = args.num_workers.get();

    let start = Instant::now();
    let mut files = Vec::new();
    txt_files(&args.path, &mut files)?;
    info!(files = files.len(), workers, %config, "sketching corpus");

    let chunk = files.len().div_ceil(workers).max(1);
    let results: Vec<(Sketch, usize)> = thread::scope(|s| {
        let handles: Vec<_> = files
            .chunks(chunk)
            .map(|part| s.spawn(move || sketch_files(config, part)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker panicked"))
            .collect()
    });
    let (partials, rejected): (Vec<Sketch>, Vec<usize>) = results.into_iter().unzip();
    let rejected: usize = rejected.into_iter().sum();
    if rejected > 0 {
        warn!(rejected, "words rejected by the sketch");
    }
    let estimate = MergeDriver::new(config).estimate(partials)?;

    println!("Cardinality estimate: {estimate:.0}");
    println!("Number of workers: {workers}");
    println!("Took {:?}", start.elapsed());
    Ok(())
}
