//! Prints MurmurHash3 of each key together with its register index and rank.
//!
//! ```text
//! cargo run --example murmur -- --seed 0x9747b28c --num-registers 1024 hello world
//! ```

mod cli;

use cardinality_sketch::bucket::extract;
use cardinality_sketch::hash::hash_key;
use clap::Parser;

#[derive(Debug, Parser)]
#[clap(about)]
struct Args {
    /// Key(s) to be hashed
    key: Vec<String>,
    /// Seed value, decimal or `0x` hex
    #[clap(short, long, default_value = "0", value_parser = cli::parse_seed)]
    seed: u32,
    /// Number of registers, a power of two
    #[clap(short = 'm', long)]
    num_registers: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = cli::sketch_config(args.num_registers, args.seed)?;

    for key in &args.key {
        let h = hash_key(key, config.seed())?;
        let (j, r) = extract(h, config.precision());
        println!("{h:#010x}\t{j}\t{r}\t{key}");
    }
    Ok(())
}
