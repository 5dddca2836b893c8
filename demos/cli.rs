//! Command line value parsers shared by the demos.

use cardinality_sketch::SketchConfig;

/// Parse an integer seed as decimal or with a `0x`, `0o` or `0b` radix prefix.
pub fn parse_seed(value: &str) -> Result<u32, String> {
    let (digits, radix) = match value.get(..2) {
        Some("0x" | "0X") => (&value[2..], 16),
        Some("0o" | "0O") => (&value[2..], 8),
        Some("0b" | "0B") => (&value[2..], 2),
        _ => (value, 10),
    };
    u32::from_str_radix(digits, radix).map_err(|e| format!("invalid seed `{value}`: {e}"))
}

/// Resolve `--num-registers` and `--seed` into a validated configuration.
pub fn sketch_config(num_registers: usize, seed: u32) -> Result<SketchConfig, String> {
    SketchConfig::from_num_registers(num_registers, seed).map_err(|e| e.to_string())
}
