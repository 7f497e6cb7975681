//! Configuration for the adhuff driver.
//!
//! Handles parsing command-line arguments and generating sensible defaults
//! (including a reproducible seed for generated input).
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments, using intelligent defaults.
//! All defaults are printable so runs are reproducible.

use adhuff_core::CoderConfig;
use std::path::PathBuf;

/// Complete configuration for one encode/decode run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Input ===
    /// Input file path (None = use --text or generate a sample)
    pub input_file: Option<PathBuf>,

    /// Literal input text (overrides generation, not files)
    pub input_text: Option<String>,

    /// Size of generated sample input in bytes
    pub sample_bytes: usize,

    /// Seed for sample generation
    pub seed: u64,

    // === Coder ===
    /// Raw symbol width for escape sequences
    pub coder: CoderConfig,

    // === Output ===
    /// Where to write the decoded bytes (None = verify in memory only)
    pub output_file: Option<PathBuf>,

    /// Where to write the encoded bitstream as '0'/'1' text
    pub bits_file: Option<PathBuf>,

    // === Behavior ===
    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Whether to print coder stats after the run
    pub print_stats: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// If no seed is provided, a time-based seed is chosen (and printed
    /// with `--print-config` so the run can be reproduced).
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut input_file: Option<PathBuf> = None;
        let mut input_text: Option<String> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut bits_file: Option<PathBuf> = None;
        let mut seed: Option<u64> = None;
        let mut sample_bytes: Option<usize> = None;
        let mut symbol_bits: Option<u8> = None;
        let mut print_config = false;
        let mut print_stats = true;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--in" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--text" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--text requires a string".to_string());
                    }
                    input_text = Some(args[i].clone());
                }
                "--out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out requires a path".to_string());
                    }
                    output_file = Some(PathBuf::from(&args[i]));
                }
                "--bits-out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--bits-out requires a path".to_string());
                    }
                    bits_file = Some(PathBuf::from(&args[i]));
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--size" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--size requires a number".to_string());
                    }
                    sample_bytes = Some(args[i].parse().map_err(|_| "invalid size")?);
                }
                "--symbol-bits" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--symbol-bits requires a number".to_string());
                    }
                    symbol_bits = Some(args[i].parse().map_err(|_| "invalid symbol-bits")?);
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-stats" => {
                    print_stats = false;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0)
        });

        let coder = CoderConfig::new(symbol_bits.unwrap_or(8));
        coder.validate().map_err(|e| e.to_string())?;

        Ok(Config {
            input_file,
            input_text,
            sample_bytes: sample_bytes.unwrap_or(4096),
            seed,
            coder,
            output_file,
            bits_file,
            print_config,
            print_stats,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match (&self.input_file, &self.input_text) {
            (Some(path), _) => println!("Input: file {:?}", path),
            (None, Some(text)) => println!("Input: literal text ({} bytes)", text.len()),
            (None, None) => println!(
                "Input: generated sample ({} bytes, seed {})",
                self.sample_bytes, self.seed
            ),
        }
        println!("Symbol bits: {}", self.coder.symbol_bits);
        if let Some(path) = &self.output_file {
            println!("Decoded output: {:?}", path);
        }
        if let Some(path) = &self.bits_file {
            println!("Bitstream output: {:?}", path);
        }
        println!();
    }
}

fn print_help() {
    println!("adhuff: adaptive Huffman encode/decode round trip");
    println!();
    println!("USAGE:");
    println!("    adhuff [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>          Input file (default: generate sample)");
    println!("    --text <STRING>      Literal input text");
    println!("    --out <PATH>         Write decoded bytes to a file");
    println!("    --bits-out <PATH>    Write the encoded bitstream as '0'/'1' text");
    println!();
    println!("    --seed <N>           Seed for generated input (default: time-based)");
    println!("    --size <N>           Generated sample size in bytes (default: 4096)");
    println!("    --symbol-bits <N>    Raw escape width in bits, 1-16 (default: 8)");
    println!();
    println!("    --print-config       Print resolved configuration");
    println!("    --no-stats           Don't print coder stats");
    println!("    --help, -h           Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    adhuff                       # Round trip a generated sample");
    println!("    adhuff --seed 42             # Deterministic sample");
    println!("    adhuff --text abracadabra    # Round trip a literal string");
    println!("    adhuff --in file.bin --bits-out file.bits");
    println!();
}
