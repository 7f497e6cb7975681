//! adhuff: encode a byte stream with the adaptive Huffman coder, decode it
//! with an independent tree, and verify the round trip.
//!
//! Mirrors the coder's intended deployment: the encoder and decoder never
//! share state, only the bitstream travels between them.

mod config;
mod input_gen;

use adhuff_core::{Decoder, Encoder, Result};
use config::Config;
use std::fs;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("try --help");
            std::process::exit(2);
        }
    };

    if config.print_config {
        config.print();
    }

    if let Err(error) = run(&config) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<()> {
    let input = load_input(config)?;
    println!("Input: {} bytes", input.len());

    // Encode
    let mut encoder = Encoder::new(config.coder)?;
    let bits = encoder.encode_bytes(&input)?;
    encoder.stats_mut().complete();
    println!(
        "Encoded: {} bits ({:.3} bits/symbol, {:.1}% of raw)",
        bits.len(),
        encoder.stats().bits_per_symbol(),
        encoder.stats().compression_ratio(config.coder.symbol_bits) * 100.0
    );

    // Decode with a fresh tree, exactly as a receiver would
    let mut decoder = Decoder::new(config.coder)?;
    let decoded = decoder.decode_bytes(&bits)?;
    decoder.stats_mut().complete();

    // Verify
    if decoded == input {
        println!("Verification: PASSED ({} bytes match)", decoded.len());
    } else {
        println!(
            "Verification: FAILED ({} bytes in, {} bytes out)",
            input.len(),
            decoded.len()
        );
    }

    if let Some(path) = &config.output_file {
        fs::write(path, &decoded)?;
        println!("Wrote decoded bytes to {:?}", path);
    }
    if let Some(path) = &config.bits_file {
        fs::write(path, bits.to_bit_string())?;
        println!("Wrote bitstream text to {:?}", path);
    }

    if config.print_stats {
        println!();
        encoder
            .stats()
            .print_summary("Encoder", config.coder.symbol_bits);
        decoder
            .stats()
            .print_summary("Decoder", config.coder.symbol_bits);
    }
    Ok(())
}

fn load_input(config: &Config) -> Result<Vec<u8>> {
    if let Some(path) = &config.input_file {
        return Ok(fs::read(path)?);
    }
    if let Some(text) = &config.input_text {
        return Ok(text.clone().into_bytes());
    }
    Ok(input_gen::generate_sample_data(
        config.seed,
        config.sample_bytes,
    ))
}
