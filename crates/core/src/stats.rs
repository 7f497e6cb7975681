//! Counters for observing coder behavior.
//!
//! Both the encoder and decoder keep a [`CoderStats`] up to date as they
//! process symbols. The counters make the adaptation visible: the escape
//! count stops growing once the alphabet is learned, and bits per symbol
//! falls toward the source entropy as weights accumulate.
//!
//! Not thread-safe; each stats value belongs to one encoder or decoder.

use std::time::{Duration, Instant};

/// Counters for one encode or decode run.
#[derive(Debug, Clone)]
pub struct CoderStats {
    /// When this coder was created
    pub start_time: Instant,

    /// Set once the caller marks the run complete
    pub end_time: Option<Instant>,

    /// Symbols encoded or decoded
    pub symbols: u64,

    /// Code-path bits emitted or consumed (leaf and escape paths)
    pub path_bits: u64,

    /// Raw fixed-width bits emitted or consumed inside escapes
    pub raw_bits: u64,

    /// First occurrences (escape sequences)
    pub escapes: u64,

    /// Block-leader swaps performed by the tree
    pub swaps: u64,
}

impl CoderStats {
    /// Fresh counters with the clock started.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            symbols: 0,
            path_bits: 0,
            raw_bits: 0,
            escapes: 0,
            swaps: 0,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// All bits on the wire side.
    pub fn total_bits(&self) -> u64 {
        self.path_bits + self.raw_bits
    }

    /// Average code length so far.
    ///
    /// Returns 0.0 before any symbol is processed.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.symbols == 0 {
            0.0
        } else {
            self.total_bits() as f64 / self.symbols as f64
        }
    }

    /// Compression ratio against fixed-width coding (coded / raw).
    ///
    /// Below 1.0 means the adaptive code beat `symbol_bits` bits per
    /// symbol. Returns 0.0 before any symbol is processed.
    pub fn compression_ratio(&self, symbol_bits: u8) -> f64 {
        if self.symbols == 0 {
            0.0
        } else {
            self.total_bits() as f64 / (self.symbols * symbol_bits as u64) as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self, label: &str, symbol_bits: u8) {
        println!("=== {} ===", label);
        println!("Duration: {} us", self.duration().as_micros());
        println!("Symbols: {}", self.symbols);
        println!(
            "Bits: {} ({} path + {} raw)",
            self.total_bits(),
            self.path_bits,
            self.raw_bits
        );
        println!("Escapes: {}", self.escapes);
        println!("Swaps: {}", self.swaps);
        println!("Bits/symbol: {:.3}", self.bits_per_symbol());
        println!(
            "Ratio vs {}-bit raw: {:.1}%",
            symbol_bits,
            self.compression_ratio(symbol_bits) * 100.0
        );
        println!();
    }

    /// Export as a simple `key=value` text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "symbols={}\n\
             path_bits={}\n\
             raw_bits={}\n\
             total_bits={}\n\
             escapes={}\n\
             swaps={}\n\
             bits_per_symbol={:.4}\n",
            self.symbols,
            self.path_bits,
            self.raw_bits,
            self.total_bits(),
            self.escapes,
            self.swaps,
            self.bits_per_symbol(),
        )
    }
}

impl Default for CoderStats {
    fn default() -> Self {
        Self::new()
    }
}
