//! Symbol-to-bits side of the coder.
//!
//! The encoder owns a private [`HuffmanTree`]. For each symbol it emits
//! the current code (or the escape prefix plus the fixed-width raw value
//! for a first occurrence) and only then updates the tree, so a decoder
//! replaying the stream sees every codeword under the same tree state it
//! was produced under.

use crate::bitio::{BitBuffer, BitWriter};
use crate::error::Result;
use crate::stats::CoderStats;
use crate::tree::{CoderConfig, HuffmanTree};

/// One-pass adaptive Huffman encoder.
///
/// Encoding is stateful: consecutive calls continue adapting the same
/// tree. Use a fresh encoder per stream if the decoder starts from an
/// empty tree.
#[derive(Debug)]
pub struct Encoder {
    tree: HuffmanTree,
    stats: CoderStats,
}

impl Encoder {
    /// Encoder over an empty tree with the given config.
    ///
    /// # Errors
    /// Returns `Error::Config` if the config is invalid.
    pub fn new(config: CoderConfig) -> Result<Self> {
        Ok(Self {
            tree: HuffmanTree::new(config)?,
            stats: CoderStats::new(),
        })
    }

    /// Encoder with the default byte-range config (`symbol_bits = 8`).
    pub fn with_defaults() -> Result<Self> {
        Self::new(CoderConfig::default())
    }

    /// The configuration this encoder was built with.
    pub fn config(&self) -> CoderConfig {
        self.tree.config()
    }

    /// Read access to the tree, mainly for inspection and tests.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// Counters for this encoder's lifetime.
    pub fn stats(&self) -> &CoderStats {
        &self.stats
    }

    /// Mutable counters (e.g. to mark the run complete).
    pub fn stats_mut(&mut self) -> &mut CoderStats {
        &mut self.stats
    }

    /// Emit the code for one symbol into `writer`, then update the tree.
    ///
    /// # Errors
    /// Returns `TreeError::SymbolOutOfRange` before any bit is written
    /// if the symbol does not fit the configured alphabet.
    pub fn encode_symbol(&mut self, symbol: u16, writer: &mut BitWriter) -> Result<()> {
        self.tree.validate_symbol(symbol)?;

        let code = self.tree.code_for(symbol);
        for &bit in code.path() {
            writer.push_bit(bit);
        }
        self.stats.path_bits += code.path().len() as u64;

        if code.is_escape() {
            let width = self.config().symbol_bits as usize;
            writer.write_bits(symbol as u64, width)?;
            self.stats.raw_bits += width as u64;
            self.stats.escapes += 1;
        }

        self.tree.update(symbol)?;
        self.stats.symbols += 1;
        self.stats.swaps = self.tree.swap_count();
        Ok(())
    }

    /// Encode a symbol sequence into a bitstream.
    ///
    /// An empty input produces an empty bitstream.
    pub fn encode(&mut self, symbols: &[u16]) -> Result<BitBuffer> {
        let mut writer = BitWriter::new();
        for &symbol in symbols {
            self.encode_symbol(symbol, &mut writer)?;
        }
        Ok(writer.finish())
    }

    /// Encode bytes as symbols.
    pub fn encode_bytes(&mut self, data: &[u8]) -> Result<BitBuffer> {
        let mut writer = BitWriter::new();
        for &byte in data {
            self.encode_symbol(byte as u16, &mut writer)?;
        }
        Ok(writer.finish())
    }

    /// Encode the UTF-8 bytes of a string.
    pub fn encode_str(&mut self, text: &str) -> Result<BitBuffer> {
        self.encode_bytes(text.as_bytes())
    }
}
