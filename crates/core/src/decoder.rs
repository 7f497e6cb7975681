//! Bits-to-symbols side of the coder.
//!
//! The decoder owns its own [`HuffmanTree`], starting from the same empty
//! state as the encoder's, and mirrors the encoder exactly: walk one
//! codeword (or escape), emit the symbol, update the tree, repeat. As long
//! as both sides apply the identical update after every symbol, the trees
//! never desynchronize.
//!
//! Truncated input is not an error: a stream ending mid-codeword, or with
//! fewer than `symbol_bits` bits after an escape prefix, yields the
//! symbols decoded so far.

use crate::bitio::{BitBuffer, BitReader};
use crate::error::{Error, Result};
use crate::stats::CoderStats;
use crate::tree::{CoderConfig, HuffmanTree};

/// One-pass adaptive Huffman decoder.
///
/// Decoding is stateful: consecutive calls continue adapting the same
/// tree. Use a fresh decoder per stream.
#[derive(Debug)]
pub struct Decoder {
    tree: HuffmanTree,
    stats: CoderStats,
}

impl Decoder {
    /// Decoder over an empty tree with the given config.
    ///
    /// # Errors
    /// Returns `Error::Config` if the config is invalid.
    pub fn new(config: CoderConfig) -> Result<Self> {
        Ok(Self {
            tree: HuffmanTree::new(config)?,
            stats: CoderStats::new(),
        })
    }

    /// Decoder with the default byte-range config (`symbol_bits = 8`).
    pub fn with_defaults() -> Result<Self> {
        Self::new(CoderConfig::default())
    }

    /// The configuration this decoder was built with.
    pub fn config(&self) -> CoderConfig {
        self.tree.config()
    }

    /// Read access to the tree, mainly for inspection and tests.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// Counters for this decoder's lifetime.
    pub fn stats(&self) -> &CoderStats {
        &self.stats
    }

    /// Mutable counters (e.g. to mark the run complete).
    pub fn stats_mut(&mut self) -> &mut CoderStats {
        &mut self.stats
    }

    /// Decode a bitstream into symbols.
    ///
    /// Stops at the end of the stream; an incomplete trailing codeword or
    /// escape is discarded silently and the decoded prefix is returned.
    /// An empty stream decodes to an empty sequence.
    pub fn decode(&mut self, bits: &BitBuffer) -> Result<Vec<u16>> {
        let width = self.config().symbol_bits as u64;
        let mut reader = BitReader::new(bits);
        let mut output = Vec::new();

        while !reader.is_empty() {
            let start = reader.position();
            let Some(symbol) = self.tree.decode_step(&mut reader) else {
                // truncated codeword or escape: benign end of stream
                break;
            };
            let consumed = (reader.position() - start) as u64;

            // a symbol without a leaf yet must have come through the NYT
            if self.tree.leaf_of(symbol).is_none() {
                self.stats.escapes += 1;
                self.stats.raw_bits += width;
                self.stats.path_bits += consumed - width;
            } else {
                self.stats.path_bits += consumed;
            }

            self.tree.update(symbol)?;
            self.stats.symbols += 1;
            self.stats.swaps = self.tree.swap_count();
            output.push(symbol);
        }
        Ok(output)
    }

    /// Decode a bitstream into bytes.
    ///
    /// # Errors
    /// Returns `Error::Config` if `symbol_bits` exceeds 8, since symbols
    /// would not fit a byte.
    pub fn decode_bytes(&mut self, bits: &BitBuffer) -> Result<Vec<u8>> {
        if self.config().symbol_bits > 8 {
            return Err(Error::Config(format!(
                "decode_bytes requires symbol_bits <= 8, got {}",
                self.config().symbol_bits
            )));
        }
        Ok(self.decode(bits)?.into_iter().map(|s| s as u8).collect())
    }
}
