//! adhuff-core: one-pass adaptive Huffman entropy coding
//!
//! This library implements an adaptive (FGK-style) Huffman coder: the
//! prefix-code tree is built incrementally as symbols arrive, so no
//! frequency table is ever transmitted. Encoder and decoder each own a
//! private tree starting from the same empty state and apply the identical
//! update after every symbol, which keeps both trees bit-for-bit in sync.
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `bitio`: MSB-first bit reading/writing with exact bit lengths
//! - `tree`: the weighted tree model and the sibling-property update rule
//! - `encoder`: symbols in, bits out
//! - `decoder`: bits in, symbols out
//! - `stats`: observable coder behavior
//!
//! # Design Principles
//!
//! - **No panics**: capacity and range violations are structured errors;
//!   truncated input is a normal end condition, not a failure
//! - **Lockstep determinism**: the same input always produces the same
//!   bits, and decode(encode(s)) == s for every symbol sequence
//! - **Single owner**: a tree is mutated only by its owning encoder or
//!   decoder, never shared
//!
//! # Example
//! ```
//! use adhuff_core::{Decoder, Encoder};
//!
//! let mut encoder = Encoder::with_defaults()?;
//! let bits = encoder.encode_str("abracadabra")?;
//!
//! let mut decoder = Decoder::with_defaults()?;
//! assert_eq!(decoder.decode_bytes(&bits)?, b"abracadabra");
//! # Ok::<(), adhuff_core::Error>(())
//! ```

pub mod bitio;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod stats;
pub mod tree;

// Re-export commonly used types
pub use bitio::{BitBuffer, BitReader, BitWriter};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{Error, Result};
pub use stats::CoderStats;
pub use tree::{Code, CoderConfig, HuffmanTree, Node, NodeId, NodeKind};
