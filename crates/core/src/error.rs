//! Error types for the adaptive Huffman coder.
//!
//! All fallible operations return structured errors rather than panicking.
//! Truncated input is deliberately NOT an error: a bitstream that ends
//! mid-codeword or mid-escape decodes to the prefix that was completed
//! (see [`crate::decoder::Decoder::decode`]).

use thiserror::Error;

/// Top-level error type for all operations in the crate.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: reading/writing bits from/to byte buffers
/// - Tree: symbol range or order-capacity violations
/// - Config: invalid coder configuration
/// - I/O: file system operations (app-side plumbing)
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Tree model error (e.g., symbol outside the configured alphabet)
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the end of the bitstream
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Invalid bit count (more than 64 bits in one read/write)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),

    /// A character other than '0' or '1' in a textual bit string
    #[error("invalid bit character: {0:?}")]
    InvalidBitChar(char),
}

/// Tree model errors.
///
/// These guard the configured capacity limits. Structural invariant
/// violations (a missing child during traversal, a duplicated order)
/// are programming errors and are covered by debug assertions, never
/// surfaced to callers.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Symbol value does not fit the configured alphabet
    #[error("symbol {symbol} out of range for alphabet of {alphabet_size}")]
    SymbolOutOfRange { symbol: u16, alphabet_size: usize },

    /// The fixed order-numbering space was exhausted
    #[error("order space exhausted (ceiling {ceiling})")]
    OrderSpaceExhausted { ceiling: u32 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
