//! Bit-level I/O for code emission and tree traversal.
//!
//! The coder's wire format is a logical sequence of bits, not a byte
//! buffer: a code path may end mid-byte, and trailing pad bits must never
//! be mistaken for data. [`BitBuffer`] therefore packs bits MSB-first into
//! bytes while carrying the exact bit length, [`BitWriter`] produces one,
//! and [`BitReader`] refuses to read past the logical end.
//!
//! # Example
//! ```
//! use adhuff_core::bitio::{BitWriter, BitReader};
//!
//! let mut writer = BitWriter::new();
//! writer.push_bit(true);
//! writer.write_bits(0b0110, 4).unwrap();
//! let buf = writer.finish();
//! assert_eq!(buf.len(), 5);
//! assert_eq!(buf.to_bit_string(), "10110");
//!
//! let mut reader = BitReader::new(&buf);
//! assert_eq!(reader.read_bits(5).unwrap(), 0b10110);
//! assert!(reader.is_empty());
//! ```

use crate::error::{BitIoError, Result};

/// A packed bitstream with an exact bit length.
///
/// Bits are stored MSB-first: bit 0 of the stream is the most significant
/// bit of byte 0. The final byte may be partially filled; bits past
/// `bit_len` are zero padding and are ignored by [`BitReader`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitBuffer {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitBuffer {
    /// An empty bitstream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of logical bits in the stream.
    pub fn len(&self) -> usize {
        self.bit_len
    }

    /// True if the stream contains no bits.
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// The packed bytes, including any zero padding in the last byte.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Read the bit at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_len {
            return None;
        }
        let byte = self.bytes[index / 8];
        Some((byte >> (7 - index % 8)) & 1 == 1)
    }

    /// Copy of the first `bit_len` bits, clamped to the current length.
    ///
    /// Used to model streams cut off mid-codeword or mid-escape.
    pub fn truncated(&self, bit_len: usize) -> BitBuffer {
        let bit_len = bit_len.min(self.bit_len);
        let mut bytes = self.bytes[..(bit_len + 7) / 8].to_vec();
        // zero the pad so equal prefixes compare equal
        if bit_len % 8 != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= 0xffu8 << (8 - bit_len % 8);
            }
        }
        BitBuffer { bytes, bit_len }
    }

    /// Render as a '0'/'1' string, one character per bit.
    pub fn to_bit_string(&self) -> String {
        (0..self.bit_len)
            .map(|i| if self.get(i) == Some(true) { '1' } else { '0' })
            .collect()
    }

    /// Parse a '0'/'1' string into a bitstream.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitChar` for any other character.
    pub fn from_bit_str(s: &str) -> Result<Self> {
        let mut writer = BitWriter::new();
        for c in s.chars() {
            match c {
                '0' => writer.push_bit(false),
                '1' => writer.push_bit(true),
                other => return Err(BitIoError::InvalidBitChar(other).into()),
            }
        }
        Ok(writer.finish())
    }
}

/// Writes bits MSB-first into a [`BitBuffer`].
///
/// # Invariants
/// - `bit_buffer` holds up to 7 pending bits (never a full byte)
/// - `bit_count` is always < 8
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_buffer: u8,
    bit_count: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single bit.
    pub fn push_bit(&mut self, bit: bool) {
        self.bit_buffer |= (bit as u8) << (7 - self.bit_count);
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Append the lowest `count` bits of `value`, MSB-first.
    ///
    /// Writing `value = 0b101, count = 3` appends bits 1, 0, 1 in that
    /// order. Used for the fixed-width raw symbol in an escape sequence.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        for shift in (0..count).rev() {
            self.push_bit((value >> shift) & 1 == 1);
        }
        Ok(())
    }

    /// Total number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Finish writing and return the packed stream.
    ///
    /// A final partial byte is padded with trailing zeros; the returned
    /// buffer remembers the exact bit length so the padding is inert.
    pub fn finish(mut self) -> BitBuffer {
        let bit_len = self.bit_len();
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        BitBuffer {
            bytes: self.bytes,
            bit_len,
        }
    }
}

/// Reads bits MSB-first from a [`BitBuffer`], stopping at its logical end.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    buf: &'a BitBuffer,
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader positioned at the first bit.
    pub fn new(buf: &'a BitBuffer) -> Self {
        Self { buf, position: 0 }
    }

    /// Number of bits left to read.
    pub fn bits_remaining(&self) -> usize {
        self.buf.len() - self.position
    }

    /// Current bit position from the start of the stream.
    pub fn position(&self) -> usize {
        self.position
    }

    /// True if no bits remain.
    pub fn is_empty(&self) -> bool {
        self.position >= self.buf.len()
    }

    /// Read one bit, or `None` at end of stream.
    ///
    /// The `Option` return is deliberate: running out of bits is the
    /// decoder's normal termination condition, not a failure.
    pub fn try_read_bit(&mut self) -> Option<bool> {
        let bit = self.buf.get(self.position)?;
        self.position += 1;
        Some(bit)
    }

    /// Read `count` bits MSB-first, or `None` if fewer remain.
    ///
    /// On `None` the reader position is unchanged, so a partial escape
    /// leaves the stream where the escape began.
    pub fn try_read_bits(&mut self, count: usize) -> Option<u64> {
        if count > 64 || count > self.bits_remaining() {
            return None;
        }
        let mut value = 0u64;
        for _ in 0..count {
            let bit = self.buf.get(self.position).unwrap_or(false);
            value = (value << 1) | bit as u64;
            self.position += 1;
        }
        Some(value)
    }

    /// Read `count` bits MSB-first.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `BitIoError::UnexpectedEof` if not enough bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        self.try_read_bits(count)
            .ok_or_else(|| BitIoError::UnexpectedEof.into())
    }
}
