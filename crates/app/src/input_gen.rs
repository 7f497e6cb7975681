//! Sample input generation for driver runs.
//!
//! When no input is specified, we generate data with interesting entropy
//! characteristics: sections an adaptive coder learns quickly and sections
//! it cannot beat.
//!
//! # Design
//!
//! Generated data has:
//! - Heavily skewed sections (a few symbols dominate, codes shrink fast)
//! - Text-like sections (limited alphabet, moderate skew)
//! - Bursty sections (the dominant symbol changes mid-stream, forcing
//!   the tree to re-adapt through block-leader swaps)
//! - Uniform random sections (escapes and near-8-bit codes)
//!
//! This makes the adaptation visible in the coder stats.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate sample data with mixed entropy.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `size_bytes`: exact size of generated data
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    let mut remaining = size_bytes;
    while remaining > 0 {
        let section_size = remaining.min(2048);
        let section_type: u8 = rng.gen_range(0..10);

        match section_type {
            // 30% heavily skewed: one hot byte with occasional others
            0..=2 => {
                let hot: u8 = rng.gen();
                for _ in 0..section_size {
                    if rng.gen_bool(0.85) {
                        data.push(hot);
                    } else {
                        data.push(rng.gen());
                    }
                }
            }

            // 30% text-like: limited alphabet
            3..=5 => {
                let alphabet = b"abcdefghijklmnopqrstuvwxyz .!,\n";
                for _ in 0..section_size {
                    let idx = rng.gen_range(0..alphabet.len());
                    data.push(alphabet[idx]);
                }
            }

            // 20% bursty: the dominant symbol flips every few dozen bytes
            6..=7 => {
                let mut hot: u8 = rng.gen();
                for i in 0..section_size {
                    if i % 48 == 0 {
                        hot = rng.gen();
                    }
                    data.push(hot);
                }
            }

            // 20% incompressible: uniform random bytes
            _ => {
                for _ in 0..section_size {
                    data.push(rng.gen());
                }
            }
        }

        remaining = remaining.saturating_sub(section_size);
    }

    data.truncate(size_bytes);
    data
}
