//! Integration tests for the adaptive Huffman coder.
//!
//! These tests verify end-to-end behavior: symbols -> bits -> symbols with
//! independent encoder and decoder trees, plus the structural invariants
//! the tree must re-establish after every single update.

use adhuff_core::{BitWriter, CoderConfig, Decoder, Encoder, HuffmanTree};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Assert the structural invariants of the tree model.
///
/// - exactly one NYT node (weight 0, no children)
/// - every internal node's weight is the sum of its children's
/// - parent and child links agree
/// - order values are pairwise distinct
/// - seen symbols and leaves are in bijection
fn assert_tree_invariants(tree: &HuffmanTree) {
    let nyt_count = tree.nodes().filter(|(_, n)| n.is_nyt()).count();
    assert_eq!(nyt_count, 1, "expected exactly one NYT node");
    assert!(tree.node(tree.nyt()).is_nyt());
    assert_eq!(tree.node(tree.nyt()).weight(), 0);

    let mut leaf_symbols = Vec::new();
    for (id, node) in tree.nodes() {
        if let Some((left, right)) = node.children() {
            assert_eq!(
                node.weight(),
                tree.node(left).weight() + tree.node(right).weight(),
                "weight conservation violated at node {id}"
            );
            assert_eq!(tree.node(left).parent(), Some(id));
            assert_eq!(tree.node(right).parent(), Some(id));
        }
        if let Some(symbol) = node.symbol() {
            assert!(node.weight() >= 1, "leaf with zero weight");
            assert_eq!(tree.leaf_of(symbol), Some(id), "leaf index out of sync");
            leaf_symbols.push(symbol);
        }
    }
    leaf_symbols.sort_unstable();
    leaf_symbols.dedup();
    assert_eq!(leaf_symbols.len(), tree.distinct_symbols());

    let mut orders: Vec<u32> = tree.nodes().map(|(_, n)| n.order()).collect();
    orders.sort_unstable();
    orders.dedup();
    assert_eq!(orders.len(), tree.node_count(), "duplicate order values");
}

fn round_trip(data: &[u8]) -> Vec<u8> {
    let mut encoder = Encoder::with_defaults().expect("encoder config");
    let bits = encoder.encode_bytes(data).expect("encode failed");

    let mut decoder = Decoder::with_defaults().expect("decoder config");
    decoder.decode_bytes(&bits).expect("decode failed")
}

#[test]
fn test_round_trip_corpus() {
    let corpus: &[&[u8]] = &[
        b"",
        b"a",
        b"ab",
        b"abc",
        b"hello",
        b"aaaabbb",
        b"abracadabra",
        b"mississippi",
        b"The quick brown fox jumps over the lazy dog",
        b"\x00\x00\x00\xff\xff\xff\x00\xff",
    ];
    for &data in corpus {
        assert_eq!(round_trip(data), data, "round trip failed for {data:?}");
    }
}

#[test]
fn test_round_trip_full_byte_alphabet() {
    let data: Vec<u8> = (0u8..=255).chain(0u8..=255).collect();
    assert_eq!(round_trip(&data), data);
}

#[test]
fn test_round_trip_random_data() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for len in [1usize, 2, 17, 256, 4096] {
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        assert_eq!(round_trip(&data), data, "round trip failed at len {len}");
    }
}

#[test]
fn test_round_trip_skewed_distribution() {
    // heavily repeated symbols exercise the swap path hard
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let data: Vec<u8> = (0..4096)
        .map(|_| {
            let r: f64 = rng.gen();
            if r < 0.6 {
                b'a'
            } else if r < 0.85 {
                b'b'
            } else if r < 0.95 {
                b'c'
            } else {
                rng.gen()
            }
        })
        .collect();
    assert_eq!(round_trip(&data), data);
}

#[test]
fn test_invariants_hold_after_every_update() {
    let data = b"abcbcddcba abracadabra zzz";
    let mut encoder = Encoder::with_defaults().unwrap();
    let mut writer = BitWriter::new();
    for &byte in data.iter() {
        encoder.encode_symbol(byte as u16, &mut writer).unwrap();
        assert_tree_invariants(encoder.tree());
    }
    assert!(encoder.tree().swap_count() > 0, "corpus should force swaps");
}

#[test]
fn test_decoder_tree_matches_encoder_tree() {
    let data = b"lockstep lockstep lockstep";
    let mut encoder = Encoder::with_defaults().unwrap();
    let bits = encoder.encode_bytes(data).unwrap();

    let mut decoder = Decoder::with_defaults().unwrap();
    decoder.decode_bytes(&bits).unwrap();

    let enc_tree = encoder.tree();
    let dec_tree = decoder.tree();
    assert_eq!(enc_tree.node_count(), dec_tree.node_count());
    assert_eq!(enc_tree.swap_count(), dec_tree.swap_count());
    for &byte in data.iter() {
        let symbol = byte as u16;
        assert_eq!(enc_tree.weight_of(symbol), dec_tree.weight_of(symbol));
        assert_eq!(enc_tree.code_for(symbol), dec_tree.code_for(symbol));
    }
    assert_tree_invariants(dec_tree);
}

#[test]
fn test_determinism_from_fresh_trees() {
    let data = b"determinism is the whole point";
    let mut first = Encoder::with_defaults().unwrap();
    let mut second = Encoder::with_defaults().unwrap();
    assert_eq!(
        first.encode_bytes(data).unwrap(),
        second.encode_bytes(data).unwrap()
    );
}

#[test]
fn test_spec_scenarios() {
    // encode("") -> no bits
    let mut encoder = Encoder::with_defaults().unwrap();
    assert!(encoder.encode_bytes(b"").unwrap().is_empty());

    // encode("a") -> the 8-bit raw code of 'a' behind an empty escape path
    let mut encoder = Encoder::with_defaults().unwrap();
    let bits = encoder.encode_str("a").unwrap();
    assert_eq!(bits.to_bit_string(), "01100001");
    let mut decoder = Decoder::with_defaults().unwrap();
    assert_eq!(decoder.decode_bytes(&bits).unwrap(), b"a");

    // encode("aa") -> escape form then a single path bit
    let mut encoder = Encoder::with_defaults().unwrap();
    let bits = encoder.encode_str("aa").unwrap();
    assert_eq!(bits.len(), 9);
    let mut decoder = Decoder::with_defaults().unwrap();
    assert_eq!(decoder.decode_bytes(&bits).unwrap(), b"aa");

    // encode("aaaabbb") -> leaf weights 4 and 3 after processing
    let mut encoder = Encoder::with_defaults().unwrap();
    let bits = encoder.encode_str("aaaabbb").unwrap();
    assert_eq!(encoder.tree().weight_of(b'a' as u16), Some(4));
    assert_eq!(encoder.tree().weight_of(b'b' as u16), Some(3));
    let mut decoder = Decoder::with_defaults().unwrap();
    assert_eq!(decoder.decode_bytes(&bits).unwrap(), b"aaaabbb");
}

#[test]
fn test_truncation_always_yields_prefix() {
    let data = b"prefix property under truncation";
    let mut encoder = Encoder::with_defaults().unwrap();
    let bits = encoder.encode_bytes(data).unwrap();

    for cut in 0..=bits.len() {
        let mut decoder = Decoder::with_defaults().unwrap();
        let decoded = decoder.decode_bytes(&bits.truncated(cut)).unwrap();
        assert!(
            data.starts_with(&decoded),
            "cut at {cut} produced non-prefix {decoded:?}"
        );
    }
}

#[test]
fn test_wide_alphabet_escapes_use_configured_width() {
    let config = CoderConfig::new(12);
    let symbols: Vec<u16> = vec![4095, 0, 4095, 2048, 2048, 2048];

    let mut encoder = Encoder::new(config).unwrap();
    let bits = encoder.encode(&symbols).unwrap();
    assert_eq!(encoder.stats().raw_bits, 3 * 12);

    let mut decoder = Decoder::new(config).unwrap();
    assert_eq!(decoder.decode(&bits).unwrap(), symbols);
}

#[test]
fn test_stats_agree_across_the_wire() {
    let data = b"statistics should balance";
    let mut encoder = Encoder::with_defaults().unwrap();
    let bits = encoder.encode_bytes(data).unwrap();

    let mut decoder = Decoder::with_defaults().unwrap();
    decoder.decode_bytes(&bits).unwrap();

    assert_eq!(encoder.stats().total_bits(), bits.len() as u64);
    assert_eq!(encoder.stats().total_bits(), decoder.stats().total_bits());
    assert_eq!(encoder.stats().escapes, decoder.stats().escapes);
    assert_eq!(encoder.stats().symbols, data.len() as u64);
}
