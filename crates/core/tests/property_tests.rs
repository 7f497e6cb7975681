//! Property tests for the adaptive Huffman coder.
//!
//! The load-bearing property is lockstep determinism: for any symbol
//! sequence, decode(encode(s)) == s with independent trees on each side.

use adhuff_core::{CoderConfig, Decoder, Encoder, HuffmanTree};
use proptest::prelude::*;

// returns TestCaseError so prop_assert works outside the macro body
fn structural_invariants(
    tree: &HuffmanTree,
) -> Result<(), proptest::test_runner::TestCaseError> {
    let nyt_count = tree.nodes().filter(|(_, n)| n.is_nyt()).count();
    prop_assert_eq!(nyt_count, 1);

    for (id, node) in tree.nodes() {
        if let Some((left, right)) = node.children() {
            prop_assert_eq!(
                node.weight(),
                tree.node(left).weight() + tree.node(right).weight()
            );
            prop_assert_eq!(tree.node(left).parent(), Some(id));
            prop_assert_eq!(tree.node(right).parent(), Some(id));
        }
    }

    let mut orders: Vec<u32> = tree.nodes().map(|(_, n)| n.order()).collect();
    orders.sort_unstable();
    orders.dedup();
    prop_assert_eq!(orders.len(), tree.node_count());
    Ok(())
}

proptest! {
    #[test]
    fn prop_round_trip_bytes(input in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut encoder = Encoder::with_defaults().unwrap();
        let bits = encoder.encode_bytes(&input).unwrap();

        let mut decoder = Decoder::with_defaults().unwrap();
        let decoded = decoder.decode_bytes(&bits).unwrap();
        prop_assert_eq!(decoded, input);
    }

    #[test]
    fn prop_determinism(input in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut first = Encoder::with_defaults().unwrap();
        let mut second = Encoder::with_defaults().unwrap();
        prop_assert_eq!(
            first.encode_bytes(&input).unwrap(),
            second.encode_bytes(&input).unwrap()
        );
    }

    #[test]
    fn prop_truncation_yields_prefix(
        input in prop::collection::vec(any::<u8>(), 1..128),
        cut_fraction in 0.0f64..1.0,
    ) {
        let mut encoder = Encoder::with_defaults().unwrap();
        let bits = encoder.encode_bytes(&input).unwrap();
        let cut = (bits.len() as f64 * cut_fraction) as usize;

        let mut decoder = Decoder::with_defaults().unwrap();
        let decoded = decoder.decode_bytes(&bits.truncated(cut)).unwrap();
        prop_assert!(input.starts_with(&decoded));
    }

    #[test]
    fn prop_structural_invariants_hold(input in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut tree = HuffmanTree::new(CoderConfig::default()).unwrap();
        for &byte in &input {
            tree.update(byte as u16).unwrap();
        }
        structural_invariants(&tree)?;
        prop_assert_eq!(
            tree.node(tree.root()).weight(),
            input.len() as u64
        );
    }

    #[test]
    fn prop_wide_alphabet_round_trip(
        input in prop::collection::vec(0u16..4096, 0..128),
    ) {
        let config = CoderConfig::new(12);
        let mut encoder = Encoder::new(config).unwrap();
        let bits = encoder.encode(&input).unwrap();

        let mut decoder = Decoder::new(config).unwrap();
        prop_assert_eq!(decoder.decode(&bits).unwrap(), input);
    }

    #[test]
    fn prop_arbitrary_bits_never_panic(
        bytes in prop::collection::vec(any::<u8>(), 0..64),
        bit_len_slack in 0usize..8,
    ) {
        // random garbage must decode to something without panicking;
        // prefix-freeness means every bit pattern is either a valid
        // codeword sequence or a truncated one
        use adhuff_core::BitWriter;
        let mut writer = BitWriter::new();
        for &b in &bytes {
            writer.write_bits(b as u64, 8).unwrap();
        }
        writer.write_bits(0, bit_len_slack).unwrap();
        let bits = writer.finish();

        let mut decoder = Decoder::with_defaults().unwrap();
        let decoded = decoder.decode_bytes(&bits).unwrap();
        prop_assert!(decoded.len() as u64 <= bits.len() as u64);
    }
}
