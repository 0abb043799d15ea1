//! Property checks against the RustCrypto hashers

use proptest::prelude::*;
use sha2::Digest;
use shavs_hashing::contract::digest_to_vec;
use shavs_hashing::{HashEngine, HashState, Sha224, Sha256, Sha384, Sha512, Sha512_256};

fn reference<D: Digest>(data: &[u8]) -> Vec<u8> {
    D::digest(data).to_vec()
}

fn streamed<E: HashEngine>(chunks: &[&[u8]]) -> Vec<u8> {
    let mut state = HashState::<E>::new().expect("state should initialize");
    for chunk in chunks {
        state.update(chunk).expect("update should succeed");
    }
    state.finalize().expect("finalize should succeed")
}

fn resumed<E: HashEngine>(data: &[u8], split: usize) -> Vec<u8> {
    let mut head = HashState::<E>::new().expect("state should initialize");
    head.update(&data[..split]).expect("update should succeed");
    let checkpoint = head.checkpoint().expect("serialize should succeed");
    let mut tail = HashState::<E>::from_checkpoint(&checkpoint).expect("deserialize should succeed");
    tail.update(&data[split..]).expect("update should succeed");
    tail.finalize().expect("finalize should succeed")
}

proptest! {
    #[test]
    fn prop_one_shot_matches_reference(data in proptest::collection::vec(any::<u8>(), 0..600)) {
        prop_assert_eq!(digest_to_vec::<Sha224>(&data).expect("digest"), reference::<sha2::Sha224>(&data));
        prop_assert_eq!(digest_to_vec::<Sha256>(&data).expect("digest"), reference::<sha2::Sha256>(&data));
        prop_assert_eq!(digest_to_vec::<Sha384>(&data).expect("digest"), reference::<sha2::Sha384>(&data));
        prop_assert_eq!(digest_to_vec::<Sha512>(&data).expect("digest"), reference::<sha2::Sha512>(&data));
        prop_assert_eq!(
            digest_to_vec::<Sha512_256>(&data).expect("digest"),
            reference::<sha2::Sha512_256>(&data)
        );
    }

    #[test]
    fn prop_streaming_agrees_with_one_shot(
        data in proptest::collection::vec(any::<u8>(), 0..400),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let (x, y) = {
            let x = a.index(data.len() + 1);
            let y = b.index(data.len() + 1);
            (x.min(y), x.max(y))
        };
        let chunks = [&data[..x], &data[x..y], &data[y..]];
        prop_assert_eq!(streamed::<Sha256>(&chunks), digest_to_vec::<Sha256>(&data).expect("digest"));
        prop_assert_eq!(streamed::<Sha512>(&chunks), digest_to_vec::<Sha512>(&data).expect("digest"));
    }

    #[test]
    fn prop_checkpoint_resume_at_any_split(
        data in proptest::collection::vec(any::<u8>(), 0..300),
        split in any::<prop::sample::Index>(),
    ) {
        let split = split.index(data.len() + 1);
        prop_assert_eq!(resumed::<Sha224>(&data, split), digest_to_vec::<Sha224>(&data).expect("digest"));
        prop_assert_eq!(resumed::<Sha384>(&data, split), digest_to_vec::<Sha384>(&data).expect("digest"));
        prop_assert_eq!(resumed::<Sha512_256>(&data, split), digest_to_vec::<Sha512_256>(&data).expect("digest"));
    }

    #[test]
    fn prop_reset_restores_empty_digest(prefix in proptest::collection::vec(any::<u8>(), 0..300)) {
        let empty = digest_to_vec::<Sha512_256>(&[]).expect("digest");
        let mut state = HashState::<Sha512_256>::new().expect("state should initialize");
        state.update(&prefix).expect("update should succeed");
        state.reset().expect("reset should succeed");
        prop_assert_eq!(state.finalize().expect("finalize should succeed"), empty);
    }
}

#[test]
fn test_checkpoint_at_every_split_of_two_blocks() {
    let data: Vec<u8> = (0..=255u8).collect();
    let expected = digest_to_vec::<Sha512>(&data).expect("digest");
    for split in 0..=data.len() {
        assert_eq!(resumed::<Sha512>(&data, split), expected, "split at {split}");
    }
}

#[test]
fn test_long_input_across_padding_boundaries() {
    // Lengths around the point where the length field no longer fits.
    for len in [55usize, 56, 63, 64, 111, 112, 127, 128, 129] {
        let data = vec![0xa5u8; len];
        assert_eq!(
            digest_to_vec::<Sha256>(&data).expect("digest"),
            reference::<sha2::Sha256>(&data),
            "SHA-256 length {len}"
        );
        assert_eq!(
            digest_to_vec::<Sha384>(&data).expect("digest"),
            reference::<sha2::Sha384>(&data),
            "SHA-384 length {len}"
        );
    }
}
