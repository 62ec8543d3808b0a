//! Property tests for digests.

use proptest::prelude::*;

use annealer::domain::value_objects::{DeclaredDigest, Digest};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: parsing a declared digest never panics.
    #[test]
    fn property_declared_digest_parse_never_panics(raw in ".*") {
        let _ = DeclaredDigest::parse(&raw);
    }

    /// PROPERTY: the sha256 member of a multi-digest is what we compute ourselves.
    #[test]
    fn property_sha256_member_matches_computed_digest(
        content in proptest::collection::vec(any::<u8>(), 0..512),
        sha1 in "[0-9a-f]{40}",
        uppercase in any::<bool>(),
    ) {
        let computed = Digest::from_bytes(&content);
        let hex = if uppercase {
            computed.hex().to_uppercase()
        } else {
            computed.hex().to_string()
        };

        let declared = DeclaredDigest::parse(&format!("sha1:{sha1};sha256:{hex}")).unwrap();

        prop_assert_eq!(declared.sha256(), Some(computed));
    }

    /// PROPERTY: one flipped byte always changes the digest.
    #[test]
    fn property_digest_detects_a_flipped_byte(
        content in proptest::collection::vec(any::<u8>(), 1..512),
        index in any::<prop::sample::Index>(),
    ) {
        let mut tampered = content.clone();
        let i = index.index(tampered.len());
        tampered[i] ^= 0xff;

        prop_assert_ne!(Digest::from_bytes(&content), Digest::from_bytes(&tampered));
    }
}
