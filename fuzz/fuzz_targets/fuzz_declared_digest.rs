#![no_main]

use annealer::domain::value_objects::{DeclaredDigest, DigestAlgorithm};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(declared) = std::str::from_utf8(data) {
        if let Ok(digest) = DeclaredDigest::parse(declared) {
            if let Some(sha256) = digest.sha256() {
                assert_eq!(sha256.hex().len(), 64);
            }
            let checked = [DigestAlgorithm::Sha1, DigestAlgorithm::Sha256];
            if let Some((algorithm, hex)) = digest.strongest_of(&checked) {
                assert!(checked.contains(&algorithm));
                assert_eq!(digest.member(algorithm), Some(hex));
            }
        }
    }
});
