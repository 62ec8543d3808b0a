//! Property tests for lockfile persistence.

use proptest::prelude::*;

use annealer::domain::entities::{LockEntry, Lockfile};
use annealer::domain::value_objects::Stemcell;
use annealer::infrastructure::repositories::{parse_lockfile, render_lockfile};

fn entry() -> impl Strategy<Value = LockEntry> {
    (
        "[a-z][a-z0-9-]{0,12}",
        "[0-9]{1,3}(\\.[0-9]{1,3}){0,2}",
        prop_oneof![Just("built"), Just("compiled")],
        "[A-Za-z0-9._/-]{1,32}",
        "[0-9a-f]{64}",
    )
        .prop_map(|(name, version, source, path, digest)| {
            LockEntry::new(name, version, source, path, digest)
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: parsing arbitrary text never panics.
    #[test]
    fn property_parse_lockfile_never_panics(raw in ".*") {
        let _ = parse_lockfile(&raw);
    }

    /// PROPERTY: a saved lockfile reads back identical, entry order included.
    #[test]
    fn property_rendered_lockfile_reads_back_identical(
        entries in proptest::collection::vec(entry(), 0..12),
    ) {
        let lockfile = Lockfile::with_releases(Stemcell::new("ubuntu-jammy", "1.181"), entries);

        let parsed = parse_lockfile(&render_lockfile(&lockfile).unwrap()).unwrap();

        prop_assert_eq!(parsed, lockfile);
    }
}
