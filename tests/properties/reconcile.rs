//! Property tests for lockfile reconciliation.

use proptest::prelude::*;

use annealer::domain::entities::{LockEntry, Lockfile, RemoteRelease, ResolvedRelease};
use annealer::domain::services::reconcile;
use annealer::domain::value_objects::{Digest, ReleaseId, Stemcell};

fn lockfile(len: usize) -> Lockfile {
    Lockfile::with_releases(
        Stemcell::new("ubuntu-jammy", "1.181"),
        (0..len)
            .map(|i| LockEntry::new(format!("r{i}"), format!("{i}.0"), "built", format!("r{i}.tgz"), "old"))
            .collect(),
    )
}

fn resolved(i: usize) -> ResolvedRelease {
    ResolvedRelease {
        remote: RemoteRelease::new(
            ReleaseId::new(format!("r{i}"), format!("{i}.0")),
            "compiled",
            format!("r{i}-{i}.0-ubuntu-jammy-1.181.tgz"),
        ),
        digest: Digest::from_bytes(format!("r{i}").as_bytes()),
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: reconciliation rewrites exactly the resolved entries, in place.
    #[test]
    fn property_reconcile_only_touches_resolved_entries(
        (len, picks) in (1usize..16).prop_flat_map(|len| {
            (Just(len), proptest::sample::subsequence((0..len).collect::<Vec<_>>(), 0..=len))
        }),
        reverse in any::<bool>(),
    ) {
        let original = lockfile(len);
        let mut releases: Vec<ResolvedRelease> = picks.iter().copied().map(resolved).collect();
        if reverse {
            releases.reverse();
        }

        let updated = reconcile(&original, &releases).unwrap();

        prop_assert_eq!(updated.len(), original.len());
        prop_assert_eq!(updated.stemcell_criteria(), original.stemcell_criteria());
        for (i, (before, after)) in original.releases().iter().zip(updated.releases()).enumerate() {
            prop_assert_eq!(before.name(), after.name());
            prop_assert_eq!(before.version(), after.version());
            if picks.contains(&i) {
                prop_assert_eq!(after.remote_source(), "compiled");
                let expected = resolved(i);
                prop_assert_eq!(after.digest(), expected.digest.hex());
            } else {
                prop_assert_eq!(before, after);
            }
        }
    }

    /// PROPERTY: a resolved release with no lock entry fails reconciliation.
    #[test]
    fn property_reconcile_rejects_unknown_names(len in 0usize..8) {
        let result = reconcile(&lockfile(len), &[resolved(len)]);

        prop_assert!(result.is_err());
    }
}
