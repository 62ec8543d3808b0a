//! Property tests for requirement classification.

use proptest::prelude::*;

use annealer::domain::entities::{LockEntry, Lockfile};
use annealer::domain::services::{classify, SourceRegistry};
use annealer::domain::value_objects::{ReleaseId, Stemcell};
use annealer::infrastructure::DirectoryReleaseSource;

fn registry() -> SourceRegistry {
    SourceRegistry::new()
        .with_source(Box::new(DirectoryReleaseSource::new("built", "built", false)))
        .with_source(Box::new(DirectoryReleaseSource::new("compiled", "compiled", true)))
}

/// Entries with distinct names, each in either source
fn lock_entries() -> impl Strategy<Value = Vec<LockEntry>> {
    proptest::collection::vec(any::<bool>(), 0..24).prop_map(|publishable| {
        publishable
            .into_iter()
            .enumerate()
            .map(|(i, compiled)| {
                let source = if compiled { "compiled" } else { "built" };
                LockEntry::new(format!("r{i}"), "1.0", source, format!("r{i}.tgz"), "")
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: publishable and candidates partition the lockfile, each in lock order.
    #[test]
    fn property_classification_is_an_ordered_partition(entries in lock_entries()) {
        let lockfile = Lockfile::with_releases(Stemcell::new("ubuntu-jammy", "1.181"), entries.clone());

        let classification = classify(&lockfile, &registry()).unwrap();

        let expected_publishable: Vec<ReleaseId> = entries
            .iter()
            .filter(|e| e.remote_source() == "compiled")
            .map(LockEntry::release_id)
            .collect();
        let expected_candidates: Vec<ReleaseId> = entries
            .iter()
            .filter(|e| e.remote_source() == "built")
            .map(LockEntry::release_id)
            .collect();
        let candidates: Vec<ReleaseId> = classification
            .candidates
            .iter()
            .map(|c| c.release.clone())
            .collect();

        prop_assert_eq!(&classification.publishable, &expected_publishable);
        prop_assert_eq!(candidates, expected_candidates);
        prop_assert_eq!(
            classification.is_fully_compiled(),
            entries.iter().all(|e| e.remote_source() == "compiled")
        );
    }
}
