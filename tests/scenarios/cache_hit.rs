//! Scenario: a built release is already compiled in a cache
//!
//! Lock has A (publishable, already compiled) and B (built only). The cache
//! holds B compiled for the lock's stemcell.
//!
//! Success Criteria:
//! - B's entry points at the cache with the digest of the downloaded bytes
//! - A's entry is untouched
//! - No compilation session is ever created

use crate::common::*;

#[test]
fn scenario_cache_hit_rewrites_only_the_built_entry() {
    let env = TestEnv::new();
    write_project(
        &env,
        vec![compiled_entry("a", "1.0.0"), built_entry("b", "2.0.0")],
        &[("b", "2.0.0")],
    );
    let use_case = scenario_use_case(&env, ScriptedPlatform::new());

    let summary = use_case.execute(&scenario_options(&env)).unwrap();

    assert!(summary.lockfile_written);
    assert_eq!(summary.resolution.from_cache.len(), 1);
    assert!(summary.resolution.compiled.is_empty());

    let b = summary.lockfile.get("b").unwrap();
    assert_eq!(b.remote_source(), COMPILED_SOURCE);
    assert_eq!(b.remote_path(), compiled_file_name("b", "2.0.0"));
    assert_eq!(b.digest(), sha256(&compiled_tarball("b", "2.0.0")));
    assert_eq!(
        summary.lockfile.get("a"),
        Some(&compiled_entry("a", "1.0.0"))
    );

    assert!(use_case.platform().calls().is_empty());
    assert_eq!(
        env.read("Annealfile.lock"),
        lockfile_toml(vec![compiled_entry("a", "1.0.0"), compiled_entry("b", "2.0.0")])
    );
}
