//! Scenario: the compiled export does not match its declared digest
//!
//! Success Criteria:
//! - The run fails with an integrity error naming the release
//! - Nothing is published and the lockfile is byte-identical
//! - The deployment is still torn down

use annealer::ErrorKind;

use crate::common::*;

#[test]
fn scenario_digest_mismatch_fails_without_side_effects() {
    let env = TestEnv::new();
    write_project(
        &env,
        vec![compiled_entry("a", "1.0.0"), built_entry("b", "2.0.0")],
        &[],
    );
    let lock_before = env.read("Annealfile.lock");
    let use_case = scenario_use_case(&env, ScriptedPlatform::new().corrupting("b"));

    let err = use_case.execute(&scenario_options(&env)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Integrity);
    assert_eq!(err.release().map(|r| r.name.as_str()), Some("b"));

    assert_eq!(env.read("Annealfile.lock"), lock_before);
    assert!(!env.exists(&format!("compiled/{}", compiled_file_name("b", "2.0.0"))));

    let platform = use_case.platform();
    assert_eq!(platform.count("delete"), 1);
    assert!(platform.live_deployments().is_empty());
}
