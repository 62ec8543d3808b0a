//! Scenario: nothing in the cache, so the release is compiled
//!
//! Steps:
//! 1. B misses every cache
//! 2. One deployment is created; B's tarball and the stemcell are uploaded
//! 3. The compilation manifest is deployed and B exported
//! 4. The export verifies, is published to the upload target, and the
//!    deployment is torn down
//!
//! Success Criteria:
//! - B's entry points at the upload target with the verified digest
//! - The published tarball is byte-identical to the export
//! - No deployment is left behind

use crate::common::*;

#[test]
fn scenario_cache_miss_compiles_publishes_and_tears_down() {
    let env = TestEnv::new();
    write_project(
        &env,
        vec![compiled_entry("a", "1.0.0"), built_entry("b", "2.0.0")],
        &[],
    );
    let use_case = scenario_use_case(&env, ScriptedPlatform::new());

    let summary = use_case.execute(&scenario_options(&env)).unwrap();

    assert_eq!(summary.resolution.compiled.len(), 1);
    let published = &summary.resolution.compiled[0];
    assert_eq!(published.remote.source_id, COMPILED_SOURCE);
    assert_eq!(published.remote.remote_path, compiled_file_name("b", "2.0.0"));
    assert_eq!(
        published.digest.to_string(),
        sha256(&compiled_tarball("b", "2.0.0"))
    );

    let platform = use_case.platform();
    let ops: Vec<String> = platform
        .calls()
        .iter()
        .map(|call| call.split_whitespace().next().unwrap_or("").to_string())
        .collect();
    assert_eq!(
        ops,
        vec![
            "prepare",
            "upload_release",
            "upload_stemcell",
            "deploy",
            "export",
            "download",
            "delete",
            "clean_up",
        ]
    );
    assert!(platform.live_deployments().is_empty());

    assert_eq!(
        std::fs::read(env.project_path(&format!("compiled/{}", compiled_file_name("b", "2.0.0"))))
            .unwrap(),
        compiled_tarball("b", "2.0.0")
    );
    assert_eq!(
        env.read("Annealfile.lock"),
        lockfile_toml(vec![compiled_entry("a", "1.0.0"), compiled_entry("b", "2.0.0")])
    );
}
