//! Wiring the resolve use case over a `TestEnv` project, without the CLI.

use annealer::application::{ResolveOptions, ResolveUseCase};
use annealer::config::{Annealfile, Variables};
use annealer::infrastructure::{build_registry, build_uploader, TomlLockfileRepository};

use super::{ScriptedPlatform, TestEnv, COMPILED_SOURCE};

pub type ScenarioUseCase = ResolveUseCase<TomlLockfileRepository, ScriptedPlatform>;

/// Real directory sources and lockfile repository, scripted platform
pub fn scenario_use_case(env: &TestEnv, platform: ScriptedPlatform) -> ScenarioUseCase {
    let annealfile = Annealfile::load(&env.project_path("Annealfile"), &Variables::new())
        .expect("load Annealfile");
    let base_dir = env.project_root.path();

    ResolveUseCase::new(
        build_registry(&annealfile, base_dir),
        build_uploader(&annealfile, base_dir, COMPILED_SOURCE).expect("upload target"),
        platform,
        TomlLockfileRepository::new(),
    )
}

pub fn scenario_options(env: &TestEnv) -> ResolveOptions {
    ResolveOptions::new(
        env.project_path("Annealfile.lock"),
        env.project_path("stemcell.tgz"),
    )
    .with_releases_dir(env.project_path("releases"))
}
