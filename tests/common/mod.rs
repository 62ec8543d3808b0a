//! Common test utilities for annealer CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project and home directories plus CLI helpers
//! - Fixtures: release tarballs, stemcells, Annealfiles and lockfiles
//! - `ScriptedPlatform`: an in-memory compilation platform
//! - Resolve use case wiring for scenario tests

#![allow(dead_code)]

pub mod env;
pub mod fixtures;
pub mod pipeline;
pub mod platform;

pub use env::*;
pub use fixtures::*;
pub use pipeline::*;
pub use platform::*;
