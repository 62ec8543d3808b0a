//! Property tests for annealer.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants of classification, reconciliation and digest handling.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/classify.rs"]
mod classify;

#[path = "properties/digest.rs"]
mod digest;

#[path = "properties/lockfile.rs"]
mod lockfile;

#[path = "properties/reconcile.rs"]
mod reconcile;
