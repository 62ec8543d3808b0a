//! Cooperative interruption between pipeline stages
//!
//! Nothing is cancelled mid-flight. The flag is only read at stage
//! boundaries, and an interrupted run still goes through teardown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{ResolveError, ResolveResult};

#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared flag for a signal handler to set
    pub fn flag(&self) -> Arc<AtomicBool> {
        self.flag.clone()
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Fail with `Interrupted` if the flag has been set
    pub fn check(&self, stage: &'static str) -> ResolveResult<()> {
        if self.is_triggered() {
            return Err(ResolveError::Interrupted { stage });
        }
        Ok(())
    }
}
