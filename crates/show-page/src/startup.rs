//! Run-once gate for page startup.
//!
//! Startup must see the page structure. If the structure already exists when
//! the controller is loaded it runs right away; otherwise it waits for the
//! structure-ready signal. Either way it runs exactly once: each method
//! returns `true` only to the single caller that should run it.

use std::sync::atomic::{AtomicBool, Ordering};

/// Document loading state, as reported when the controller is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    pub fn structure_available(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

#[derive(Debug, Default)]
pub struct StartupGate {
    started: AtomicBool,
}

impl StartupGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once the controller is loaded.
    pub fn on_script_loaded(&self, state: ReadyState) -> bool {
        state.structure_available() && self.claim()
    }

    /// Called when the structure-ready signal fires.
    pub fn on_structure_ready(&self) -> bool {
        self.claim()
    }

    pub fn has_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    fn claim(&self) -> bool {
        !self.started.swap(true, Ordering::AcqRel)
    }
}
