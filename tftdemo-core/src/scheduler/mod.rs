//! Demo scheduler
//!
//! Runs the fixed phase list forever, one pass at a time, and derives each
//! pass's panel configuration from the pass counter.

pub mod executor;
pub mod policy;

pub use executor::{
    Deadline, DemoScheduler, PassReport, PhaseExit, PhaseKind, PhaseRunner, PHASE_ORDER,
};
pub use policy::{settings_for_pass, BaseSettings, PassSettings, QUIET_AFTER_PASS};
