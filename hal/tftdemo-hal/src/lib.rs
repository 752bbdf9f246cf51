//! TFT Demo Hardware Abstraction Layer
//!
//! This crate defines the capability traits the demo core consumes from the
//! board. Chip-specific code (the RP2040 firmware, host fakes in tests)
//! implements them so the same demo logic runs everywhere.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Demo logic (tftdemo-core)              │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tftdemo-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ tftdemo-      │       │  host fakes   │
//! │ firmware      │       │  (unit tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`touch::TouchSource`] - Instantaneous touch panel sampling
//! - [`clock::WallClock`] - Time of day with one-second resolution
//! - [`clock::Monotonic`] - Elapsed milliseconds for deadline arithmetic
//!
//! Sleeping is not abstracted here; consumers use
//! `embedded_hal_async::delay::DelayNs`.

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod touch;

// Re-export key traits at crate root for convenience
pub use clock::{Monotonic, WallClock, WallTime, SECONDS_PER_DAY};
pub use touch::{NoTouch, TouchPoint, TouchSource};
