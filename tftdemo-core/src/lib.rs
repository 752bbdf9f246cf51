//! Board-agnostic logic for the TFT demo firmware
//!
//! This crate contains everything that does not depend on a specific panel,
//! touch controller or executor:
//!
//! - Drawing surface trait and graphics state save/restore
//! - Clock overlay drawn over whatever a demo is rendering
//! - Touch sampling with drain-to-release
//! - The cooperative wait primitive (the only suspension point)
//! - Demo scheduler, pass policy and the demo phases themselves
//! - Uniform random numbers for colors and positions
//! - Configuration types and the embedded TOML parser

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod demo;
pub mod gfx;
pub mod input;
pub mod overlay;
pub mod random;
pub mod scheduler;
pub mod traits;
pub mod wait;

#[cfg(test)]
pub(crate) mod testing;

pub use demo::Demo;
pub use wait::{CooperativeWaiter, WaitOutcome};
