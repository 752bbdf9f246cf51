//! Drawing surface for the TFT demo
//!
//! This crate provides:
//! - `EgCanvas`, the demo's [`Canvas`](tftdemo_core::traits::Canvas)
//!   rendered with embedded-graphics onto any panel driver
//! - The mapping from demo font ids to embedded-graphics mono fonts
//! - A seven-segment text renderer and a rotating draw target for
//!   angled text
//!
//! # Architecture
//!
//! Panel drivers implement embedded-graphics `DrawTarget<Color = Rgb888>`
//! and `PanelControl`. `EgCanvas` wraps such a driver and turns each
//! drawing call into primitives drawn on a target cropped to the
//! caller's clip window, so coordinates are window-relative and nothing
//! lands outside the window.
//!
//! There is no filesystem on the board: file fonts and images report
//! `ResourceUnavailable`.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod canvas;
pub mod fonts;
pub mod rotate;
pub mod seven_seg;

// Re-export key types
pub use canvas::EgCanvas;
pub use fonts::mono_font;
