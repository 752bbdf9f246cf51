//! Panel controller drivers
//!
//! Drivers implement embedded-graphics `DrawTarget` so the display crate
//! can rasterize onto them, plus [`PanelControl`](tftdemo_core::traits::PanelControl)
//! for orientation and pixel format changes.

pub mod ili9341;

pub use ili9341::{Ili9341, Ili9341Error};
