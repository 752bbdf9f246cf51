//! Hardware abstraction traits
//!
//! These traits define the interface between the demo logic and the
//! rendering library / panel driver.

pub mod canvas;
pub mod panel;

pub use canvas::{Canvas, CanvasError, ImageFormat, Pos};
pub use panel::{ColorDepth, PanelControl, Rotation};
