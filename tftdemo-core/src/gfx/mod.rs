//! Drawing state
//!
//! The drawing context (clip window, font, colors, text attributes) is an
//! explicit value passed into every drawing call. [`Screen`] pairs a
//! [`Canvas`](crate::traits::Canvas) with the single-level
//! [`GraphicsState`] so demos and the clock overlay can share one surface.

pub mod screen;
pub mod state;
pub mod types;

pub use screen::Screen;
pub use state::{GraphicsState, StateError, StateGuard};
pub use types::{
    ClipWindow, Color, DrawContext, FontId, Point, Rect, SevenSegStyle, Size, TextAttrs,
    UserFont,
};
