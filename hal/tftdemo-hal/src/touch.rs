//! Touch panel abstractions
//!
//! Provides the single-sample touch read used by the demo's input sampler.

/// A touch position in display pixel coordinates
///
/// Coordinates are absolute (screen space, current rotation), not relative
/// to any clip window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    /// Horizontal position in pixels
    pub x: i32,
    /// Vertical position in pixels
    pub y: i32,
}

impl TouchPoint {
    /// Create a new touch point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Touch panel
///
/// Implementations perform one instantaneous read of the panel. Debouncing
/// and release tracking are the caller's business.
pub trait TouchSource {
    /// Sample the panel once
    ///
    /// Returns `None` when the panel is not touched, or when the read
    /// failed (a failed read is indistinguishable from "not touched").
    fn read_touch(&mut self) -> Option<TouchPoint>;

    /// Follow a display orientation change
    ///
    /// `quarter_turns` counts 90 degree clockwise steps from portrait
    /// (0-3). Sources that already report screen coordinates ignore it.
    fn set_quarter_turns(&mut self, _quarter_turns: u8) {}
}

impl<T: TouchSource + ?Sized> TouchSource for &mut T {
    fn read_touch(&mut self) -> Option<TouchPoint> {
        (**self).read_touch()
    }

    fn set_quarter_turns(&mut self, quarter_turns: u8) {
        (**self).set_quarter_turns(quarter_turns)
    }
}

/// Touch source for boards without a touch panel
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTouch;

impl TouchSource for NoTouch {
    fn read_touch(&mut self) -> Option<TouchPoint> {
        None
    }
}
