//! Draw target adapter rotating everything around a pivot
//!
//! Mono fonts only render upright; angled text is drawn upright through
//! this adapter, which moves each pixel to its rotated position. Pixels
//! are mapped one to one, so steep angles leave small gaps in glyphs.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Clockwise rotation around a pivot point
#[derive(Debug, Clone, Copy)]
pub struct Turn {
    pivot: Point,
    sin: f32,
    cos: f32,
}

impl Turn {
    /// `degrees` is clockwise on screen
    pub fn new(pivot: Point, degrees: u16) -> Self {
        let radians = (degrees % 360) as f32 * core::f32::consts::PI / 180.0;
        Self {
            pivot,
            sin: libm::sinf(radians),
            cos: libm::cosf(radians),
        }
    }

    /// Where a point ends up after rotation
    pub fn map(&self, point: Point) -> Point {
        let dx = (point.x - self.pivot.x) as f32;
        let dy = (point.y - self.pivot.y) as f32;
        let x = dx * self.cos - dy * self.sin;
        let y = dx * self.sin + dy * self.cos;
        self.pivot + Point::new(libm::roundf(x) as i32, libm::roundf(y) as i32)
    }
}

/// Applies a [`Turn`] to every pixel drawn through it
pub struct Rotated<'a, T> {
    parent: &'a mut T,
    turn: Turn,
}

impl<'a, T> Rotated<'a, T> {
    pub fn new(parent: &'a mut T, turn: Turn) -> Self {
        Self { parent, turn }
    }
}

impl<T: Dimensions> Dimensions for Rotated<'_, T> {
    fn bounding_box(&self) -> Rectangle {
        self.parent.bounding_box()
    }
}

impl<T: DrawTarget> DrawTarget for Rotated<'_, T> {
    type Color = T::Color;
    type Error = T::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let turn = self.turn;
        self.parent
            .draw_iter(pixels.into_iter().map(|Pixel(p, c)| Pixel(turn.map(p), c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_turn_is_clockwise() {
        let r = Turn::new(Point::new(10, 10), 90);
        // Right of the pivot moves below it (screen y grows downward)
        assert_eq!(r.map(Point::new(15, 10)), Point::new(10, 15));
        assert_eq!(r.map(Point::new(10, 10)), Point::new(10, 10));
    }

    #[test]
    fn test_zero_is_identity() {
        let r = Turn::new(Point::new(3, 4), 0);
        assert_eq!(r.map(Point::new(-7, 20)), Point::new(-7, 20));
        let full = Turn::new(Point::new(3, 4), 360);
        assert_eq!(full.map(Point::new(-7, 20)), Point::new(-7, 20));
    }
}
