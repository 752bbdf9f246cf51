//! Drawing surface trait
//!
//! The rasterizer itself (lines, circles, text, images) lives outside this
//! crate. Every drawing call takes the [`DrawContext`] explicitly:
//! coordinates are relative to the context's clip window origin and output
//! is clipped to that window. The surface keeps no clip/font/color state of
//! its own.

use crate::gfx::{Color, DrawContext, FontId, Point, Rect, Size};
use crate::traits::panel::{ColorDepth, Rotation};

/// Drawing surface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CanvasError {
    /// Filesystem, font file or scratch memory not available
    ResourceUnavailable,
    /// Image file could not be decoded
    InvalidImage,
    /// Bus error while talking to the panel
    Bus,
}

/// Text placement along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pos {
    /// Absolute offset from the window origin
    At(i32),
    /// Centered in the window
    Center,
    /// Flush with the far edge of the window
    End,
}

/// Image file formats understood by the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageFormat {
    Jpeg,
    Bmp,
}

/// Drawing surface
pub trait Canvas {
    /// Display dimensions for the current rotation
    fn size(&self) -> Size;

    /// Line height of a font in pixels
    fn line_height(&self, font: FontId) -> i32;

    /// Check if a font can be rendered (user fonts need the filesystem)
    fn font_available(&self, font: FontId) -> bool;

    /// Check if the image/font filesystem is mounted
    fn has_filesystem(&self) -> bool;

    /// Change display orientation
    fn set_rotation(&mut self, rotation: Rotation);

    /// Change the panel pixel format
    fn set_color_depth(&mut self, depth: ColorDepth);

    /// Render all subsequent colors as gray levels
    fn set_grayscale(&mut self, enabled: bool);

    /// Fill the whole display, ignoring any clip window
    fn fill_screen(&mut self, color: Color);

    /// Fill the context's clip window
    fn fill_window(&mut self, ctx: &DrawContext, color: Color);

    fn draw_pixel(&mut self, ctx: &DrawContext, at: Point, color: Color);

    fn draw_line(&mut self, ctx: &DrawContext, from: Point, to: Point, color: Color);

    /// Draw a radial line
    ///
    /// Starts `start` pixels from `center` and extends `length` pixels at
    /// `angle` degrees, measured clockwise from 12 o'clock.
    fn draw_line_by_angle(
        &mut self,
        ctx: &DrawContext,
        center: Point,
        start: i32,
        length: i32,
        angle: i32,
        color: Color,
    );

    fn draw_rect(&mut self, ctx: &DrawContext, rect: Rect, color: Color);

    fn fill_rect(&mut self, ctx: &DrawContext, rect: Rect, color: Color);

    fn draw_circle(&mut self, ctx: &DrawContext, center: Point, radius: i32, color: Color);

    fn fill_circle(&mut self, ctx: &DrawContext, center: Point, radius: i32, color: Color);

    /// Draw the ellipse quadrants selected by `quadrants`
    ///
    /// Bit 0 top-left, bit 1 top-right, bit 2 bottom-right, bit 3 bottom-left.
    fn draw_ellipse(
        &mut self,
        ctx: &DrawContext,
        center: Point,
        rx: i32,
        ry: i32,
        color: Color,
        quadrants: u8,
    );

    /// Fill the ellipse quadrants selected by `quadrants`
    fn fill_ellipse(
        &mut self,
        ctx: &DrawContext,
        center: Point,
        rx: i32,
        ry: i32,
        color: Color,
        quadrants: u8,
    );

    fn draw_triangle(&mut self, ctx: &DrawContext, points: [Point; 3], color: Color);

    fn fill_triangle(&mut self, ctx: &DrawContext, points: [Point; 3], color: Color);

    /// Draw an arc band of `thickness` pixels inside `radius`
    ///
    /// Angles in degrees clockwise from 12 o'clock. The band is filled with
    /// `fill` and outlined with `color`.
    #[allow(clippy::too_many_arguments)]
    fn draw_arc(
        &mut self,
        ctx: &DrawContext,
        center: Point,
        radius: i32,
        thickness: i32,
        start: f32,
        end: f32,
        color: Color,
        fill: Color,
    );

    /// Draw a regular polygon
    ///
    /// `rotation` in degrees; the outline is `thickness` pixels wide. The
    /// interior is filled with `fill` unless it equals `color`.
    #[allow(clippy::too_many_arguments)]
    fn draw_polygon(
        &mut self,
        ctx: &DrawContext,
        center: Point,
        sides: u8,
        radius: i32,
        color: Color,
        fill: Color,
        rotation: i32,
        thickness: i32,
    );

    /// Print text with the context's font, colors and text attributes
    fn print(&mut self, ctx: &DrawContext, text: &str, x: Pos, y: Pos);

    /// Decode and draw an image file centered in the window
    ///
    /// `scale` shrinks the image by `2^scale` (jpeg 0-3, bmp 0-7).
    fn draw_image(
        &mut self,
        ctx: &DrawContext,
        format: ImageFormat,
        path: &str,
        scale: u8,
    ) -> Result<(), CanvasError>;

    /// Send one horizontal run of pixels starting at window x = 0
    fn write_line(&mut self, ctx: &DrawContext, y: i32, pixels: &[Color])
        -> Result<(), CanvasError>;
}
