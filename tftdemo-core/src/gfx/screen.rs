//! Canvas plus graphics state

use super::state::{GraphicsState, StateError};
use super::types::{ClipWindow, Color, DrawContext, FontId, Point, Rect, Size};
use crate::traits::{Canvas, CanvasError, ColorDepth, ImageFormat, Pos, Rotation};

/// The draw surface shared by demo phases and the clock overlay
///
/// Owns the canvas and the current/saved drawing context. Whoever holds
/// `&mut Screen` owns the surface; the overlay borrows it only inside
/// [`Screen::with_saved`], which brackets its drawing with save/restore.
pub struct Screen<C> {
    canvas: C,
    state: GraphicsState,
}

impl<C: Canvas> Screen<C> {
    /// Wrap a canvas; the initial context covers the whole display
    pub fn new(canvas: C) -> Self {
        let ctx = DrawContext::for_display(canvas.size());
        Self {
            canvas,
            state: GraphicsState::new(ctx),
        }
    }

    /// Underlying canvas
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Underlying canvas, mutable
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// Graphics state (current context and snapshot slot)
    pub fn state(&self) -> &GraphicsState {
        &self.state
    }

    /// Graphics state, mutable
    pub fn state_mut(&mut self) -> &mut GraphicsState {
        &mut self.state
    }

    /// Current drawing context
    pub fn ctx(&self) -> &DrawContext {
        self.state.current()
    }

    /// Current drawing context, mutable
    pub fn ctx_mut(&mut self) -> &mut DrawContext {
        self.state.current_mut()
    }

    /// Display dimensions
    pub fn size(&self) -> Size {
        self.canvas.size()
    }

    /// Clip window covering the whole display
    pub fn full_clip(&self) -> ClipWindow {
        ClipWindow::full(self.canvas.size())
    }

    /// Current clip window
    pub fn clip(&self) -> ClipWindow {
        self.ctx().clip
    }

    /// Open the clip window to the whole display
    pub fn reset_clip(&mut self) {
        let full = self.full_clip();
        self.ctx_mut().clip = full;
    }

    /// Narrow the clip window (inclusive screen coordinates)
    pub fn set_clip(&mut self, left: i32, top: i32, right: i32, bottom: i32) {
        self.ctx_mut().clip = ClipWindow::new(left, top, right, bottom);
    }

    pub fn set_font(&mut self, font: FontId) {
        self.ctx_mut().font = font;
    }

    pub fn set_fg(&mut self, color: Color) {
        self.ctx_mut().fg = color;
    }

    pub fn set_bg(&mut self, color: Color) {
        self.ctx_mut().bg = color;
    }

    /// Line height of the current font
    pub fn line_height(&self) -> i32 {
        self.canvas.line_height(self.ctx().font)
    }

    /// Run `f` with the context saved and the clip opened to the full display
    ///
    /// The previous context is restored when `f` returns, whatever `f` did
    /// to it. Fails without calling `f` if a save is already pending.
    pub fn with_saved<R>(
        &mut self,
        f: impl FnOnce(&mut C, &mut DrawContext) -> R,
    ) -> Result<R, StateError> {
        let full = ClipWindow::full(self.canvas.size());
        let mut guard = self.state.scoped(full)?;
        Ok(f(&mut self.canvas, &mut guard))
    }

    /// Change rotation; the clip window is reset to the new full display
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.canvas.set_rotation(rotation);
        self.reset_clip();
    }

    pub fn set_color_depth(&mut self, depth: ColorDepth) {
        self.canvas.set_color_depth(depth);
    }

    pub fn set_grayscale(&mut self, enabled: bool) {
        self.canvas.set_grayscale(enabled);
    }

    pub fn fill_screen(&mut self, color: Color) {
        self.canvas.fill_screen(color);
    }

    pub fn fill_window(&mut self, color: Color) {
        self.canvas.fill_window(self.state.current(), color);
    }

    pub fn draw_pixel(&mut self, at: Point, color: Color) {
        self.canvas.draw_pixel(self.state.current(), at, color);
    }

    pub fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.canvas.draw_line(self.state.current(), from, to, color);
    }

    pub fn draw_line_by_angle(
        &mut self,
        center: Point,
        start: i32,
        length: i32,
        angle: i32,
        color: Color,
    ) {
        self.canvas
            .draw_line_by_angle(self.state.current(), center, start, length, angle, color);
    }

    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.canvas.draw_rect(self.state.current(), rect, color);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.canvas.fill_rect(self.state.current(), rect, color);
    }

    pub fn draw_circle(&mut self, center: Point, radius: i32, color: Color) {
        self.canvas.draw_circle(self.state.current(), center, radius, color);
    }

    pub fn fill_circle(&mut self, center: Point, radius: i32, color: Color) {
        self.canvas.fill_circle(self.state.current(), center, radius, color);
    }

    pub fn draw_ellipse(&mut self, center: Point, rx: i32, ry: i32, color: Color, quadrants: u8) {
        self.canvas
            .draw_ellipse(self.state.current(), center, rx, ry, color, quadrants);
    }

    pub fn fill_ellipse(&mut self, center: Point, rx: i32, ry: i32, color: Color, quadrants: u8) {
        self.canvas
            .fill_ellipse(self.state.current(), center, rx, ry, color, quadrants);
    }

    pub fn draw_triangle(&mut self, points: [Point; 3], color: Color) {
        self.canvas.draw_triangle(self.state.current(), points, color);
    }

    pub fn fill_triangle(&mut self, points: [Point; 3], color: Color) {
        self.canvas.fill_triangle(self.state.current(), points, color);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_arc(
        &mut self,
        center: Point,
        radius: i32,
        thickness: i32,
        start: f32,
        end: f32,
        color: Color,
        fill: Color,
    ) {
        self.canvas.draw_arc(
            self.state.current(),
            center,
            radius,
            thickness,
            start,
            end,
            color,
            fill,
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_polygon(
        &mut self,
        center: Point,
        sides: u8,
        radius: i32,
        color: Color,
        fill: Color,
        rotation: i32,
        thickness: i32,
    ) {
        self.canvas.draw_polygon(
            self.state.current(),
            center,
            sides,
            radius,
            color,
            fill,
            rotation,
            thickness,
        );
    }

    pub fn print(&mut self, text: &str, x: Pos, y: Pos) {
        self.canvas.print(self.state.current(), text, x, y);
    }

    pub fn draw_image(
        &mut self,
        format: ImageFormat,
        path: &str,
        scale: u8,
    ) -> Result<(), CanvasError> {
        self.canvas
            .draw_image(self.state.current(), format, path, scale)
    }

    pub fn write_line(&mut self, y: i32, pixels: &[Color]) -> Result<(), CanvasError> {
        self.canvas.write_line(self.state.current(), y, pixels)
    }
}
