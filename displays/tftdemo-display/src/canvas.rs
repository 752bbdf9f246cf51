//! [`Canvas`] implementation on embedded-graphics
//!
//! Every windowed call draws on `target.cropped(window)` clipped to the
//! window's own bounds: cropping only moves the origin to the window's
//! top-left corner, the clip drops pixels outside it. Colors pass through
//! the grayscale filter on the way in.
//!
//! The `Canvas` drawing methods cannot fail; panel errors are counted and
//! logged instead of propagated.

use embedded_graphics::draw_target::{Clipped, Cropped, DrawTargetExt};
use embedded_graphics::geometry::Angle;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::{
    DrawTarget, Drawable, OriginDimensions, Pixel, Point as EgPoint, Primitive,
    Size as EgSize,
};
use embedded_graphics::primitives::{
    Arc, Circle, Ellipse, Line, PrimitiveStyle, Polyline, Rectangle, Triangle,
};
use embedded_graphics::text::{Baseline, Text, TextStyleBuilder};
use heapless::Vec;

use tftdemo_core::gfx::{ClipWindow, Color, DrawContext, FontId, Point, Rect, Size};
use tftdemo_core::traits::{
    Canvas, CanvasError, ColorDepth, ImageFormat, PanelControl, Pos, Rotation,
};

use crate::fonts::{self, mono_font};
use crate::rotate::{Rotated, Turn};
use crate::seven_seg;

/// Most sides a polygon can have
pub const MAX_POLYGON_SIDES: usize = 32;

/// Longest line of wrapped text, in characters
const MAX_LINE_CHARS: usize = 96;

fn eg_point(p: Point) -> EgPoint {
    EgPoint::new(p.x, p.y)
}

/// Window as an embedded-graphics rectangle (empty if inverted)
fn window_rect(clip: &ClipWindow) -> Rectangle {
    Rectangle::new(
        EgPoint::new(clip.left, clip.top),
        EgSize::new(clip.width().max(0) as u32, clip.height().max(0) as u32),
    )
}

fn eg_rect(rect: Rect) -> Rectangle {
    Rectangle::new(
        EgPoint::new(rect.x, rect.y),
        EgSize::new(rect.width.max(0) as u32, rect.height.max(0) as u32),
    )
}

/// Unit vector for an angle measured clockwise from 12 o'clock
fn heading(degrees: f32) -> (f32, f32) {
    let radians = degrees * core::f32::consts::PI / 180.0;
    (libm::sinf(radians), -libm::cosf(radians))
}

fn along(center: Point, distance: i32, (dx, dy): (f32, f32)) -> EgPoint {
    EgPoint::new(
        center.x + libm::roundf(dx * distance as f32) as i32,
        center.y + libm::roundf(dy * distance as f32) as i32,
    )
}

/// Offset of text along one axis inside a window
fn align(pos: Pos, extent: i32, text: i32) -> i32 {
    match pos {
        Pos::At(v) => v,
        Pos::Center => (extent - text) / 2,
        Pos::End => extent - text,
    }
}

/// Greedy word wrap into lines of at most `max_chars` characters
///
/// Words longer than a line are split.
fn wrap_lines(text: &str, max_chars: usize) -> impl Iterator<Item = &str> {
    let max_chars = max_chars.max(1);
    let mut rest = text;
    core::iter::from_fn(move || {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            return None;
        }
        let mut end = rest.len();
        let mut last_space = None;
        for (count, (idx, c)) in rest.char_indices().enumerate() {
            if count == max_chars {
                end = last_space.unwrap_or(idx);
                break;
            }
            if c == ' ' {
                last_space = Some(idx);
            }
        }
        let (line, tail) = rest.split_at(end);
        rest = tail;
        Some(line.trim_end())
    })
}

/// Drawing surface over a panel driver
pub struct EgCanvas<D> {
    target: D,
    grayscale: bool,
    failures: u32,
}

impl<D> EgCanvas<D>
where
    D: DrawTarget<Color = Rgb888> + OriginDimensions + PanelControl,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            grayscale: false,
            failures: 0,
        }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn release(self) -> D {
        self.target
    }

    /// Drawing calls the panel rejected since start-up
    pub fn failures(&self) -> u32 {
        self.failures
    }

    fn rgb(&self, color: Color) -> Rgb888 {
        let c = if self.grayscale {
            color.to_grayscale()
        } else {
            color
        };
        Rgb888::new(c.r, c.g, c.b)
    }

    fn note<E>(&mut self, result: Result<(), E>) {
        if result.is_err() {
            self.failures = self.failures.wrapping_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!("Panel rejected a drawing call ({} so far)", self.failures);
        }
    }

    /// Run `draw` on the panel cropped and clipped to the context's clip
    /// window
    fn in_window<F>(&mut self, ctx: &DrawContext, draw: F)
    where
        F: FnOnce(&mut Clipped<'_, Cropped<'_, D>>) -> Result<(), D::Error>,
    {
        let area = window_rect(&ctx.clip);
        let local = Rectangle::new(EgPoint::zero(), area.size);
        let mut cropped = self.target.cropped(&area);
        let result = draw(&mut cropped.clipped(&local));
        self.note(result);
    }

    fn stroke(&self, color: Color) -> PrimitiveStyle<Rgb888> {
        PrimitiveStyle::with_stroke(self.rgb(color), 1)
    }

    fn fill(&self, color: Color) -> PrimitiveStyle<Rgb888> {
        PrimitiveStyle::with_fill(self.rgb(color))
    }

    /// Ellipse restricted to the selected quadrants
    fn ellipse(
        &mut self,
        ctx: &DrawContext,
        center: Point,
        rx: i32,
        ry: i32,
        style: PrimitiveStyle<Rgb888>,
        quadrants: u8,
    ) {
        let (rx, ry) = (rx.max(0), ry.max(0));
        let ellipse = Ellipse::with_center(
            eg_point(center),
            EgSize::new((2 * rx + 1) as u32, (2 * ry + 1) as u32),
        );
        let quad = EgSize::new((rx + 1) as u32, (ry + 1) as u32);
        let corners = [
            (0x1, EgPoint::new(center.x - rx, center.y - ry)),
            (0x2, EgPoint::new(center.x, center.y - ry)),
            (0x4, EgPoint::new(center.x, center.y)),
            (0x8, EgPoint::new(center.x - rx, center.y)),
        ];
        self.in_window(ctx, |t| {
            if quadrants & 0x0F == 0x0F {
                return ellipse.into_styled(style).draw(t);
            }
            for (bit, corner) in corners {
                if quadrants & bit != 0 {
                    let mut part = t.clipped(&Rectangle::new(corner, quad));
                    ellipse.into_styled(style).draw(&mut part)?;
                }
            }
            Ok(())
        });
    }

    fn text_width(&self, ctx: &DrawContext, text: &str) -> i32 {
        match ctx.font {
            FontId::SevenSeg => seven_seg::text_width(text, &ctx.text.seven_seg),
            font => text.chars().count() as i32 * fonts::advance(mono_font(font)),
        }
    }

    /// Draw one line of text with its top-left corner at `origin`
    fn text_line(&mut self, ctx: &DrawContext, text: &str, origin: EgPoint) {
        let fg = self.rgb(ctx.fg);
        let bg = self.rgb(ctx.bg);
        let turn = (ctx.text.rotation % 360 != 0).then(|| Turn::new(origin, ctx.text.rotation));

        if ctx.font == FontId::SevenSeg {
            let style = ctx.text.seven_seg;
            self.in_window(ctx, |t| match turn {
                Some(turn) => seven_seg::draw(&mut Rotated::new(t, turn), text, origin, &style, fg),
                None => seven_seg::draw(t, text, origin, &style, fg),
            });
            return;
        }

        let mut builder = MonoTextStyleBuilder::new()
            .font(mono_font(ctx.font))
            .text_color(fg);
        if !ctx.text.transparent {
            builder = builder.background_color(bg);
        }
        let character_style = builder.build();
        let text_style = TextStyleBuilder::new().baseline(Baseline::Top).build();
        let drawable = Text::with_text_style(text, origin, character_style, text_style);

        self.in_window(ctx, |t| {
            let drawn = match turn {
                Some(turn) => drawable.draw(&mut Rotated::new(t, turn)),
                None => drawable.draw(t),
            };
            drawn.map(|_| ())
        });
    }
}

impl<D> Canvas for EgCanvas<D>
where
    D: DrawTarget<Color = Rgb888> + OriginDimensions + PanelControl,
{
    fn size(&self) -> Size {
        let size = self.target.size();
        Size::new(size.width as i32, size.height as i32)
    }

    fn line_height(&self, font: FontId) -> i32 {
        fonts::line_height(font)
    }

    fn font_available(&self, font: FontId) -> bool {
        !matches!(font, FontId::User(_))
    }

    fn has_filesystem(&self) -> bool {
        false
    }

    fn set_rotation(&mut self, rotation: Rotation) {
        self.target.set_rotation(rotation);
    }

    fn set_color_depth(&mut self, depth: ColorDepth) {
        self.target.set_color_depth(depth);
    }

    fn set_grayscale(&mut self, enabled: bool) {
        self.grayscale = enabled;
    }

    fn fill_screen(&mut self, color: Color) {
        let rgb = self.rgb(color);
        let result = self.target.clear(rgb);
        self.note(result);
    }

    fn fill_window(&mut self, ctx: &DrawContext, color: Color) {
        let rgb = self.rgb(color);
        let area = window_rect(&ctx.clip);
        let result = self.target.fill_solid(&area, rgb);
        self.note(result);
    }

    fn draw_pixel(&mut self, ctx: &DrawContext, at: Point, color: Color) {
        let rgb = self.rgb(color);
        self.in_window(ctx, |t| Pixel(eg_point(at), rgb).draw(t));
    }

    fn draw_line(&mut self, ctx: &DrawContext, from: Point, to: Point, color: Color) {
        let style = self.stroke(color);
        let line = Line::new(eg_point(from), eg_point(to));
        self.in_window(ctx, |t| line.into_styled(style).draw(t));
    }

    fn draw_line_by_angle(
        &mut self,
        ctx: &DrawContext,
        center: Point,
        start: i32,
        length: i32,
        angle: i32,
        color: Color,
    ) {
        let dir = heading(angle as f32);
        let line = Line::new(along(center, start, dir), along(center, start + length, dir));
        let style = self.stroke(color);
        self.in_window(ctx, |t| line.into_styled(style).draw(t));
    }

    fn draw_rect(&mut self, ctx: &DrawContext, rect: Rect, color: Color) {
        let style = self.stroke(color);
        self.in_window(ctx, |t| eg_rect(rect).into_styled(style).draw(t));
    }

    fn fill_rect(&mut self, ctx: &DrawContext, rect: Rect, color: Color) {
        let style = self.fill(color);
        self.in_window(ctx, |t| eg_rect(rect).into_styled(style).draw(t));
    }

    fn draw_circle(&mut self, ctx: &DrawContext, center: Point, radius: i32, color: Color) {
        let style = self.stroke(color);
        let circle = Circle::with_center(eg_point(center), (2 * radius.max(0) + 1) as u32);
        self.in_window(ctx, |t| circle.into_styled(style).draw(t));
    }

    fn fill_circle(&mut self, ctx: &DrawContext, center: Point, radius: i32, color: Color) {
        let style = self.fill(color);
        let circle = Circle::with_center(eg_point(center), (2 * radius.max(0) + 1) as u32);
        self.in_window(ctx, |t| circle.into_styled(style).draw(t));
    }

    fn draw_ellipse(
        &mut self,
        ctx: &DrawContext,
        center: Point,
        rx: i32,
        ry: i32,
        color: Color,
        quadrants: u8,
    ) {
        let style = self.stroke(color);
        self.ellipse(ctx, center, rx, ry, style, quadrants);
    }

    fn fill_ellipse(
        &mut self,
        ctx: &DrawContext,
        center: Point,
        rx: i32,
        ry: i32,
        color: Color,
        quadrants: u8,
    ) {
        let style = self.fill(color);
        self.ellipse(ctx, center, rx, ry, style, quadrants);
    }

    fn draw_triangle(&mut self, ctx: &DrawContext, points: [Point; 3], color: Color) {
        let style = self.stroke(color);
        let [a, b, c] = points.map(eg_point);
        self.in_window(ctx, |t| Triangle::new(a, b, c).into_styled(style).draw(t));
    }

    fn fill_triangle(&mut self, ctx: &DrawContext, points: [Point; 3], color: Color) {
        let style = self.fill(color);
        let [a, b, c] = points.map(eg_point);
        self.in_window(ctx, |t| Triangle::new(a, b, c).into_styled(style).draw(t));
    }

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
    ) {
        let radius = radius.max(1);
        let thickness = thickness.clamp(1, radius);
        let mut sweep = end - start;
        if sweep <= 0.0 {
            sweep += 360.0;
        }
        // embedded-graphics measures from 3 o'clock
        let angle_start = Angle::from_degrees(start - 90.0);
        let angle_sweep = Angle::from_degrees(sweep);

        let band_radius = radius - thickness / 2;
        let band = Arc::with_center(eg_point(center), (2 * band_radius + 1) as u32, angle_start, angle_sweep);
        let band_style = PrimitiveStyle::with_stroke(self.rgb(fill), thickness as u32);

        let outline = (color != fill).then(|| {
            let outer = Arc::with_center(eg_point(center), (2 * radius + 1) as u32, angle_start, angle_sweep);
            let inner_radius = radius - thickness + 1;
            let inner = Arc::with_center(
                eg_point(center),
                (2 * inner_radius.max(0) + 1) as u32,
                angle_start,
                angle_sweep,
            );
            let ends = [start, start + sweep].map(|deg| {
                let dir = heading(deg);
                Line::new(along(center, inner_radius, dir), along(center, radius, dir))
            });
            (outer, inner, ends)
        });
        let edge = self.stroke(color);

        self.in_window(ctx, |t| {
            band.into_styled(band_style).draw(t)?;
            if let Some((outer, inner, ends)) = outline {
                outer.into_styled(edge).draw(t)?;
                inner.into_styled(edge).draw(t)?;
                for line in ends {
                    line.into_styled(edge).draw(t)?;
                }
            }
            Ok(())
        });
    }

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
    ) {
        let sides = (sides as usize).clamp(3, MAX_POLYGON_SIDES);
        let mut vertices: Vec<EgPoint, { MAX_POLYGON_SIDES + 1 }> = Vec::new();
        for i in 0..sides {
            let deg = rotation as f32 + i as f32 * 360.0 / sides as f32;
            let _ = vertices.push(along(center, radius, heading(deg)));
        }
        if let Some(&first) = vertices.first() {
            let _ = vertices.push(first);
        }

        let hub = eg_point(center);
        let fill_style = (fill != color).then(|| self.fill(fill));
        let edge = PrimitiveStyle::with_stroke(self.rgb(color), thickness.max(1) as u32);

        self.in_window(ctx, |t| {
            if let Some(fill_style) = fill_style {
                for pair in vertices.windows(2) {
                    Triangle::new(hub, pair[0], pair[1])
                        .into_styled(fill_style)
                        .draw(t)?;
                }
            }
            Polyline::new(&vertices).into_styled(edge).draw(t)
        });
    }

    fn print(&mut self, ctx: &DrawContext, text: &str, x: Pos, y: Pos) {
        let width = ctx.clip.width();
        let height = ctx.clip.height();
        let line_height = match ctx.font {
            FontId::SevenSeg => seven_seg::cell_height(&ctx.text.seven_seg),
            font => fonts::line_height(font),
        };

        let left = match x {
            Pos::At(v) => v.max(0),
            Pos::Center | Pos::End => 0,
        };
        let fits = self.text_width(ctx, text) <= width - left;
        if !ctx.text.wrap || fits || ctx.font == FontId::SevenSeg {
            let origin = EgPoint::new(
                align(x, width, self.text_width(ctx, text)),
                align(y, height, line_height),
            );
            self.text_line(ctx, text, origin);
            return;
        }

        let advance = fonts::advance(mono_font(ctx.font));
        let max_chars = (((width - left) / advance).max(1) as usize).min(MAX_LINE_CHARS);
        let line_count = wrap_lines(text, max_chars).count() as i32;
        let mut top = align(y, height, line_count * line_height);
        for line in wrap_lines(text, max_chars) {
            let line_x = align(x, width, self.text_width(ctx, line));
            self.text_line(ctx, line, EgPoint::new(line_x, top));
            top += line_height;
        }
    }

    fn draw_image(
        &mut self,
        _ctx: &DrawContext,
        _format: ImageFormat,
        _path: &str,
        _scale: u8,
    ) -> Result<(), CanvasError> {
        Err(CanvasError::ResourceUnavailable)
    }

    fn write_line(
        &mut self,
        ctx: &DrawContext,
        y: i32,
        pixels: &[Color],
    ) -> Result<(), CanvasError> {
        let grayscale = self.grayscale;
        let row = Rectangle::new(EgPoint::new(0, y), EgSize::new(pixels.len() as u32, 1));
        let colors = pixels.iter().map(|c| {
            let c = if grayscale { c.to_grayscale() } else { *c };
            Rgb888::new(c.r, c.g, c.b)
        });
        let area = window_rect(&ctx.clip);
        let local = Rectangle::new(EgPoint::zero(), area.size);
        self.target
            .cropped(&area)
            .clipped(&local)
            .fill_contiguous(&row, colors)
            .map_err(|_| CanvasError::Bus)
    }
}
