//! Host fakes shared by the unit tests
//!
//! `FakeTime` is a single simulated clock: `FakeDelay` advances it, the
//! monotonic and wall clocks read it, and `ScriptedTouch` decides from it
//! whether the panel is pressed.

use core::cell::{Cell, RefCell};
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;
use tftdemo_hal::{Monotonic, TouchPoint, TouchSource, WallClock, WallTime};

use crate::gfx::{ClipWindow, Color, DrawContext, FontId, Point, Rect, Size};
use crate::traits::{Canvas, CanvasError, ColorDepth, ImageFormat, Pos, Rotation};

struct TimeState {
    now_us: Cell<u64>,
    wall_base: WallTime,
    sleeps: RefCell<Vec<u32>>,
}

/// Simulated time, in microseconds since boot
///
/// Clones share the same clock.
#[derive(Clone)]
pub struct FakeTime {
    state: Rc<TimeState>,
}

impl FakeTime {
    pub fn new() -> Self {
        Self::starting_at(WallTime::from_hms(12, 0, 0))
    }

    pub fn starting_at(wall_base: WallTime) -> Self {
        Self {
            state: Rc::new(TimeState {
                now_us: Cell::new(0),
                wall_base,
                sleeps: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn advance_us(&self, us: u64) {
        let now = &self.state.now_us;
        now.set(now.get() + us);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1000);
    }

    /// Every sleep requested through a `FakeDelay`, in milliseconds
    pub fn sleeps(&self) -> Vec<u32> {
        self.state.sleeps.borrow().clone()
    }

    pub fn delay(&self) -> FakeDelay<'_> {
        FakeDelay { time: self }
    }
}

impl Monotonic for FakeTime {
    fn now_ms(&self) -> u64 {
        self.state.now_us.get() / 1000
    }
}

impl WallClock for FakeTime {
    fn now(&self) -> WallTime {
        self.state.wall_base.plus_secs(self.state.now_us.get() / 1_000_000)
    }
}

/// Delay that returns immediately after advancing the fake clock
pub struct FakeDelay<'a> {
    time: &'a FakeTime,
}

impl DelayNs for FakeDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.time.advance_us(ns as u64 / 1000);
    }

    async fn delay_us(&mut self, us: u32) {
        self.time.advance_us(us as u64);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.time.state.sleeps.borrow_mut().push(ms);
        self.time.advance_ms(ms as u64);
    }
}

/// Touch panel pressed during fixed windows of simulated time
pub struct ScriptedTouch<'a> {
    time: &'a FakeTime,
    /// `(from_ms, until_ms, point)`, pressed while `from <= now < until`
    presses: Vec<(u64, u64, TouchPoint)>,
    pub reads: usize,
    pub quarter_turns: u8,
}

impl<'a> ScriptedTouch<'a> {
    pub fn new(time: &'a FakeTime) -> Self {
        Self {
            time,
            presses: Vec::new(),
            reads: 0,
            quarter_turns: 0,
        }
    }

    pub fn press(mut self, from_ms: u64, until_ms: u64, x: i32, y: i32) -> Self {
        self.presses.push((from_ms, until_ms, TouchPoint::new(x, y)));
        self
    }
}

impl TouchSource for ScriptedTouch<'_> {
    fn read_touch(&mut self) -> Option<TouchPoint> {
        self.reads += 1;
        let now = self.time.now_ms();
        self.presses
            .iter()
            .find(|(from, until, _)| *from <= now && now < *until)
            .map(|(_, _, p)| *p)
    }

    fn set_quarter_turns(&mut self, quarter_turns: u8) {
        self.quarter_turns = quarter_turns;
    }
}

/// A recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    FillScreen(Color),
    FillWindow(ClipWindow, Color),
    FillRect(DrawContext, Rect, Color),
    DrawRect(DrawContext, Rect, Color),
    Print(DrawContext, String, Pos, Pos),
    Pixel(DrawContext, Point, Color),
    /// Shape name, context and anchor (start, center or first vertex)
    Shape(&'static str, DrawContext, Point),
    Image(ImageFormat, String, u8),
    WriteLine(i32, usize),
    Rotation(Rotation),
    Depth(ColorDepth),
    Grayscale(bool),
}

/// Canvas that records every call instead of drawing
///
/// When built with [`RecordingCanvas::timed`] every call costs one
/// millisecond of simulated time, so deadline-bound loops terminate.
pub struct RecordingCanvas {
    portrait: Size,
    rotation: Rotation,
    time: Option<FakeTime>,
    pub filesystem: bool,
    pub ops: Vec<Op>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::with_size(240, 320)
    }

    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            portrait: Size::new(width, height),
            rotation: Rotation::Portrait,
            time: None,
            filesystem: false,
            ops: Vec::new(),
        }
    }

    pub fn timed(time: &FakeTime) -> Self {
        Self {
            time: Some(time.clone()),
            ..Self::new()
        }
    }

    fn record(&mut self, op: Op) {
        if let Some(time) = &self.time {
            time.advance_ms(1);
        }
        self.ops.push(op);
    }

    /// Texts printed so far, in order
    pub fn printed(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Print(_, text, _, _) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, f: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| f(op)).count()
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Size {
        if self.rotation.is_landscape() {
            Size::new(self.portrait.height, self.portrait.width)
        } else {
            self.portrait
        }
    }

    fn line_height(&self, font: FontId) -> i32 {
        match font {
            FontId::Default => 13,
            FontId::Small => 8,
            _ => 20,
        }
    }

    fn font_available(&self, font: FontId) -> bool {
        !matches!(font, FontId::User(_)) || self.filesystem
    }

    fn has_filesystem(&self) -> bool {
        self.filesystem
    }

    fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
        self.record(Op::Rotation(rotation));
    }

    fn set_color_depth(&mut self, depth: ColorDepth) {
        self.record(Op::Depth(depth));
    }

    fn set_grayscale(&mut self, enabled: bool) {
        self.record(Op::Grayscale(enabled));
    }

    fn fill_screen(&mut self, color: Color) {
        self.record(Op::FillScreen(color));
    }

    fn fill_window(&mut self, ctx: &DrawContext, color: Color) {
        self.record(Op::FillWindow(ctx.clip, color));
    }

    fn draw_pixel(&mut self, ctx: &DrawContext, at: Point, color: Color) {
        self.record(Op::Pixel(*ctx, at, color));
    }

    fn draw_line(&mut self, ctx: &DrawContext, from: Point, _to: Point, _color: Color) {
        self.record(Op::Shape("line", *ctx, from));
    }

    fn draw_line_by_angle(
        &mut self,
        ctx: &DrawContext,
        center: Point,
        _start: i32,
        _length: i32,
        _angle: i32,
        _color: Color,
    ) {
        self.record(Op::Shape("line_by_angle", *ctx, center));
    }

    fn draw_rect(&mut self, ctx: &DrawContext, rect: Rect, color: Color) {
        self.record(Op::DrawRect(*ctx, rect, color));
    }

    fn fill_rect(&mut self, ctx: &DrawContext, rect: Rect, color: Color) {
        self.record(Op::FillRect(*ctx, rect, color));
    }

    fn draw_circle(&mut self, ctx: &DrawContext, center: Point, _radius: i32, _color: Color) {
        self.record(Op::Shape("circle", *ctx, center));
    }

    fn fill_circle(&mut self, ctx: &DrawContext, center: Point, _radius: i32, _color: Color) {
        self.record(Op::Shape("fill_circle", *ctx, center));
    }

    fn draw_ellipse(
        &mut self,
        ctx: &DrawContext,
        center: Point,
        _rx: i32,
        _ry: i32,
        _color: Color,
        _quadrants: u8,
    ) {
        self.record(Op::Shape("ellipse", *ctx, center));
    }

    fn fill_ellipse(
        &mut self,
        ctx: &DrawContext,
        center: Point,
        _rx: i32,
        _ry: i32,
        _color: Color,
        _quadrants: u8,
    ) {
        self.record(Op::Shape("fill_ellipse", *ctx, center));
    }

    fn draw_triangle(&mut self, ctx: &DrawContext, points: [Point; 3], _color: Color) {
        self.record(Op::Shape("triangle", *ctx, points[0]));
    }

    fn fill_triangle(&mut self, ctx: &DrawContext, points: [Point; 3], _color: Color) {
        self.record(Op::Shape("fill_triangle", *ctx, points[0]));
    }

    fn draw_arc(
        &mut self,
        ctx: &DrawContext,
        center: Point,
        _radius: i32,
        _thickness: i32,
        _start: f32,
        _end: f32,
        _color: Color,
        _fill: Color,
    ) {
        self.record(Op::Shape("arc", *ctx, center));
    }

    fn draw_polygon(
        &mut self,
        ctx: &DrawContext,
        center: Point,
        _sides: u8,
        _radius: i32,
        _color: Color,
        _fill: Color,
        _rotation: i32,
        _thickness: i32,
    ) {
        self.record(Op::Shape("polygon", *ctx, center));
    }

    fn print(&mut self, ctx: &DrawContext, text: &str, x: Pos, y: Pos) {
        self.record(Op::Print(*ctx, text.to_string(), x, y));
    }

    fn draw_image(
        &mut self,
        _ctx: &DrawContext,
        format: ImageFormat,
        path: &str,
        scale: u8,
    ) -> Result<(), CanvasError> {
        if !self.filesystem {
            return Err(CanvasError::ResourceUnavailable);
        }
        self.record(Op::Image(format, path.to_string(), scale));
        Ok(())
    }

    fn write_line(
        &mut self,
        _ctx: &DrawContext,
        y: i32,
        pixels: &[Color],
    ) -> Result<(), CanvasError> {
        self.record(Op::WriteLine(y, pixels.len()));
        Ok(())
    }
}
