//! Demo phases
//!
//! [`Demo`] owns the draw surface, the cooperative waiter and the random
//! generator, and implements [`PhaseRunner`] so the scheduler can drive it.
//! Every phase is deadline-bound and checks for touch through
//! [`CooperativeWaiter::wait`]; an interrupted wait ends the phase.

mod fonts;
mod images;
mod shapes;
mod touch;

use core::fmt::Write;

use embedded_hal_async::delay::DelayNs;
use rand_core::RngCore;
use tftdemo_hal::{Monotonic, TouchSource, WallClock};

use crate::config::DemoConfig;
use crate::gfx::{Color, FontId, Rect, Screen, TextAttrs};
use crate::input::InputSampler;
use crate::overlay::{ClockOverlay, BAND_GREY};
use crate::random::RandomColorGenerator;
use crate::scheduler::{
    settings_for_pass, Deadline, DemoScheduler, PassSettings, PhaseExit, PhaseKind, PhaseRunner,
};
use crate::traits::{Canvas, Pos, Rotation};
use crate::wait::CooperativeWaiter;

/// Diagnostic output, gated by the current pass's diagnostics flag
macro_rules! diag {
    ($demo:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        {
            if $demo.settings.diagnostics {
                defmt::info!($fmt $(, $arg)*);
            }
        }
        #[cfg(not(feature = "defmt"))]
        {
            let _ = &$demo;
            $(let _ = &$arg;)*
        }
    }};
}
pub(crate) use diag;

/// A wait inside a phase saw a touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Interrupted;

pub(crate) type PhaseResult = Result<(), Interrupted>;

/// The demo: surface, waiter, clocks and random source
pub struct Demo<C, T, W, M, D, R> {
    screen: Screen<C>,
    waiter: CooperativeWaiter<T, W, D>,
    clock: M,
    rng: RandomColorGenerator<R>,
    config: DemoConfig,
    settings: PassSettings,
}

impl<C, T, W, M, D, R> Demo<C, T, W, M, D, R>
where
    C: Canvas,
    T: TouchSource,
    W: WallClock,
    M: Monotonic,
    D: DelayNs,
    R: RngCore,
{
    /// Assemble the demo from board parts
    pub fn new(
        config: DemoConfig,
        canvas: C,
        touch: T,
        wall: W,
        clock: M,
        delay: D,
        rng: R,
    ) -> Self {
        let waiter = CooperativeWaiter::with_quantum(
            ClockOverlay::new(wall),
            InputSampler::with_drain_interval(touch, config.timing.drain_interval_ms),
            delay,
            config.timing.quantum_ms,
        );
        Self {
            screen: Screen::new(canvas),
            waiter,
            clock,
            rng: RandomColorGenerator::new(rng),
            settings: settings_for_pass(0, &config.base_settings()),
            config,
        }
    }

    pub fn screen(&self) -> &Screen<C> {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen<C> {
        &mut self.screen
    }

    pub fn waiter(&self) -> &CooperativeWaiter<T, W, D> {
        &self.waiter
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Settings of the pass in progress
    pub fn settings(&self) -> &PassSettings {
        &self.settings
    }

    /// Show the intro screen, then run passes forever
    pub async fn run_forever(&mut self) -> ! {
        self.intro().await;
        let mut scheduler = DemoScheduler::new(self.config.base_settings());
        scheduler.run(self).await
    }

    /// Title screen shown once at boot
    ///
    /// Ends with a plain sleep: touches are not looked at here.
    pub async fn intro(&mut self) {
        let display = self.config.display;
        self.rotate(display.rotation);
        self.screen.set_color_depth(display.color_depth);
        self.screen.set_grayscale(false);

        self.header("ESP32 TFT DEMO");

        self.screen.set_font(FontId::Comic24);
        let step = self.screen.line_height() + 4;
        let mut y = (self.screen.clip().height() - 1) / 2 - step;
        self.screen.set_fg(Color::ORANGE);
        self.screen.print("ESP32", Pos::Center, Pos::At(y));

        self.screen.set_font(FontId::Ubuntu16);
        self.screen.set_fg(Color::CYAN);
        y += step;
        self.screen.print("TFT Demo", Pos::Center, Pos::At(y));

        y += self.screen.line_height() + 4;
        self.screen.set_font(FontId::Default);
        self.screen.set_fg(Color::GREEN);
        let mut text = heapless::String::<32>::new();
        let mhz = display.read_clock_hz as f32 / 1_000_000.0;
        let _ = write!(text, "Read speed: {:5.2} MHz", mhz);
        self.screen.print(&text, Pos::Center, Pos::At(y));

        self.waiter.sleep_ms(self.config.timing.intro_ms).await;
    }

    /// Clear the screen and draw the title and clock bands
    ///
    /// Leaves the clip window on the area between the bands, background
    /// black and text attributes reset.
    pub fn header(&mut self, title: &str) {
        let screen = &mut self.screen;
        screen.fill_screen(Color::BLACK);
        screen.reset_clip();

        screen.set_fg(Color::YELLOW);
        screen.set_bg(BAND_GREY);
        screen.set_font(FontId::Default);
        screen.ctx_mut().text = TextAttrs::default();

        let size = screen.size();
        let fh = screen.line_height();
        let top = Rect::new(0, 0, size.width - 1, fh + 8);
        let bottom = Rect::new(0, size.height - fh - 9, size.width - 1, fh + 8);
        for band in [top, bottom] {
            screen.fill_rect(band, BAND_GREY);
            screen.draw_rect(band, Color::CYAN);
        }

        screen.print(title, Pos::Center, Pos::At(4));
        self.waiter.stamp_overlay(screen);

        screen.set_bg(Color::BLACK);
        screen.set_clip(0, fh + 9, size.width - 1, size.height - fh - 10);
    }

    /// Rotate the display and keep touch coordinates in step with it
    fn rotate(&mut self, rotation: Rotation) {
        self.screen.set_rotation(rotation);
        self.waiter
            .input_mut()
            .source_mut()
            .set_quarter_turns(rotation.index());
    }

    pub(crate) fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Time each phase (and each variant of a phase) runs
    pub(crate) fn budget_ms(&self) -> u32 {
        self.config.phase_budget_ms()
    }

    pub(crate) fn rand(&mut self, min: i32, max: i32) -> i32 {
        self.rng.uniform_int(min, max)
    }

    pub(crate) fn random_color(&mut self) -> Color {
        self.rng.random_color()
    }

    /// Clip window extent as (width, height)
    pub(crate) fn window(&self) -> (i32, i32) {
        let clip = self.screen.clip();
        (clip.width(), clip.height())
    }

    /// Cooperative wait; a touch becomes [`Interrupted`]
    pub(crate) async fn pause(&mut self, ms: u32) -> PhaseResult {
        if self.waiter.wait(&mut self.screen, ms).await.is_interrupted() {
            return Err(Interrupted);
        }
        Ok(())
    }

    /// Repeat `body` until `budget_ms` has passed
    ///
    /// Each iteration starts with a zero-length wait and ends with a wait of
    /// `pause_ms` (skipped when zero). Either wait seeing a touch ends the
    /// loop with [`Interrupted`].
    pub(crate) async fn run_bounded<F>(
        &mut self,
        budget_ms: u32,
        pause_ms: u32,
        mut body: F,
    ) -> PhaseResult
    where
        F: FnMut(&mut Self),
    {
        let deadline = Deadline::after(self.now_ms(), budget_ms);
        while !deadline.expired(self.now_ms()) {
            self.pause(0).await?;
            body(self);
            if pause_ms > 0 {
                self.pause(pause_ms).await?;
            }
        }
        Ok(())
    }
}

impl<C, T, W, M, D, R> PhaseRunner for Demo<C, T, W, M, D, R>
where
    C: Canvas,
    T: TouchSource,
    W: WallClock,
    M: Monotonic,
    D: DelayNs,
    R: RngCore,
{
    async fn begin_pass(&mut self, settings: &PassSettings) {
        self.settings = *settings;

        if settings.rotate_now {
            self.screen.set_bg(Color::BLACK);
            self.rotate(settings.rotation);
        }
        self.screen.set_color_depth(settings.color_depth);
        self.screen.set_grayscale(settings.grayscale);

        let size = self.screen.size();
        diag!(self, "====================================================");
        diag!(
            self,
            "Pass {}: display {}x{}, color mode {}-bit {}",
            settings.pass,
            size.width,
            size.height,
            settings.color_depth.bits(),
            if settings.grayscale { "Gray" } else { "Color" },
        );
        diag!(self, "Rotation: {}", settings.rotation.name());

        self.header("Welcome to ESP32");
    }

    async fn run_phase(&mut self, phase: PhaseKind) -> PhaseExit {
        let result = match phase {
            PhaseKind::Fonts => self.fonts().await,
            PhaseKind::Lines => self.lines().await,
            PhaseKind::AngledLines => self.angled_lines().await,
            PhaseKind::Rectangles => self.rectangles().await,
            PhaseKind::Circles => self.circles().await,
            PhaseKind::Ellipses => self.ellipses().await,
            PhaseKind::Arcs => self.arcs().await,
            PhaseKind::Triangles => self.triangles().await,
            PhaseKind::Polygons => self.polygons().await,
            PhaseKind::Pixels => self.pixels().await,
            PhaseKind::Images => self.images().await,
            PhaseKind::Touch => {
                if !self.config.display.touch {
                    return PhaseExit::Skipped;
                }
                self.touch().await
            }
        };

        match result {
            Ok(()) => PhaseExit::Completed,
            Err(Interrupted) => PhaseExit::Interrupted,
        }
    }
}
