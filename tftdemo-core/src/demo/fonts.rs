//! Font phase: built-in fonts, fonts from file, rotated text, seven-segment
//! clock and text wrapped inside a window

use core::fmt::Write;

use embedded_hal_async::delay::DelayNs;
use heapless::String;
use rand_core::RngCore;
use tftdemo_hal::{Monotonic, TouchSource, WallClock};

use super::{diag, Demo, PhaseResult};
use crate::gfx::{Color, FontId, Rect, SevenSegStyle, UserFont};
use crate::traits::{Canvas, Pos};

const WELCOME: &str = "Welcome to ESP32";

const WINDOW_TEXT: &str = "This text is printed inside the window. Long line can be wrapped \
                           to next line. Welcome to ESP32";

/// Fonts loaded from the filesystem: font, sample text, gap below
const FILE_FONTS: [(UserFont, &str, i32); 4] = [
    (UserFont::DotMatrixM, "Welcome to ESP32", 10),
    (UserFont::SmallFont, "Small proportional font", 10),
    (UserFont::Ubuntu, "Ubuntu font", 4),
    (UserFont::Grotesk24x48, "Grotesk 24x48", 4),
];

impl<C, T, W, M, D, R> Demo<C, T, W, M, D, R>
where
    C: Canvas,
    T: TouchSource,
    W: WallClock,
    M: Monotonic,
    D: DelayNs,
    R: RngCore,
{
    pub(crate) async fn fonts(&mut self) -> PhaseResult {
        let budget = self.budget_ms();

        self.header("FONT DEMO");
        self.run_bounded(budget, 50, |demo| {
            let mut y = 4;
            for font in FontId::BUILTIN {
                let color = demo.random_color();
                let screen = &mut demo.screen;
                screen.set_fg(color);
                screen.set_font(font);
                screen.print(WELCOME, Pos::At(0), Pos::At(y));
                y += screen.line_height() + 4;
            }
        })
        .await?;

        if self.screen.canvas().has_filesystem() {
            self.header("FONT FROM FILE DEMO");
            self.run_bounded(budget, 50, |demo| {
                let mut y = 8;
                for (font, text, gap) in FILE_FONTS {
                    let font = FontId::User(font);
                    if !demo.screen.canvas().font_available(font) {
                        continue;
                    }
                    let color = demo.random_color();
                    let screen = &mut demo.screen;
                    screen.set_fg(color);
                    screen.set_font(font);
                    screen.print(text, Pos::At(0), Pos::At(y));
                    y += screen.line_height() + gap;
                }
            })
            .await?;
        } else {
            diag!(self, "No file system, font from file demo skipped");
        }

        self.rotated_text(budget).await?;
        self.seven_segment(budget.saturating_mul(2)).await?;
        self.text_window(budget).await
    }

    async fn rotated_text(&mut self, budget: u32) -> PhaseResult {
        self.header("ROTATED FONT DEMO");
        let result = self
            .run_bounded(budget, 200, |demo| {
                let (w, h) = demo.window();
                for font in FontId::BUILTIN {
                    let color = demo.random_color();
                    demo.screen.set_fg(color);
                    demo.screen.set_font(font);
                    let fh = demo.screen.line_height();
                    let x = demo.rand(8, w - 1 - 8);
                    let y = demo.rand(0, h - 1 - fh - 2);
                    let angle = demo.rand(0, 359) as u16;
                    demo.screen.ctx_mut().text.rotation = angle;
                    demo.screen.print(WELCOME, Pos::At(x), Pos::At(y));
                }
            })
            .await;
        self.screen.ctx_mut().text.rotation = 0;
        result
    }

    /// "MM:SS:mmm" and "SS:cc" in the seven-segment font
    ///
    /// Milliseconds count from the moment the wall clock second last
    /// changed, so the fraction restarts on every second.
    async fn seven_segment(&mut self, budget: u32) -> PhaseResult {
        self.header("7-SEG FONT DEMO");

        let mut last_sec = None;
        let mut second_start = self.now_ms();
        self.run_bounded(budget, 50, |demo| {
            let now = demo.now_ms();
            let time = demo.waiter.wall_time();
            if last_sec != Some(time.second()) {
                last_sec = Some(time.second());
                second_start = now;
            }
            let ms = now - second_start;

            let color = demo.random_color();
            let screen = &mut demo.screen;
            screen.set_fg(color);
            screen.set_font(FontId::SevenSeg);

            let mut y = 40;
            let mut text = String::<16>::new();
            let _ = write!(text, "{:02}:{:02}:{:03}", time.minute(), time.second(), ms);
            screen.ctx_mut().text.seven_seg = seven_seg(8, 2);
            screen.print(&text, Pos::At(0), Pos::At(y));
            y += screen.line_height() * 2;

            text.clear();
            let _ = write!(text, "{:02}:{:02}", time.second(), ms / 10);
            screen.ctx_mut().text.seven_seg = seven_seg(14, 3);
            screen.print(&text, Pos::At(0), Pos::At(y));
        })
        .await
    }

    /// Wrapped text inside a framed sub-window
    ///
    /// The phase's own context is copied and put back by hand; the single
    /// save slot stays free for the clock overlay.
    async fn text_window(&mut self, budget: u32) -> PhaseResult {
        self.header("WINDOW DEMO");

        let saved = *self.screen.ctx();
        let size = self.screen.size();
        let (right, bottom) = (size.width * 3 / 4, size.height * 3 / 4);

        self.screen.reset_clip();
        self.screen
            .draw_rect(Rect::new(38, 48, right - 36, bottom - 46), Color::WHITE);
        self.screen.set_clip(40, 50, right, bottom);
        self.screen.set_font(FontId::Ubuntu16);
        self.screen.ctx_mut().text.wrap = true;

        let result = self
            .run_bounded(budget, 200, |demo| {
                let color = demo.random_color();
                demo.screen.set_fg(color);
                demo.screen.print(WINDOW_TEXT, Pos::At(0), Pos::At(0));
            })
            .await;

        *self.screen.ctx_mut() = saved;
        result
    }
}

fn seven_seg(length: u8, width: u8) -> SevenSegStyle {
    SevenSegStyle {
        length,
        width,
        outline: true,
        outline_color: Color::DARKGREY,
    }
}
