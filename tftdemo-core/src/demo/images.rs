//! Image phase: raw transfer timing and jpg/bmp decoding

use embedded_hal_async::delay::DelayNs;
use heapless::Vec;
use rand_core::RngCore;
use tftdemo_hal::{Monotonic, TouchSource, WallClock};

use super::{diag, Demo, PhaseResult};
use crate::gfx::Color;
use crate::traits::{Canvas, ImageFormat};

/// Widest line the timing demo can buffer
pub const MAX_LINE_PIXELS: usize = 480;

/// Raw line writes in the timing demo
const TIMED_LINES: i32 = 1000;

/// Scaled jpgs: shrink factor exponent and path
const JPEGS: [(u8, &str); 3] = [
    (3, "/spiffs/images/test1.jpg"),
    (2, "/spiffs/images/test2.jpg"),
    (1, "/spiffs/images/test4.jpg"),
];
const FULL_JPEG: &str = "/spiffs/images/test3.jpg";
const BMP: &str = "/spiffs/images/tiger.bmp";

const IMAGE_PAUSE_MS: u32 = 500;

impl<C, T, W, M, D, R> Demo<C, T, W, M, D, R>
where
    C: Canvas,
    T: TouchSource,
    W: WallClock,
    M: Monotonic,
    D: DelayNs,
    R: RngCore,
{
    pub(crate) async fn images(&mut self) -> PhaseResult {
        self.header("IMAGE DEMO");

        if self.settings.diagnostics {
            self.transfer_timing().await?;
        }
        self.screen.fill_window(Color::BLACK);

        if self.screen.canvas().has_filesystem() {
            for (scale, path) in JPEGS {
                self.show_image(ImageFormat::Jpeg, path, scale);
                self.pause(IMAGE_PAUSE_MS).await?;
            }

            let start = self.now_ms();
            self.show_image(ImageFormat::Jpeg, FULL_JPEG, 0);
            diag!(self, "       JPG Decode time: {} ms", self.now_ms() - start);
            self.pause(IMAGE_PAUSE_MS).await?;

            for scale in (0..=5).rev() {
                let start = self.now_ms();
                self.show_image(ImageFormat::Bmp, BMP, scale);
                diag!(
                    self,
                    "    BMP time, scale: {}: {} ms",
                    scale,
                    self.now_ms() - start
                );
                self.pause(IMAGE_PAUSE_MS).await?;
            }
        } else {
            diag!(self, "  No file system found.");
        }

        self.pause(1000).await
    }

    fn show_image(&mut self, format: ImageFormat, path: &str, scale: u8) {
        if let Err(_e) = self.screen.draw_image(format, path, scale) {
            diag!(self, "Image {} not shown: {}", path, _e);
        }
    }

    /// Time a window clear and a burst of raw line writes
    ///
    /// Skipped when the window is wider than the line buffer.
    async fn transfer_timing(&mut self) -> PhaseResult {
        let (width, height) = self.window();
        if width as usize > MAX_LINE_PIXELS {
            diag!(self, "Line buffer too small for {} pixels, timing skipped", width);
            return Ok(());
        }

        let mut line: Vec<Color, MAX_LINE_PIXELS> = Vec::new();
        let hue = 10.0 / (height - 1).max(1) as f32 * 360.0;
        for x in 0..width {
            let brightness = x as f32 / width as f32;
            // capacity checked above
            let _ = line.push(Color::from_hsb(hue, 1.0, brightness));
        }

        let start = self.now_ms();
        self.screen.fill_window(Color::NAVY);
        diag!(self, "     Clear screen time: {} ms", self.now_ms() - start);

        let start = self.now_ms();
        for n in 0..TIMED_LINES {
            if let Err(_e) = self.screen.write_line(40 + (n & 63), &line) {
                diag!(self, "Line write failed: {}", _e);
                break;
            }
        }
        diag!(
            self,
            "Send color buffer time: {} ms ({} pixels)",
            self.now_ms() - start,
            width
        );

        self.pause(1000).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::scheduler::{settings_for_pass, PhaseRunner};
    use crate::testing::{FakeTime, Op, ScriptedTouch};
    use embassy_futures::block_on;

    #[test]
    fn test_timing_demo_writes_lines() {
        let time = FakeTime::new();
        let mut demo = demo(&time, ScriptedTouch::new(&time), 100);

        assert_eq!(block_on(demo.images()), Ok(()));

        let canvas = demo.screen().canvas();
        assert_eq!(canvas.count(|op| *op == Op::WriteLine(40, 240)), 16);
        assert_eq!(
            canvas.count(|op| matches!(op, Op::WriteLine(_, 240))),
            TIMED_LINES as usize
        );
        // no filesystem: nothing decoded
        assert_eq!(canvas.count(|op| matches!(op, Op::Image(..))), 0);
    }

    #[test]
    fn test_timing_demo_only_with_diagnostics() {
        let time = FakeTime::new();
        let mut demo = demo(&time, ScriptedTouch::new(&time), 100);
        let base = demo.config().base_settings();
        block_on(demo.begin_pass(&settings_for_pass(17, &base)));

        assert_eq!(block_on(demo.images()), Ok(()));

        let canvas = demo.screen().canvas();
        assert_eq!(canvas.count(|op| matches!(op, Op::WriteLine(..))), 0);
    }

    #[test]
    fn test_images_with_filesystem() {
        let time = FakeTime::new();
        let mut demo = demo(&time, ScriptedTouch::new(&time), 100);
        demo.screen_mut().canvas_mut().filesystem = true;

        assert_eq!(block_on(demo.images()), Ok(()));

        let images: std::vec::Vec<(ImageFormat, u8)> = demo
            .screen()
            .canvas()
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Image(format, _, scale) => Some((*format, *scale)),
                _ => None,
            })
            .collect();
        assert_eq!(
            images,
            std::vec![
                (ImageFormat::Jpeg, 3),
                (ImageFormat::Jpeg, 2),
                (ImageFormat::Jpeg, 1),
                (ImageFormat::Jpeg, 0),
                (ImageFormat::Bmp, 5),
                (ImageFormat::Bmp, 4),
                (ImageFormat::Bmp, 3),
                (ImageFormat::Bmp, 2),
                (ImageFormat::Bmp, 1),
                (ImageFormat::Bmp, 0),
            ]
        );
    }

    #[test]
    fn test_wide_window_skips_timing() {
        let time = FakeTime::new();
        let mut config = crate::config::DemoConfig::default();
        config.timing.phase_ms = Some(100);
        let mut demo = demo_with(&time, ScriptedTouch::new(&time), config);
        *demo.screen_mut().canvas_mut() = crate::testing::RecordingCanvas::with_size(500, 320);
        demo.screen_mut().reset_clip();

        assert_eq!(block_on(demo.images()), Ok(()));
        assert_eq!(
            demo.screen()
                .canvas()
                .count(|op| matches!(op, Op::WriteLine(..))),
            0
        );
    }
}
