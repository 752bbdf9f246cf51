//! Shape phases
//!
//! Coordinates are window-relative: `x2`/`y2` are the last column and row
//! of the clip window. Most phases run an outline variant and a filled
//! variant, clearing the window in between.

use embedded_hal_async::delay::DelayNs;
use rand_core::RngCore;
use tftdemo_hal::{Monotonic, TouchSource, WallClock};

use super::{Demo, PhaseResult};
use crate::gfx::{Color, Point, Rect};
use crate::traits::Canvas;

/// Pause between variants of a phase
const VARIANT_PAUSE_MS: u32 = 1000;

const POLY_SIDES: [u8; 6] = [3, 4, 5, 6, 8, 10];
const POLY_COLOR: [Color; 6] = [
    Color::WHITE,
    Color::CYAN,
    Color::RED,
    Color::BLUE,
    Color::YELLOW,
    Color::ORANGE,
];
const POLY_FILL: [Color; 6] = [
    Color::BLUE,
    Color::NAVY,
    Color::DARKGREEN,
    Color::DARKGREY,
    Color::LIGHTGREY,
    Color::OLIVE,
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
    /// Last window column and row
    fn extent(&self) -> (i32, i32) {
        let (w, h) = self.window();
        (w - 1, h - 1)
    }

    /// Window center
    fn center(&self) -> Point {
        let (x2, y2) = self.extent();
        Point::new(x2 / 2, y2 / 2)
    }

    /// Wait between variants, then clear the window
    async fn next_variant(&mut self) -> PhaseResult {
        self.pause(VARIANT_PAUSE_MS).await?;
        self.screen.fill_window(Color::BLACK);
        Ok(())
    }

    fn random_point(&mut self) -> Point {
        let (x2, y2) = self.extent();
        Point::new(self.rand(4, x2 - 4), self.rand(4, y2 - 2))
    }

    /// Random center at least 8 pixels from the edges, plus the smaller
    /// of its coordinates
    fn random_center(&mut self) -> (Point, i32) {
        let (x2, y2) = self.extent();
        let x = self.rand(8, x2 - 8);
        let y = self.rand(8, y2 - 8);
        (Point::new(x, y), x.min(y))
    }

    pub(crate) async fn lines(&mut self) -> PhaseResult {
        self.header("LINE DEMO");
        self.run_bounded(self.budget_ms(), 0, |demo| {
            let (x2, y2) = demo.extent();
            let from = Point::new(demo.rand(0, x2), demo.rand(0, y2));
            let to = Point::new(demo.rand(0, x2), demo.rand(0, y2));
            let color = demo.random_color();
            demo.screen.draw_line(from, to, color);
        })
        .await?;
        self.pause(VARIANT_PAUSE_MS).await
    }

    pub(crate) async fn angled_lines(&mut self) -> PhaseResult {
        self.header("LINE BY ANGLE DEMO");
        let center = self.center();
        let len = center.x.min(center.y) - 8;

        self.run_bounded(self.budget_ms(), 0, |demo| {
            for angle in 0..360 {
                let color = demo.random_color();
                demo.screen.draw_line_by_angle(center, 0, len, angle, color);
            }
        })
        .await?;
        self.next_variant().await?;

        self.run_bounded(self.budget_ms(), 0, |demo| {
            for start in [len / 4, len * 3 / 4] {
                for angle in 0..360 {
                    let color = demo.random_color();
                    demo.screen
                        .draw_line_by_angle(center, start, len / 4, angle, color);
                }
            }
        })
        .await?;
        self.pause(VARIANT_PAUSE_MS).await
    }

    pub(crate) async fn rectangles(&mut self) -> PhaseResult {
        self.header("RECTANGLE DEMO");
        for filled in [false, true] {
            self.run_bounded(self.budget_ms(), 0, |demo| {
                let rect = demo.random_rect();
                if filled {
                    let fill = demo.random_color();
                    demo.screen.fill_rect(rect, fill);
                }
                let color = demo.random_color();
                demo.screen.draw_rect(rect, color);
            })
            .await?;
            if filled {
                self.pause(VARIANT_PAUSE_MS).await?;
            } else {
                self.next_variant().await?;
            }
        }
        Ok(())
    }

    fn random_rect(&mut self) -> Rect {
        let (x2, y2) = self.extent();
        let x = self.rand(4, x2 - 4);
        let y = self.rand(4, y2 - 2);
        let w = self.rand(2, x2 - x);
        let h = self.rand(2, y2 - y);
        Rect::new(x, y, w, h)
    }

    pub(crate) async fn circles(&mut self) -> PhaseResult {
        self.header("CIRCLE DEMO");
        for filled in [false, true] {
            self.run_bounded(self.budget_ms(), 0, |demo| {
                let (center, near) = demo.random_center();
                let r = demo.rand(2, near / 2);
                if filled {
                    let fill = demo.random_color();
                    demo.screen.fill_circle(center, r, fill);
                }
                let color = demo.random_color();
                demo.screen.draw_circle(center, r, color);
            })
            .await?;
            if filled {
                self.pause(VARIANT_PAUSE_MS).await?;
            } else {
                self.next_variant().await?;
            }
        }
        Ok(())
    }

    /// Outline, filled, then filled with a rotating single quadrant
    pub(crate) async fn ellipses(&mut self) -> PhaseResult {
        self.header("ELLIPSE DEMO");

        self.run_bounded(self.budget_ms(), 0, |demo| {
            let (center, rx, ry) = demo.random_ellipse();
            let color = demo.random_color();
            demo.screen.draw_ellipse(center, rx, ry, color, 0x0f);
        })
        .await?;
        self.next_variant().await?;

        self.run_bounded(self.budget_ms(), 0, |demo| {
            let (center, rx, ry) = demo.random_ellipse();
            let fill = demo.random_color();
            demo.screen.fill_ellipse(center, rx, ry, fill, 0x0f);
            let color = demo.random_color();
            demo.screen.draw_ellipse(center, rx, ry, color, 0x0f);
        })
        .await?;
        self.next_variant().await?;

        let mut quadrant = 1u8;
        self.run_bounded(self.budget_ms(), 0, |demo| {
            let (center, rx, ry) = demo.random_ellipse();
            let mask = 1 << quadrant;
            let fill = demo.random_color();
            demo.screen.fill_ellipse(center, rx, ry, fill, mask);
            let color = demo.random_color();
            demo.screen.draw_ellipse(center, rx, ry, color, mask);
            quadrant = (quadrant + 1) & 3;
        })
        .await?;
        self.pause(VARIANT_PAUSE_MS).await
    }

    fn random_ellipse(&mut self) -> (Point, i32, i32) {
        let (center, near) = self.random_center();
        let rx = self.rand(2, near / 4);
        let ry = self.rand(2, near / 4);
        (center, rx, ry)
    }

    /// Concentric arcs of growing span, then filled arcs of shrinking span
    pub(crate) async fn arcs(&mut self) -> PhaseResult {
        self.header("ARC DEMO");
        let center = self.center();
        let outer = center.x.min(center.y) - 4;

        self.run_bounded(self.budget_ms(), 0, |demo| {
            let thickness = 6;
            let (mut r, mut start, mut end, mut n) = (outer, 0.0f32, 20.0f32, 1.0f32);
            while r > 10 {
                let color = demo.random_color();
                demo.screen
                    .draw_arc(center, r, thickness, start, end, color, color);
                r -= thickness + 2;
                n += 1.0;
                start += 30.0;
                end = start + n * 20.0;
            }
        })
        .await?;
        self.next_variant().await?;

        self.run_bounded(self.budget_ms(), 0, |demo| {
            let thickness = 8;
            let (mut r, mut start, mut end, mut n) = (outer, 0.0f32, 350.0f32, 1.0f32);
            while r > 10 {
                let color = demo.random_color();
                let fill = demo.random_color();
                demo.screen
                    .draw_arc(center, r, thickness, start, end, color, fill);
                r -= thickness + 2;
                n += 1.0;
                start += 20.0;
                end -= n * 10.0;
            }
        })
        .await?;
        self.pause(VARIANT_PAUSE_MS).await
    }

    pub(crate) async fn triangles(&mut self) -> PhaseResult {
        self.header("TRIANGLE DEMO");
        for filled in [false, true] {
            self.run_bounded(self.budget_ms(), 0, |demo| {
                let points = [
                    demo.random_point(),
                    demo.random_point(),
                    demo.random_point(),
                ];
                if filled {
                    let fill = demo.random_color();
                    demo.screen.fill_triangle(points, fill);
                }
                let color = demo.random_color();
                demo.screen.draw_triangle(points, color);
            })
            .await?;
            if filled {
                self.pause(VARIANT_PAUSE_MS).await?;
            } else {
                self.next_variant().await?;
            }
        }
        Ok(())
    }

    /// Nested polygons rotating 15 degrees per step, then a filled set
    pub(crate) async fn polygons(&mut self) -> PhaseResult {
        self.header("POLYGON DEMO");
        let center = self.center();
        let outer = center.x.min(center.y) - 4;

        let (mut rotation, mut previous) = (0, 0);
        self.run_bounded(self.budget_ms(), 100, |demo| {
            let mut r = outer;
            for i in (0..POLY_SIDES.len()).rev() {
                let sides = POLY_SIDES[i];
                let black = Color::BLACK;
                demo.screen
                    .draw_polygon(center, sides, r, black, black, previous, 1);
                let color = POLY_COLOR[i];
                demo.screen
                    .draw_polygon(center, sides, r, color, color, rotation, 1);
                r -= 16;
            }
            previous = rotation;
            rotation = (rotation + 15) % 360;
        })
        .await?;
        self.next_variant().await?;

        let mut r = outer;
        for i in (0..POLY_SIDES.len()).rev() {
            self.screen
                .draw_polygon(center, POLY_SIDES[i], r, POLY_COLOR[i], POLY_FILL[i], 0, 2);
            r -= 16;
        }
        self.pause(VARIANT_PAUSE_MS).await
    }

    pub(crate) async fn pixels(&mut self) -> PhaseResult {
        self.header("DRAW PIXEL DEMO");
        self.run_bounded(self.budget_ms(), 0, |demo| {
            let (x2, y2) = demo.extent();
            let at = Point::new(demo.rand(0, x2), demo.rand(0, y2));
            let color = demo.random_color();
            demo.screen.draw_pixel(at, color);
        })
        .await?;
        self.pause(VARIANT_PAUSE_MS).await
    }
}
