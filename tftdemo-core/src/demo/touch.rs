//! Touch phase: draw dots where the panel is touched

use embedded_hal_async::delay::DelayNs;
use rand_core::RngCore;
use tftdemo_hal::{Monotonic, TouchSource, WallClock};

use super::{Demo, PhaseResult};
use crate::gfx::{Color, FontId};
use crate::input::TouchSample;
use crate::scheduler::Deadline;
use crate::traits::{Canvas, Pos};

/// Out-of-window touches tolerated before the phase is abandoned
const MAX_STRAY_TOUCHES: u32 = 3;
const STRAY_PAUSE_MS: u32 = 500;
const DOT_RADIUS: i32 = 4;

impl<C, T, W, M, D, R> Demo<C, T, W, M, D, R>
where
    C: Canvas,
    T: TouchSource,
    W: WallClock,
    M: Monotonic,
    D: DelayNs,
    R: RngCore,
{
    /// Touches inside the window draw a dot and push the deadline out.
    /// More than three touches in a row outside the window end the phase
    /// early; that is reported as an interruption.
    pub(crate) async fn touch(&mut self) -> PhaseResult {
        self.header("TOUCH DEMO");
        self.screen.set_font(FontId::Default);
        self.screen.set_fg(Color::YELLOW);
        self.screen.print("Touch to draw", Pos::Center, Pos::Center);

        let budget = self.budget_ms();
        let poll_ms = self.waiter.input_mut().drain_interval_ms();
        let mut deadline = Deadline::after(self.now_ms(), budget);
        let mut strays = 0;

        while !deadline.expired(self.now_ms()) {
            let clip = self.screen.clip();
            match self.waiter.input_mut().sample(&clip) {
                TouchSample::InRegion(at) => {
                    let color = self.random_color();
                    self.screen.fill_circle(at, DOT_RADIUS, color);
                    strays = 0;
                    deadline = Deadline::after(self.now_ms(), budget);
                }
                TouchSample::OutOfRegion(_) => {
                    strays += 1;
                    if strays > MAX_STRAY_TOUCHES {
                        return Err(super::Interrupted);
                    }
                    self.waiter.sleep_ms(STRAY_PAUSE_MS).await;
                }
                TouchSample::Released => {}
            }
            self.waiter.tick_overlay(&mut self.screen);
            self.waiter.sleep_ms(poll_ms).await;
        }
        Ok(())
    }
}
