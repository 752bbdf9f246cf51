//! Cooperative wait
//!
//! [`CooperativeWaiter::wait`] is the only place the demo yields. A wait is
//! split into fixed quanta; after each quantum sleep the clock overlay gets
//! a tick and the touch panel is polled once. A touch ends the wait early
//! (after the finger is lifted), which phases take as a request to stop.

use embedded_hal_async::delay::DelayNs;
use tftdemo_hal::{TouchSource, WallClock, WallTime};

use crate::gfx::Screen;
use crate::input::InputSampler;
use crate::overlay::ClockOverlay;
use crate::traits::Canvas;

/// Default wait granularity
pub const QUANTUM_MS: u32 = 50;

/// How a wait ended
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitOutcome {
    /// The whole budget elapsed without a touch
    TimedOut,
    /// A touch was seen (and released) before the budget ran out
    Interrupted,
}

impl WaitOutcome {
    pub fn is_interrupted(&self) -> bool {
        matches!(self, WaitOutcome::Interrupted)
    }
}

/// Quantized wait multiplexing delay, overlay refresh and touch polling
pub struct CooperativeWaiter<T, W, D> {
    overlay: ClockOverlay<W>,
    input: InputSampler<T>,
    delay: D,
    quantum_ms: u32,
    quanta: u32,
}

impl<T, W, D> CooperativeWaiter<T, W, D>
where
    T: TouchSource,
    W: WallClock,
    D: DelayNs,
{
    pub fn new(overlay: ClockOverlay<W>, input: InputSampler<T>, delay: D) -> Self {
        Self::with_quantum(overlay, input, delay, QUANTUM_MS)
    }

    pub fn with_quantum(
        overlay: ClockOverlay<W>,
        input: InputSampler<T>,
        delay: D,
        quantum_ms: u32,
    ) -> Self {
        Self {
            overlay,
            input,
            delay,
            quantum_ms: quantum_ms.max(1),
            quanta: 0,
        }
    }

    pub fn quantum_ms(&self) -> u32 {
        self.quantum_ms
    }

    /// Quantum sleeps taken so far
    pub fn quanta(&self) -> u32 {
        self.quanta
    }

    pub fn overlay(&self) -> &ClockOverlay<W> {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut ClockOverlay<W> {
        &mut self.overlay
    }

    pub fn input(&self) -> &InputSampler<T> {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputSampler<T> {
        &mut self.input
    }

    /// Current wall-clock time
    pub fn wall_time(&self) -> WallTime {
        self.overlay.clock().now()
    }

    /// Wait up to `budget_ms`, ticking the overlay and polling touch
    ///
    /// A budget shorter than one quantum does a single tick and poll
    /// without sleeping. Otherwise quanta are slept until the budget is
    /// used up, checking after each one. On a touch the panel is drained
    /// and [`WaitOutcome::Interrupted`] returned at once.
    pub async fn wait<C: Canvas>(
        &mut self,
        screen: &mut Screen<C>,
        budget_ms: u32,
    ) -> WaitOutcome {
        if budget_ms < self.quantum_ms {
            return self.check(screen).await;
        }

        let mut elapsed = 0u32;
        while elapsed < budget_ms {
            if self.advance(screen).await.is_interrupted() {
                return WaitOutcome::Interrupted;
            }
            elapsed = elapsed.saturating_add(self.quantum_ms);
        }
        WaitOutcome::TimedOut
    }

    /// Sleep one quantum, then tick the overlay and poll touch
    pub async fn advance<C: Canvas>(&mut self, screen: &mut Screen<C>) -> WaitOutcome {
        self.delay.delay_ms(self.quantum_ms).await;
        self.quanta = self.quanta.wrapping_add(1);
        self.check(screen).await
    }

    /// Plain sleep: no overlay tick, no touch poll
    pub async fn sleep_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms).await;
    }

    /// Refresh the clock band if the second changed
    pub fn tick_overlay<C: Canvas>(&mut self, screen: &mut Screen<C>) -> bool {
        self.overlay.tick(screen)
    }

    /// Stamp the time into a freshly drawn header band
    pub fn stamp_overlay<C: Canvas>(&mut self, screen: &mut Screen<C>) {
        self.overlay.stamp(screen);
    }

    /// Wait for the panel to be released
    pub async fn drain_touch(&mut self) -> u32 {
        self.input.drain(&mut self.delay).await
    }

    // Overlay first: its save/restore completes before any touch handling
    async fn check<C: Canvas>(&mut self, screen: &mut Screen<C>) -> WaitOutcome {
        self.overlay.tick(screen);
        if self.input.poll().is_some() {
            self.input.drain(&mut self.delay).await;
            return WaitOutcome::Interrupted;
        }
        WaitOutcome::TimedOut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDelay, FakeTime, RecordingCanvas, ScriptedTouch};
    use embassy_futures::block_on;
    use tftdemo_hal::Monotonic;

    type TestWaiter<'a> = CooperativeWaiter<ScriptedTouch<'a>, &'a FakeTime, FakeDelay<'a>>;

    fn waiter<'a>(time: &'a FakeTime, touch: ScriptedTouch<'a>) -> TestWaiter<'a> {
        CooperativeWaiter::new(
            ClockOverlay::new(time),
            InputSampler::new(touch),
            time.delay(),
        )
    }

    fn screen() -> Screen<RecordingCanvas> {
        let mut screen = Screen::new(RecordingCanvas::new());
        screen.set_clip(0, 22, 239, 297);
        screen
    }

    #[test]
    fn test_short_wait_does_not_sleep() {
        let time = FakeTime::new();
        let mut w = waiter(&time, ScriptedTouch::new(&time));
        let mut screen = screen();

        assert_eq!(block_on(w.wait(&mut screen, 10)), WaitOutcome::TimedOut);
        assert_eq!(time.now_ms(), 0);
        assert!(time.sleeps().is_empty());
        assert_eq!(w.quanta(), 0);
        // Still one tick and one poll
        assert_eq!(w.overlay().redraws(), 1);
        assert_eq!(w.input_mut().source().reads, 1);
    }

    #[test]
    fn test_zero_wait_with_touch_drains() {
        let time = FakeTime::new();
        let touch = ScriptedTouch::new(&time).press(0, 50, 5, 5);
        let mut w = waiter(&time, touch);
        let mut screen = screen();

        assert_eq!(block_on(w.wait(&mut screen, 0)), WaitOutcome::Interrupted);
        // only drain sleeps
        assert_eq!(time.sleeps(), std::vec![20, 20, 20]);
        assert_eq!(w.quanta(), 0);
    }

    #[test]
    fn test_full_budget_times_out() {
        let time = FakeTime::new();
        let mut w = waiter(&time, ScriptedTouch::new(&time));
        let mut screen = screen();

        assert_eq!(block_on(w.wait(&mut screen, 200)), WaitOutcome::TimedOut);
        assert_eq!(w.quanta(), 4);
        assert_eq!(time.now_ms(), 200);
    }

    #[test]
    fn test_elapsed_within_one_quantum_of_budget() {
        for budget in [50u32, 60, 99, 100, 120, 149, 1000] {
            let time = FakeTime::new();
            let mut w = waiter(&time, ScriptedTouch::new(&time));
            let mut screen = screen();

            assert_eq!(block_on(w.wait(&mut screen, budget)), WaitOutcome::TimedOut);
            let elapsed = time.now_ms();
            assert!(elapsed >= budget as u64, "budget {} elapsed {}", budget, elapsed);
            assert!(elapsed < budget as u64 + QUANTUM_MS as u64);
        }
    }

    #[test]
    fn test_touch_at_second_quantum_interrupts() {
        let time = FakeTime::new();
        // pressed between the first and second check
        let touch = ScriptedTouch::new(&time).press(60, 120, 100, 100);
        let mut w = waiter(&time, touch);
        let mut screen = screen();

        assert_eq!(block_on(w.wait(&mut screen, 200)), WaitOutcome::Interrupted);
        assert_eq!(w.quanta(), 2);
        assert_eq!(time.sleeps(), std::vec![50, 50, 20]);
        assert!(time.now_ms() < 200);
    }

    #[test]
    fn test_overlay_ticks_during_wait() {
        let time = FakeTime::new();
        let mut w = waiter(&time, ScriptedTouch::new(&time));
        let mut screen = screen();
        let before = *screen.ctx();

        assert_eq!(block_on(w.wait(&mut screen, 3000)), WaitOutcome::TimedOut);
        // seconds 0, 1, 2 and 3
        assert_eq!(w.overlay().redraws(), 4);
        assert_eq!(*screen.ctx(), before);
    }

    #[test]
    fn test_sleep_skips_checks() {
        let time = FakeTime::new();
        let touch = ScriptedTouch::new(&time).press(0, 10_000, 1, 1);
        let mut w = waiter(&time, touch);

        block_on(w.sleep_ms(4000));
        assert_eq!(time.now_ms(), 4000);
        assert_eq!(w.overlay().redraws(), 0);
        assert_eq!(w.input_mut().source().reads, 0);
    }

    #[test]
    fn test_custom_quantum() {
        let time = FakeTime::new();
        let mut w = CooperativeWaiter::with_quantum(
            ClockOverlay::new(&time),
            InputSampler::new(ScriptedTouch::new(&time)),
            time.delay(),
            25,
        );
        let mut screen = screen();

        assert_eq!(block_on(w.wait(&mut screen, 100)), WaitOutcome::TimedOut);
        assert_eq!(w.quanta(), 4);
        assert_eq!(time.sleeps(), std::vec![25; 4]);
    }
}
