//! Touch input sampling
//!
//! Wraps a [`TouchSource`] with drain-to-release so one physical press is
//! observed as a single event, and classifies positions against the active
//! clip window.

use embedded_hal_async::delay::DelayNs;
use tftdemo_hal::{TouchPoint, TouchSource};

use crate::gfx::{ClipWindow, Point};

/// Default poll interval while waiting for release
pub const DRAIN_INTERVAL_MS: u32 = 20;

/// One touch sample classified against a clip window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchSample {
    /// Panel not touched
    Released,
    /// Touched inside the window; position is window-relative
    InRegion(Point),
    /// Touched outside the window; position is in screen coordinates
    OutOfRegion(TouchPoint),
}

impl TouchSample {
    /// Classify a raw reading against `clip`
    pub fn classify(reading: Option<TouchPoint>, clip: &ClipWindow) -> Self {
        match reading {
            None => TouchSample::Released,
            Some(p) if clip.contains(p.x, p.y) => TouchSample::InRegion(clip.to_local(p.x, p.y)),
            Some(p) => TouchSample::OutOfRegion(p),
        }
    }

    /// Check if the panel was touched at all
    pub fn is_touched(&self) -> bool {
        !matches!(self, TouchSample::Released)
    }
}

/// Touch sampler with drain-to-release
pub struct InputSampler<T> {
    source: T,
    drain_interval_ms: u32,
}

impl<T: TouchSource> InputSampler<T> {
    pub fn new(source: T) -> Self {
        Self::with_drain_interval(source, DRAIN_INTERVAL_MS)
    }

    pub fn with_drain_interval(source: T, drain_interval_ms: u32) -> Self {
        Self {
            source,
            drain_interval_ms: drain_interval_ms.max(1),
        }
    }

    /// Underlying touch source
    pub fn source(&self) -> &T {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut T {
        &mut self.source
    }

    /// Poll interval used by [`drain`](Self::drain)
    pub fn drain_interval_ms(&self) -> u32 {
        self.drain_interval_ms
    }

    /// One instantaneous read
    pub fn poll(&mut self) -> Option<TouchPoint> {
        self.source.read_touch()
    }

    /// One read classified against `clip`
    pub fn sample(&mut self, clip: &ClipWindow) -> TouchSample {
        TouchSample::classify(self.poll(), clip)
    }

    /// Poll every drain interval until the panel reports released
    ///
    /// Returns the number of sleeps taken. There is no upper bound: a panel
    /// held down keeps the caller here until it is let go.
    pub async fn drain<D: DelayNs>(&mut self, delay: &mut D) -> u32 {
        let mut sleeps = 0u32;
        while self.source.read_touch().is_some() {
            delay.delay_ms(self.drain_interval_ms).await;
            sleeps = sleeps.wrapping_add(1);
        }
        sleeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeTime, ScriptedTouch};
    use embassy_futures::block_on;
    use tftdemo_hal::NoTouch;

    const CLIP: ClipWindow = ClipWindow::new(0, 22, 239, 297);

    #[test]
    fn test_classify() {
        assert_eq!(TouchSample::classify(None, &CLIP), TouchSample::Released);
        assert_eq!(
            TouchSample::classify(Some(TouchPoint::new(10, 32)), &CLIP),
            TouchSample::InRegion(Point::new(10, 10))
        );
        assert_eq!(
            TouchSample::classify(Some(TouchPoint::new(10, 5)), &CLIP),
            TouchSample::OutOfRegion(TouchPoint::new(10, 5))
        );
        assert_eq!(
            TouchSample::classify(Some(TouchPoint::new(120, 310)), &CLIP),
            TouchSample::OutOfRegion(TouchPoint::new(120, 310))
        );
    }

    #[test]
    fn test_no_touch_never_touched() {
        let mut input = InputSampler::new(NoTouch);
        assert_eq!(input.sample(&CLIP), TouchSample::Released);
        assert!(!input.sample(&CLIP).is_touched());
    }

    #[test]
    fn test_drain_waits_for_release() {
        let time = FakeTime::new();
        let touch = ScriptedTouch::new(&time).press(0, 95, 50, 50);
        let mut input = InputSampler::new(touch);
        let mut delay = time.delay();

        assert!(input.poll().is_some());
        let sleeps = block_on(input.drain(&mut delay));

        // pressed at 0, 20, 40, 60, 80; released at 100
        assert_eq!(sleeps, 5);
        assert_eq!(time.sleeps(), std::vec![20; 5]);
        assert!(input.poll().is_none());
    }

    #[test]
    fn test_drain_released_is_immediate() {
        let time = FakeTime::new();
        let mut input = InputSampler::new(ScriptedTouch::new(&time));
        let mut delay = time.delay();

        assert_eq!(block_on(input.drain(&mut delay)), 0);
        assert!(time.sleeps().is_empty());
    }

    #[test]
    fn test_custom_drain_interval() {
        let time = FakeTime::new();
        let touch = ScriptedTouch::new(&time).press(0, 30, 1, 1);
        let mut input = InputSampler::with_drain_interval(touch, 10);
        let mut delay = time.delay();

        assert_eq!(block_on(input.drain(&mut delay)), 3);
        assert_eq!(input.source().reads, 4);
    }
}
