//! Clock overlay
//!
//! Draws the time of day into the status band at the bottom of the screen,
//! on top of whatever a demo phase is rendering. Redraws are debounced to
//! one per wall-clock second.

use core::fmt::Write;

use heapless::String;
use tftdemo_hal::{WallClock, WallTime};

use crate::gfx::{Color, FontId, Rect, Screen, TextAttrs};
use crate::traits::{Canvas, Pos};

/// Overlay text color
pub const OVERLAY_FG: Color = Color::YELLOW;
/// Status band background
pub const BAND_GREY: Color = Color::new(64, 64, 64);
/// Overlay font
pub const OVERLAY_FONT: FontId = FontId::Default;

/// "HH:MM:SS"
pub type TimeText = String<8>;

/// Format a time of day as `HH:MM:SS`
pub fn format_hms(time: WallTime) -> TimeText {
    let mut text = TimeText::new();
    // 8 characters always fit
    let _ = write!(
        text,
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    );
    text
}

/// Live clock in the bottom status band
pub struct ClockOverlay<W> {
    clock: W,
    /// Seconds value of the last successful draw
    last_drawn: Option<u64>,
    redraws: u32,
}

impl<W: WallClock> ClockOverlay<W> {
    pub const fn new(clock: W) -> Self {
        Self {
            clock,
            last_drawn: None,
            redraws: 0,
        }
    }

    /// Wall clock the overlay reads
    pub fn clock(&self) -> &W {
        &self.clock
    }

    /// Number of band redraws done by [`tick`](Self::tick)
    pub fn redraws(&self) -> u32 {
        self.redraws
    }

    /// Redraw the band if the seconds value changed since the last draw
    ///
    /// The caller's drawing context is saved for the duration of the draw
    /// and restored afterwards. If a save is already pending the redraw is
    /// skipped and retried on the next tick. Returns true if the band was
    /// drawn.
    pub fn tick<C: Canvas>(&mut self, screen: &mut Screen<C>) -> bool {
        let now = self.clock.now();
        if self.last_drawn == Some(now.as_secs()) {
            return false;
        }

        let text = format_hms(now);
        let drawn = screen.with_saved(|canvas, ctx| {
            ctx.font = OVERLAY_FONT;
            ctx.fg = OVERLAY_FG;
            ctx.bg = BAND_GREY;
            ctx.text = TextAttrs::default();

            let size = canvas.size();
            let fh = canvas.line_height(OVERLAY_FONT);
            let band = Rect::new(1, size.height - fh - 8, size.width - 3, fh + 6);
            canvas.fill_rect(ctx, band, BAND_GREY);
            canvas.print(ctx, &text, Pos::Center, Pos::At(size.height - fh - 5));
        });

        match drawn {
            Ok(()) => {
                self.last_drawn = Some(now.as_secs());
                self.redraws = self.redraws.wrapping_add(1);
                true
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Clock redraw skipped: {}", _e);
                false
            }
        }
    }

    /// Print the time into an already prepared band and set the baseline
    ///
    /// Used by full-screen headers: draws with the caller's current context
    /// (no save/restore) so the first following tick does not redraw within
    /// the same second.
    pub fn stamp<C: Canvas>(&mut self, screen: &mut Screen<C>) {
        let now = self.clock.now();
        let text = format_hms(now);
        let height = screen.size().height;
        let fh = screen.line_height();
        screen.print(&text, Pos::Center, Pos::At(height - fh - 5));
        self.last_drawn = Some(now.as_secs());
    }
}
