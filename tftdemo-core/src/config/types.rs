//! Configuration types

use tftdemo_hal::WallTime;

use crate::scheduler::{BaseSettings, QUIET_AFTER_PASS};
use crate::traits::{ColorDepth, Rotation};

/// Phase budget when a touch panel is fitted
pub const PHASE_MS_TOUCH: u32 = 10_000;
/// Phase budget without a touch panel
pub const PHASE_MS_NO_TOUCH: u32 = 4_000;

/// Complete demo configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DemoConfig {
    pub timing: TimingConfig,
    pub display: DisplayConfig,
    pub clock: ClockConfig,
    pub random: RandomConfig,
    pub diagnostics: DiagnosticsConfig,
}

impl DemoConfig {
    /// Time each phase runs before moving on
    ///
    /// An explicit `phase_ms` wins; otherwise phases run longer when there
    /// is a touch panel to play with.
    pub fn phase_budget_ms(&self) -> u32 {
        match self.timing.phase_ms {
            Some(ms) => ms,
            None if self.display.touch => PHASE_MS_TOUCH,
            None => PHASE_MS_NO_TOUCH,
        }
    }

    /// Starting configuration for the pass policy
    pub fn base_settings(&self) -> BaseSettings {
        BaseSettings {
            color_depth: self.display.color_depth,
            rotation: self.display.rotation,
            diagnostics: self.diagnostics.enabled,
            quiet_after_pass: self.diagnostics.quiet_after_pass,
        }
    }
}

/// `[timing]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Per-phase budget; `None` picks from the touch setting
    pub phase_ms: Option<u32>,
    /// Wait granularity
    pub quantum_ms: u32,
    /// Poll interval while waiting for a touch release
    pub drain_interval_ms: u32,
    /// Intro screen duration
    pub intro_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            phase_ms: None,
            quantum_ms: 50,
            drain_interval_ms: 20,
            intro_ms: 4000,
        }
    }
}

/// `[display]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Panel width in portrait orientation
    pub width: u16,
    /// Panel height in portrait orientation
    pub height: u16,
    /// Rotation used for the first pass
    pub rotation: Rotation,
    /// Color depth used for the first pass
    pub color_depth: ColorDepth,
    /// Touch panel fitted
    pub touch: bool,
    /// SPI read clock, shown on the intro screen
    pub read_clock_hz: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 240,
            height: 320,
            rotation: Rotation::Portrait,
            color_depth: ColorDepth::Bits24,
            touch: true,
            read_clock_hz: 16_000_000,
        }
    }
}

/// `[clock]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// Time of day at boot
    pub start: WallTime,
}

/// `[random]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RandomConfig {
    pub seed: u64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            seed: 0x7f4a_7c15_9e37_79b9,
        }
    }
}

/// `[diagnostics]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DiagnosticsConfig {
    pub enabled: bool,
    /// First pass without diagnostic output
    pub quiet_after_pass: u32,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            quiet_after_pass: QUIET_AFTER_PASS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_budget_follows_touch() {
        let mut config = DemoConfig::default();
        assert_eq!(config.phase_budget_ms(), 10_000);

        config.display.touch = false;
        assert_eq!(config.phase_budget_ms(), 4_000);

        config.timing.phase_ms = Some(1500);
        assert_eq!(config.phase_budget_ms(), 1500);
    }

    #[test]
    fn test_base_settings() {
        let mut config = DemoConfig::default();
        config.display.rotation = Rotation::Landscape;
        config.diagnostics.quiet_after_pass = 3;

        let base = config.base_settings();
        assert_eq!(base.rotation, Rotation::Landscape);
        assert_eq!(base.color_depth, ColorDepth::Bits24);
        assert_eq!(base.quiet_after_pass, 3);
    }
}
