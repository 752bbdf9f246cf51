//! Phase sequencing
//!
//! The scheduler owns the pass counter and the one-shot diagnostics latch.
//! Rendering is behind [`PhaseRunner`] so the sequencing and configuration
//! policy can be exercised with phases that draw nothing.

use super::policy::{settings_for_pass, BaseSettings, PassSettings};

/// Demo phases, in the order they run within a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhaseKind {
    Fonts,
    Lines,
    AngledLines,
    Rectangles,
    Circles,
    Ellipses,
    Arcs,
    Triangles,
    Polygons,
    Pixels,
    Images,
    Touch,
}

/// Fixed phase order of a pass
pub const PHASE_ORDER: [PhaseKind; 12] = [
    PhaseKind::Fonts,
    PhaseKind::Lines,
    PhaseKind::AngledLines,
    PhaseKind::Rectangles,
    PhaseKind::Circles,
    PhaseKind::Ellipses,
    PhaseKind::Arcs,
    PhaseKind::Triangles,
    PhaseKind::Polygons,
    PhaseKind::Pixels,
    PhaseKind::Images,
    PhaseKind::Touch,
];

impl PhaseKind {
    /// Display name
    pub const fn name(&self) -> &'static str {
        match self {
            PhaseKind::Fonts => "FONTS",
            PhaseKind::Lines => "LINES",
            PhaseKind::AngledLines => "ANGLED LINES",
            PhaseKind::Rectangles => "RECTANGLES",
            PhaseKind::Circles => "CIRCLES",
            PhaseKind::Ellipses => "ELLIPSES",
            PhaseKind::Arcs => "ARCS",
            PhaseKind::Triangles => "TRIANGLES",
            PhaseKind::Polygons => "POLYGONS",
            PhaseKind::Pixels => "PIXELS",
            PhaseKind::Images => "IMAGES",
            PhaseKind::Touch => "TOUCH",
        }
    }
}

/// How a phase ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhaseExit {
    /// Ran until its deadline
    Completed,
    /// Cut short by a touch
    Interrupted,
    /// Not run (resource unavailable or feature disabled)
    Skipped,
}

impl From<crate::wait::WaitOutcome> for PhaseExit {
    fn from(outcome: crate::wait::WaitOutcome) -> Self {
        match outcome {
            crate::wait::WaitOutcome::TimedOut => PhaseExit::Completed,
            crate::wait::WaitOutcome::Interrupted => PhaseExit::Interrupted,
        }
    }
}

/// Absolute end time on the monotonic clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadline {
    at_ms: u64,
}

impl Deadline {
    /// Deadline `budget_ms` after `now_ms`
    pub const fn after(now_ms: u64, budget_ms: u32) -> Self {
        Self {
            at_ms: now_ms.saturating_add(budget_ms as u64),
        }
    }

    pub const fn at_ms(&self) -> u64 {
        self.at_ms
    }

    /// Check if `now_ms` has reached the deadline
    pub const fn expired(&self, now_ms: u64) -> bool {
        now_ms >= self.at_ms
    }

    /// Milliseconds left, zero once expired
    pub const fn remaining(&self, now_ms: u64) -> u64 {
        self.at_ms.saturating_sub(now_ms)
    }
}

/// Renders passes and phases for the scheduler
#[allow(async_fn_in_trait)]
pub trait PhaseRunner {
    /// Apply the pass configuration and draw the pass header
    async fn begin_pass(&mut self, settings: &PassSettings);

    /// Run one phase until its deadline or an interrupting touch
    async fn run_phase(&mut self, phase: PhaseKind) -> PhaseExit;
}

/// Outcome of one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PassReport {
    pub settings: PassSettings,
    pub completed: u8,
    pub interrupted: u8,
    pub skipped: u8,
}

/// Infinite pass loop over [`PHASE_ORDER`]
pub struct DemoScheduler {
    pass: u32,
    base: BaseSettings,
    quiet: bool,
}

impl DemoScheduler {
    pub const fn new(base: BaseSettings) -> Self {
        Self {
            pass: 0,
            base,
            quiet: false,
        }
    }

    /// Passes started so far
    pub fn pass(&self) -> u32 {
        self.pass
    }

    /// Diagnostics still on (the latch never turns back on)
    pub fn diagnostics_enabled(&self) -> bool {
        self.base.diagnostics && !self.quiet
    }

    /// Settings the next pass will run with
    pub fn next_settings(&self) -> PassSettings {
        let mut settings = settings_for_pass(self.pass, &self.base);
        settings.diagnostics &= !self.quiet;
        settings
    }

    /// Run every phase once, in order
    ///
    /// An interrupted phase only ends that phase; the pass continues with
    /// the next one.
    pub async fn run_pass<R: PhaseRunner>(&mut self, runner: &mut R) -> PassReport {
        let settings = self.next_settings();
        if !settings.diagnostics {
            self.quiet = true;
        }

        runner.begin_pass(&settings).await;

        let mut report = PassReport {
            settings,
            completed: 0,
            interrupted: 0,
            skipped: 0,
        };
        for phase in PHASE_ORDER {
            match runner.run_phase(phase).await {
                PhaseExit::Completed => report.completed += 1,
                PhaseExit::Interrupted => {
                    report.interrupted += 1;
                    #[cfg(feature = "defmt")]
                    {
                        if settings.diagnostics {
                            defmt::info!("{} interrupted by touch", phase.name());
                        }
                    }
                }
                PhaseExit::Skipped => report.skipped += 1,
            }
        }

        self.pass = self.pass.wrapping_add(1);
        report
    }

    /// Run passes forever
    pub async fn run<R: PhaseRunner>(&mut self, runner: &mut R) -> ! {
        loop {
            self.run_pass(runner).await;
        }
    }
}
