//! Pass configuration policy
//!
//! Every pass runs with a panel configuration that is a pure function of
//! the pass counter:
//!
//! - color depth flips on every pass with bit 1 set (2, 3, 6, 7, ...)
//! - grayscale is on for odd passes
//! - rotation advances by one on every multiple of four, starting from the
//!   configured rotation at pass 0
//! - diagnostics stop for good at the quiet pass

use crate::traits::{ColorDepth, Rotation};

/// First pass that runs without diagnostic output
pub const QUIET_AFTER_PASS: u32 = 17;

/// Configuration in effect before the first pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaseSettings {
    pub color_depth: ColorDepth,
    pub rotation: Rotation,
    /// Diagnostic output enabled at all
    pub diagnostics: bool,
    pub quiet_after_pass: u32,
}

impl Default for BaseSettings {
    fn default() -> Self {
        Self {
            color_depth: ColorDepth::Bits24,
            rotation: Rotation::Portrait,
            diagnostics: true,
            quiet_after_pass: QUIET_AFTER_PASS,
        }
    }
}

/// Configuration for one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PassSettings {
    pub pass: u32,
    pub color_depth: ColorDepth,
    /// Depth was flipped at the start of this pass
    pub depth_toggled: bool,
    pub grayscale: bool,
    pub rotation: Rotation,
    /// Rotation is (re)applied at the start of this pass
    pub rotate_now: bool,
    pub diagnostics: bool,
}

/// Settings for `pass` given the starting configuration
pub fn settings_for_pass(pass: u32, base: &BaseSettings) -> PassSettings {
    // Passes 0..=pass with bit 1 set: two per full group of four, plus
    // one or two from the partial group
    let rem = pass % 4;
    let toggles = (pass / 4) * 2 + if rem >= 2 { rem - 1 } else { 0 };
    let color_depth = if toggles % 2 == 1 {
        base.color_depth.toggled()
    } else {
        base.color_depth
    };

    let steps = ((pass / 4) % 4) as u8;
    let rotation = Rotation::from_index(base.rotation.index() + steps);

    PassSettings {
        pass,
        color_depth,
        depth_toggled: pass & 2 != 0,
        grayscale: pass & 1 != 0,
        rotation,
        rotate_now: pass % 4 == 0,
        diagnostics: base.diagnostics && pass < base.quiet_after_pass,
    }
}
