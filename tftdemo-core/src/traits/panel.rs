//! Panel configuration shared by drivers and the drawing surface

/// Display orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    #[default]
    Portrait,
    Landscape,
    PortraitFlip,
    LandscapeFlip,
}

impl Rotation {
    /// Rotation for an index, wrapping modulo 4
    pub const fn from_index(index: u8) -> Self {
        match index & 3 {
            0 => Rotation::Portrait,
            1 => Rotation::Landscape,
            2 => Rotation::PortraitFlip,
            _ => Rotation::LandscapeFlip,
        }
    }

    /// Index in 0..4
    pub const fn index(&self) -> u8 {
        match self {
            Rotation::Portrait => 0,
            Rotation::Landscape => 1,
            Rotation::PortraitFlip => 2,
            Rotation::LandscapeFlip => 3,
        }
    }

    /// Next rotation, wrapping after `LandscapeFlip`
    pub const fn next(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Check if width and height are swapped relative to portrait
    pub const fn is_landscape(&self) -> bool {
        matches!(self, Rotation::Landscape | Rotation::LandscapeFlip)
    }

    /// Human readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Rotation::Portrait => "PORTRAIT",
            Rotation::Landscape => "LANDSCAPE",
            Rotation::PortraitFlip => "PORTRAIT FLIP",
            Rotation::LandscapeFlip => "LANDSCAPE FLIP",
        }
    }
}

/// Pixel color depth on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorDepth {
    Bits16,
    #[default]
    Bits24,
}

impl ColorDepth {
    /// Depth for a bit count (anything but 16 is 24-bit)
    pub const fn from_bits(bits: u8) -> Self {
        if bits == 16 {
            ColorDepth::Bits16
        } else {
            ColorDepth::Bits24
        }
    }

    /// Bits per pixel
    pub const fn bits(&self) -> u8 {
        match self {
            ColorDepth::Bits16 => 16,
            ColorDepth::Bits24 => 24,
        }
    }

    /// The other depth
    pub const fn toggled(&self) -> Self {
        match self {
            ColorDepth::Bits16 => ColorDepth::Bits24,
            ColorDepth::Bits24 => ColorDepth::Bits16,
        }
    }
}

/// Panel-level configuration
///
/// Implemented by panel drivers; the drawing surface forwards to it.
pub trait PanelControl {
    /// Change orientation; subsequent dimensions reflect the new rotation
    fn set_rotation(&mut self, rotation: Rotation);

    /// Change the pixel format used on the wire
    fn set_color_depth(&mut self, depth: ColorDepth);
}
