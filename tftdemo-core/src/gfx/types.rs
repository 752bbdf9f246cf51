//! Geometry, color and font value types

/// 24-bit RGB color (no alpha)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    /// Red intensity
    pub r: u8,
    /// Green intensity
    pub g: u8,
    /// Blue intensity
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const NAVY: Color = Color::new(0, 0, 128);
    pub const DARKGREEN: Color = Color::new(0, 128, 0);
    pub const DARKCYAN: Color = Color::new(0, 128, 128);
    pub const MAROON: Color = Color::new(128, 0, 0);
    pub const PURPLE: Color = Color::new(128, 0, 128);
    pub const OLIVE: Color = Color::new(128, 128, 0);
    pub const LIGHTGREY: Color = Color::new(192, 192, 192);
    pub const DARKGREY: Color = Color::new(128, 128, 128);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const CYAN: Color = Color::new(0, 255, 255);
    pub const RED: Color = Color::new(252, 0, 0);
    pub const MAGENTA: Color = Color::new(252, 0, 255);
    pub const YELLOW: Color = Color::new(252, 252, 0);
    pub const WHITE: Color = Color::new(252, 252, 252);
    pub const ORANGE: Color = Color::new(252, 164, 0);
    pub const GREENYELLOW: Color = Color::new(172, 252, 44);
    pub const PINK: Color = Color::new(252, 192, 202);

    /// Create a color from channel intensities
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Luma-weighted gray of the same brightness
    ///
    /// Uses the Rec. 601 weights scaled to integers (77/150/29 of 256).
    pub const fn to_grayscale(self) -> Self {
        let y = (self.r as u32 * 77 + self.g as u32 * 150 + self.b as u32 * 29) >> 8;
        let y = y as u8;
        Self::new(y, y, y)
    }

    /// Convert hue/saturation/brightness to RGB
    ///
    /// `hue` is in degrees (any value, wrapped to 0..360), `saturation` and
    /// `brightness` in 0.0..=1.0.
    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        let saturation = saturation.clamp(0.0, 1.0);
        let brightness = brightness.clamp(0.0, 1.0);
        if saturation == 0.0 {
            let v = (brightness * 255.0) as u8;
            return Self::new(v, v, v);
        }

        let mut h = hue % 360.0;
        if h < 0.0 {
            h += 360.0;
        }
        let h = h / 60.0;
        let sector = h as u32; // truncation is floor for non-negative values
        let fraction = h - sector as f32;

        let p = brightness * (1.0 - saturation);
        let q = brightness * (1.0 - saturation * fraction);
        let t = brightness * (1.0 - saturation * (1.0 - fraction));

        let (r, g, b) = match sector {
            0 => (brightness, t, p),
            1 => (q, brightness, p),
            2 => (p, brightness, t),
            3 => (p, q, brightness),
            4 => (t, p, brightness),
            _ => (brightness, p, q),
        };

        Self::new((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
    }
}

/// A point in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Display dimensions in pixels (for the current rotation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Rectangle given by its top-left corner and extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Active drawable region, inclusive bounds in screen coordinates
///
/// Drawing coordinates are relative to `(left, top)` and output is clipped
/// to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClipWindow {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ClipWindow {
    /// Create a window from inclusive bounds
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Window covering the whole display
    pub const fn full(size: Size) -> Self {
        Self::new(0, 0, size.width - 1, size.height - 1)
    }

    /// Window width in pixels
    pub const fn width(&self) -> i32 {
        self.right - self.left + 1
    }

    /// Window height in pixels
    pub const fn height(&self) -> i32 {
        self.bottom - self.top + 1
    }

    /// Check if a screen-space point lies inside the window
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Convert a screen-space point to window-relative coordinates
    pub const fn to_local(&self, x: i32, y: i32) -> Point {
        Point::new(x - self.left, y - self.top)
    }
}

/// Fonts loadable from the filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UserFont {
    DotMatrixM,
    SmallFont,
    Ubuntu,
    Grotesk24x48,
}

impl UserFont {
    /// Font file path on the demo filesystem
    pub const fn path(&self) -> &'static str {
        match self {
            UserFont::DotMatrixM => "/spiffs/fonts/DotMatrix_M.fon",
            UserFont::SmallFont => "/spiffs/fonts/SmallFont.fon",
            UserFont::Ubuntu => "/spiffs/fonts/Ubuntu.fon",
            UserFont::Grotesk24x48 => "/spiffs/fonts/Grotesk24x48.fon",
        }
    }
}

/// Font selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontId {
    #[default]
    Default,
    DejaVu18,
    DejaVu24,
    Ubuntu16,
    Comic24,
    Minya24,
    Tooney32,
    Small,
    SevenSeg,
    User(UserFont),
}

impl FontId {
    /// Built-in proportional/fixed fonts, in demo order (seven-segment excluded)
    pub const BUILTIN: [FontId; 8] = [
        FontId::Default,
        FontId::DejaVu18,
        FontId::DejaVu24,
        FontId::Ubuntu16,
        FontId::Comic24,
        FontId::Minya24,
        FontId::Tooney32,
        FontId::Small,
    ];
}

/// Seven-segment font rendering attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SevenSegStyle {
    /// Segment length in pixels
    pub length: u8,
    /// Segment width in pixels
    pub width: u8,
    /// Draw segment outlines
    pub outline: bool,
    /// Outline color
    pub outline_color: Color,
}

impl Default for SevenSegStyle {
    fn default() -> Self {
        Self {
            length: 12,
            width: 2,
            outline: false,
            outline_color: Color::DARKGREY,
        }
    }
}

/// Text rendering attributes carried with the drawing context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextAttrs {
    /// Rotation angle in degrees (0-359)
    pub rotation: u16,
    /// Wrap long lines at the clip window edge
    pub wrap: bool,
    /// Do not paint the background behind glyphs
    pub transparent: bool,
    /// Seven-segment font attributes
    pub seven_seg: SevenSegStyle,
}

/// Everything a drawing call needs besides its own arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrawContext {
    /// Active drawable region
    pub clip: ClipWindow,
    /// Selected font
    pub font: FontId,
    /// Foreground (text/outline) color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Text attributes
    pub text: TextAttrs,
}

impl DrawContext {
    /// Default context covering the given display
    pub fn for_display(size: Size) -> Self {
        Self {
            clip: ClipWindow::full(size),
            font: FontId::Default,
            fg: Color::WHITE,
            bg: Color::BLACK,
            text: TextAttrs::default(),
        }
    }
}
