//! Font id to mono font mapping
//!
//! Fonts are named after the bitmap fonts panel libraries usually ship;
//! each maps to the embedded-graphics ASCII font closest in size and
//! weight.

use embedded_graphics::mono_font::ascii::{
    FONT_10X20, FONT_5X8, FONT_6X13, FONT_7X13, FONT_8X13, FONT_9X15, FONT_9X15_BOLD,
    FONT_9X18_BOLD,
};
use embedded_graphics::mono_font::MonoFont;
use tftdemo_core::gfx::{FontId, SevenSegStyle};

use crate::seven_seg;

/// Bitmap font used to render a font id
///
/// File fonts and the seven-segment font have no bitmap; they map to a
/// plain fallback so text stays readable.
pub fn mono_font(font: FontId) -> &'static MonoFont<'static> {
    match font {
        FontId::Default => &FONT_8X13,
        FontId::DejaVu18 => &FONT_7X13,
        FontId::DejaVu24 => &FONT_9X15,
        FontId::Ubuntu16 => &FONT_9X15_BOLD,
        FontId::Comic24 => &FONT_10X20,
        FontId::Minya24 => &FONT_9X18_BOLD,
        FontId::Tooney32 => &FONT_10X20,
        FontId::Small => &FONT_5X8,
        FontId::SevenSeg => &FONT_10X20,
        FontId::User(_) => &FONT_6X13,
    }
}

/// Line height in pixels
pub fn line_height(font: FontId) -> i32 {
    match font {
        FontId::SevenSeg => seven_seg::cell_height(&SevenSegStyle::default()),
        other => mono_font(other).character_size.height as i32,
    }
}

/// Horizontal advance per character
pub fn advance(font: &MonoFont<'_>) -> i32 {
    (font.character_size.width + font.character_spacing) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heights() {
        assert_eq!(line_height(FontId::Default), 13);
        assert_eq!(line_height(FontId::Small), 8);
        assert_eq!(line_height(FontId::Comic24), 20);
        assert_eq!(line_height(FontId::SevenSeg), 30);
    }

    #[test]
    fn test_every_builtin_has_a_font() {
        for font in FontId::BUILTIN {
            assert!(advance(mono_font(font)) > 0);
        }
    }
}
