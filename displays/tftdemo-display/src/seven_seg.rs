//! Seven-segment text
//!
//! Digits are built from filled bars: `length` pixels long, `width`
//! pixels thick. Segment layout:
//!
//! ```text
//!  aaa
//! f   b
//!  ggg
//! e   c
//!  ddd
//! ```
//!
//! `:` and `.` draw square dots; anything else advances one cell blank.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use tftdemo_core::gfx::SevenSegStyle;

const SEG_A: u8 = 1 << 0;
const SEG_B: u8 = 1 << 1;
const SEG_C: u8 = 1 << 2;
const SEG_D: u8 = 1 << 3;
const SEG_E: u8 = 1 << 4;
const SEG_F: u8 = 1 << 5;
const SEG_G: u8 = 1 << 6;

const DIGITS: [u8; 10] = [
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
    SEG_B | SEG_C,
    SEG_A | SEG_B | SEG_G | SEG_E | SEG_D,
    SEG_A | SEG_B | SEG_G | SEG_C | SEG_D,
    SEG_F | SEG_G | SEG_B | SEG_C,
    SEG_A | SEG_F | SEG_G | SEG_C | SEG_D,
    SEG_A | SEG_F | SEG_G | SEG_E | SEG_C | SEG_D,
    SEG_A | SEG_B | SEG_C,
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,
];

/// Segment mask for a digit character
pub fn segments(c: char) -> Option<u8> {
    c.to_digit(10).map(|d| DIGITS[d as usize])
}

/// Height of one character cell
pub fn cell_height(style: &SevenSegStyle) -> i32 {
    2 * style.length as i32 + 3 * style.width as i32
}

/// Width of a digit cell, including the gap after it
pub fn digit_advance(style: &SevenSegStyle) -> i32 {
    style.length as i32 + 3 * style.width as i32
}

/// Width of a `:` or `.` cell, including the gap after it
pub fn dot_advance(style: &SevenSegStyle) -> i32 {
    3 * style.width as i32
}

/// Total width of a string
pub fn text_width(text: &str, style: &SevenSegStyle) -> i32 {
    text.chars()
        .map(|c| match c {
            ':' | '.' => dot_advance(style),
            _ => digit_advance(style),
        })
        .sum()
}

/// Bars making up the lit segments of one digit, relative to `origin`
fn bars(mask: u8, origin: Point, style: &SevenSegStyle) -> impl Iterator<Item = Rectangle> {
    let l = style.length as i32;
    let w = style.width as i32;
    let horizontal = Size::new(l as u32, w as u32);
    let vertical = Size::new(w as u32, l as u32);
    let at = move |x: i32, y: i32| origin + Point::new(x, y);

    let all = [
        (SEG_A, Rectangle::new(at(w, 0), horizontal)),
        (SEG_B, Rectangle::new(at(l + w, w), vertical)),
        (SEG_C, Rectangle::new(at(l + w, l + 2 * w), vertical)),
        (SEG_D, Rectangle::new(at(w, 2 * l + 2 * w), horizontal)),
        (SEG_E, Rectangle::new(at(0, l + 2 * w), vertical)),
        (SEG_F, Rectangle::new(at(0, w), vertical)),
        (SEG_G, Rectangle::new(at(w, l + w), horizontal)),
    ];
    all.into_iter()
        .filter(move |(bit, _)| mask & bit != 0)
        .map(|(_, rect)| rect)
}

/// Draw a string of digits and separators with its top-left at `origin`
pub fn draw<D>(
    target: &mut D,
    text: &str,
    origin: Point,
    style: &SevenSegStyle,
    color: Rgb888,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let fill = PrimitiveStyle::with_fill(color);
    let outline = style
        .outline
        .then(|| {
            let c = style.outline_color;
            PrimitiveStyle::with_stroke(Rgb888::new(c.r, c.g, c.b), 1)
        });
    let w = style.width as i32;
    let l = style.length as i32;

    let mut x = origin.x;
    for c in text.chars() {
        match c {
            ':' | '.' => {
                let dot = Size::new(w as u32, w as u32);
                let lower = Rectangle::new(Point::new(x + w / 2, origin.y + 2 * l + w), dot);
                lower.into_styled(fill).draw(target)?;
                if c == ':' {
                    let upper = Rectangle::new(Point::new(x + w / 2, origin.y + l), dot);
                    upper.into_styled(fill).draw(target)?;
                }
                x += dot_advance(style);
            }
            _ => {
                if let Some(mask) = segments(c) {
                    for bar in bars(mask, Point::new(x, origin.y), style) {
                        bar.into_styled(fill).draw(target)?;
                        if let Some(outline) = outline {
                            bar.into_styled(outline).draw(target)?;
                        }
                    }
                }
                x += digit_advance(style);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_masks() {
        assert_eq!(segments('8').map(u8::count_ones), Some(7));
        assert_eq!(segments('1').map(u8::count_ones), Some(2));
        assert_eq!(segments('x'), None);
    }

    #[test]
    fn test_text_width() {
        let style = SevenSegStyle {
            length: 8,
            width: 2,
            ..SevenSegStyle::default()
        };
        // 7 digits of 14 plus 2 separators of 6
        assert_eq!(text_width("00:00:000", &style), 7 * 14 + 2 * 6);
        assert_eq!(cell_height(&style), 22);
    }

    #[test]
    fn test_bars_inside_cell() {
        let style = SevenSegStyle::default();
        let cell = Rectangle::new(
            Point::zero(),
            Size::new(
                (digit_advance(&style) - style.width as i32) as u32,
                cell_height(&style) as u32,
            ),
        );
        for bar in bars(0x7F, Point::zero(), &style) {
            let corner = bar.bottom_right().unwrap();
            assert!(cell.contains(bar.top_left), "{:?}", bar);
            assert!(cell.contains(corner), "{:?}", bar);
        }
    }
}
