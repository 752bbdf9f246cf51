//! ILI9341 TFT panel driver (4-wire SPI)
//!
//! 240x320 panel with a separate data/command line. Pixels are written
//! by opening a column/page window and streaming colors into GRAM.
//!
//! # Pixel formats
//!
//! - 16-bit: RGB565, two bytes per pixel, big-endian
//! - 24-bit: three bytes per pixel; the controller keeps the upper six
//!   bits of each channel (18-bit color)
//!
//! # Example
//!
//! ```ignore
//! let mut panel = Ili9341::new(spi, dc);
//! panel.init(&mut delay)?;
//! panel.fill_area(0, 0, 240, 320, Rgb888::BLACK)?;
//! ```

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use tftdemo_core::traits::{ColorDepth, PanelControl, Rotation};

/// Native (portrait) width
pub const WIDTH: u16 = 240;
/// Native (portrait) height
pub const HEIGHT: u16 = 320;

/// Pixels per SPI write when streaming
const CHUNK_PIXELS: usize = 64;

/// ILI9341 commands
#[allow(dead_code)]
mod cmd {
    pub const NOP: u8 = 0x00;
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const INVOFF: u8 = 0x20;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const PASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
    pub const FRMCTR1: u8 = 0xB1;
    pub const DFUNCTR: u8 = 0xB6;
    pub const PWCTR1: u8 = 0xC0;
    pub const PWCTR2: u8 = 0xC1;
    pub const VMCTR1: u8 = 0xC5;
    pub const VMCTR2: u8 = 0xC7;
    pub const GAMMASET: u8 = 0x26;
}

/// MADCTL bits
mod madctl {
    pub const MY: u8 = 0x80;
    pub const MX: u8 = 0x40;
    pub const MV: u8 = 0x20;
    pub const BGR: u8 = 0x08;
}

/// Memory access control value for an orientation
pub const fn madctl_for(rotation: Rotation) -> u8 {
    match rotation {
        Rotation::Portrait => madctl::MX | madctl::BGR,
        Rotation::Landscape => madctl::MV | madctl::BGR,
        Rotation::PortraitFlip => madctl::MY | madctl::BGR,
        Rotation::LandscapeFlip => madctl::MX | madctl::MY | madctl::MV | madctl::BGR,
    }
}

/// Interface pixel format value for a color depth
pub const fn colmod_for(depth: ColorDepth) -> u8 {
    match depth {
        ColorDepth::Bits16 => 0x55,
        ColorDepth::Bits24 => 0x66,
    }
}

/// Encode one pixel for the wire; returns the number of bytes written
fn encode(color: Rgb888, depth: ColorDepth, out: &mut [u8]) -> usize {
    match depth {
        ColorDepth::Bits16 => {
            let r = (color.r() >> 3) as u16;
            let g = (color.g() >> 2) as u16;
            let b = (color.b() >> 3) as u16;
            let raw = (r << 11) | (g << 5) | b;
            out[..2].copy_from_slice(&raw.to_be_bytes());
            2
        }
        ColorDepth::Bits24 => {
            out[0] = color.r() & 0xFC;
            out[1] = color.g() & 0xFC;
            out[2] = color.b() & 0xFC;
            3
        }
    }
}

/// Panel driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ili9341Error<SpiE, PinE> {
    /// SPI transfer failed
    Spi(SpiE),
    /// Data/command pin could not be driven
    Pin(PinE),
}

/// ILI9341 driver
pub struct Ili9341<SPI, DC> {
    spi: SPI,
    dc: DC,
    rotation: Rotation,
    depth: ColorDepth,
}

impl<SPI, DC> Ili9341<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Create a driver; call [`init`](Self::init) before drawing
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self {
            spi,
            dc,
            rotation: Rotation::Portrait,
            depth: ColorDepth::Bits24,
        }
    }

    /// Release the bus and pin
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }

    /// Run the power-up sequence and turn the display on
    pub fn init<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<(), Ili9341Error<SPI::Error, DC::Error>> {
        self.command(cmd::SWRESET, &[])?;
        delay.delay_ms(120);

        self.command(cmd::PWCTR1, &[0x23])?;
        self.command(cmd::PWCTR2, &[0x10])?;
        self.command(cmd::VMCTR1, &[0x3E, 0x28])?;
        self.command(cmd::VMCTR2, &[0x86])?;
        self.command(cmd::FRMCTR1, &[0x00, 0x18])?;
        self.command(cmd::DFUNCTR, &[0x08, 0x82, 0x27])?;
        self.command(cmd::GAMMASET, &[0x01])?;
        self.command(cmd::MADCTL, &[madctl_for(self.rotation)])?;
        self.command(cmd::COLMOD, &[colmod_for(self.depth)])?;
        self.command(cmd::INVOFF, &[])?;

        self.command(cmd::SLPOUT, &[])?;
        delay.delay_ms(120);
        self.command(cmd::DISPON, &[])?;
        delay.delay_ms(20);
        Ok(())
    }

    /// Current orientation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Current pixel format
    pub fn color_depth(&self) -> ColorDepth {
        self.depth
    }

    /// Width and height for the current orientation
    pub fn dimensions(&self) -> (u16, u16) {
        if self.rotation.is_landscape() {
            (HEIGHT, WIDTH)
        } else {
            (WIDTH, HEIGHT)
        }
    }

    /// Change orientation
    pub fn apply_rotation(
        &mut self,
        rotation: Rotation,
    ) -> Result<(), Ili9341Error<SPI::Error, DC::Error>> {
        self.command(cmd::MADCTL, &[madctl_for(rotation)])?;
        self.rotation = rotation;
        Ok(())
    }

    /// Change the interface pixel format
    pub fn apply_color_depth(
        &mut self,
        depth: ColorDepth,
    ) -> Result<(), Ili9341Error<SPI::Error, DC::Error>> {
        self.command(cmd::COLMOD, &[colmod_for(depth)])?;
        self.depth = depth;
        Ok(())
    }

    /// Open a GRAM window (inclusive corners) and start a memory write
    pub fn set_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), Ili9341Error<SPI::Error, DC::Error>> {
        let [xs_hi, xs_lo] = x0.to_be_bytes();
        let [xe_hi, xe_lo] = x1.to_be_bytes();
        let [ys_hi, ys_lo] = y0.to_be_bytes();
        let [ye_hi, ye_lo] = y1.to_be_bytes();
        self.command(cmd::CASET, &[xs_hi, xs_lo, xe_hi, xe_lo])?;
        self.command(cmd::PASET, &[ys_hi, ys_lo, ye_hi, ye_lo])?;
        self.command(cmd::RAMWR, &[])
    }

    /// Fill a rectangle with one color
    ///
    /// The rectangle must lie on the panel; empty rectangles are ignored.
    pub fn fill_area(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Rgb888,
    ) -> Result<(), Ili9341Error<SPI::Error, DC::Error>> {
        let count = width as usize * height as usize;
        self.write_pixels(x, y, width, height, core::iter::repeat(color).take(count))
    }

    /// Stream pixels into a rectangle, row by row
    ///
    /// Stops early if `pixels` runs out; surplus pixels are not sent.
    pub fn write_pixels<I>(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        pixels: I,
    ) -> Result<(), Ili9341Error<SPI::Error, DC::Error>>
    where
        I: IntoIterator<Item = Rgb888>,
    {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.set_window(x, y, x + width - 1, y + height - 1)?;

        let count = width as usize * height as usize;
        let mut buf = [0u8; CHUNK_PIXELS * 3];
        let mut len = 0;
        for color in pixels.into_iter().take(count) {
            len += encode(color, self.depth, &mut buf[len..]);
            if len + 3 > buf.len() {
                self.data(&buf[..len])?;
                len = 0;
            }
        }
        if len > 0 {
            self.data(&buf[..len])?;
        }
        Ok(())
    }

    /// Send a command byte followed by its parameters
    fn command(
        &mut self,
        command: u8,
        params: &[u8],
    ) -> Result<(), Ili9341Error<SPI::Error, DC::Error>> {
        self.dc.set_low().map_err(Ili9341Error::Pin)?;
        self.spi.write(&[command]).map_err(Ili9341Error::Spi)?;
        if !params.is_empty() {
            self.data(params)?;
        }
        Ok(())
    }

    fn data(&mut self, bytes: &[u8]) -> Result<(), Ili9341Error<SPI::Error, DC::Error>> {
        self.dc.set_high().map_err(Ili9341Error::Pin)?;
        self.spi.write(bytes).map_err(Ili9341Error::Spi)
    }
}

impl<SPI, DC> OriginDimensions for Ili9341<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    fn size(&self) -> Size {
        let (w, h) = self.dimensions();
        Size::new(w as u32, h as u32)
    }
}

impl<SPI, DC> DrawTarget for Ili9341<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    type Color = Rgb888;
    type Error = Ili9341Error<SPI::Error, DC::Error>;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if bounds.contains(point) {
                let (x, y) = (point.x as u16, point.y as u16);
                self.write_pixels(x, y, 1, 1, core::iter::once(color))?;
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let drawable = area.intersection(&self.bounding_box());
        if drawable.size != area.size || area.is_zero_sized() {
            // Partially off-panel: fall back to per-pixel clipping
            return self.draw_iter(
                area.points()
                    .zip(colors)
                    .map(|(point, color)| Pixel(point, color)),
            );
        }
        self.write_pixels(
            area.top_left.x as u16,
            area.top_left.y as u16,
            area.size.width as u16,
            area.size.height as u16,
            colors,
        )
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.is_zero_sized() {
            return Ok(());
        }
        self.fill_area(
            area.top_left.x as u16,
            area.top_left.y as u16,
            area.size.width as u16,
            area.size.height as u16,
            color,
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let (w, h) = self.dimensions();
        self.fill_area(0, 0, w, h, color)
    }
}

impl<SPI, DC> PanelControl for Ili9341<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    fn set_rotation(&mut self, rotation: Rotation) {
        if self.apply_rotation(rotation).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("ILI9341: MADCTL write failed");
        }
    }

    fn set_color_depth(&mut self, depth: ColorDepth) {
        if self.apply_color_depth(depth).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("ILI9341: COLMOD write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{DcPin, PanelSpi, Wire};
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn panel(wire: &Wire) -> Ili9341<PanelSpi, DcPin> {
        Ili9341::new(wire.spi(), wire.dc())
    }

    #[test]
    fn test_init_sequence() {
        let wire = Wire::new();
        let mut lcd = panel(&wire);
        lcd.init(&mut NoDelay).unwrap();

        let commands = wire.commands();
        assert_eq!(commands.first(), Some(&cmd::SWRESET));
        assert_eq!(commands.last(), Some(&cmd::DISPON));
        assert!(commands.contains(&cmd::SLPOUT));
        assert_eq!(wire.data_after(cmd::MADCTL), [0x48]);
        assert_eq!(wire.data_after(cmd::COLMOD), [0x66]);
    }

    #[test]
    fn test_madctl_per_rotation() {
        assert_eq!(madctl_for(Rotation::Portrait), 0x48);
        assert_eq!(madctl_for(Rotation::Landscape), 0x28);
        assert_eq!(madctl_for(Rotation::PortraitFlip), 0x88);
        assert_eq!(madctl_for(Rotation::LandscapeFlip), 0xE8);
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        let wire = Wire::new();
        let mut lcd = panel(&wire);
        assert_eq!(lcd.size(), Size::new(240, 320));

        PanelControl::set_rotation(&mut lcd, Rotation::Landscape);
        assert_eq!(lcd.size(), Size::new(320, 240));
        assert_eq!(wire.data_after(cmd::MADCTL), [0x28]);
    }

    #[test]
    fn test_window_bytes() {
        let wire = Wire::new();
        let mut lcd = panel(&wire);
        lcd.set_window(10, 300, 265, 319).unwrap();

        assert_eq!(wire.data_after(cmd::CASET), [0, 10, 1, 9]);
        assert_eq!(wire.data_after(cmd::PASET), [1, 44, 1, 63]);
        assert_eq!(wire.commands(), [cmd::CASET, cmd::PASET, cmd::RAMWR]);
    }

    #[test]
    fn test_fill_encodes_24_bit() {
        let wire = Wire::new();
        let mut lcd = panel(&wire);
        lcd.fill_area(0, 0, 2, 1, Rgb888::new(0xFF, 0x81, 0x03)).unwrap();

        assert_eq!(wire.data_after(cmd::RAMWR), [0xFC, 0x80, 0x00, 0xFC, 0x80, 0x00]);
    }

    #[test]
    fn test_fill_encodes_rgb565() {
        let wire = Wire::new();
        let mut lcd = panel(&wire);
        lcd.apply_color_depth(ColorDepth::Bits16).unwrap();
        assert_eq!(wire.data_after(cmd::COLMOD), [0x55]);

        lcd.fill_area(5, 5, 1, 1, Rgb888::new(0xFF, 0x00, 0x00)).unwrap();
        assert_eq!(wire.data_after(cmd::RAMWR), [0xF8, 0x00]);
    }

    #[test]
    fn test_large_fill_is_chunked() {
        let wire = Wire::new();
        let mut lcd = panel(&wire);
        lcd.fill_area(0, 0, 100, 2, Rgb888::WHITE).unwrap();

        assert_eq!(wire.data_after(cmd::RAMWR).len(), 200 * 3);
    }

    #[test]
    fn test_fill_solid_clips_to_panel() {
        let wire = Wire::new();
        let mut lcd = panel(&wire);
        Rectangle::new(Point::new(230, 310), Size::new(20, 20))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::RED))
            .draw(&mut lcd)
            .unwrap();

        assert_eq!(wire.data_after(cmd::CASET), [0, 230, 0, 239]);
        assert_eq!(wire.data_after(cmd::PASET), [1, 54, 1, 63]);
        assert_eq!(wire.data_after(cmd::RAMWR).len(), 100 * 3);
    }

    #[test]
    fn test_off_panel_pixels_dropped() {
        let wire = Wire::new();
        let mut lcd = panel(&wire);
        lcd.draw_iter([
            Pixel(Point::new(-1, 0), Rgb888::RED),
            Pixel(Point::new(240, 0), Rgb888::RED),
            Pixel(Point::new(3, 4), Rgb888::BLUE),
        ])
        .unwrap();

        assert_eq!(wire.commands(), [cmd::CASET, cmd::PASET, cmd::RAMWR]);
        assert_eq!(wire.data_after(cmd::RAMWR), [0x00, 0x00, 0xFC]);
    }

    #[test]
    fn test_clear_covers_rotated_panel() {
        let wire = Wire::new();
        let mut lcd = panel(&wire);
        lcd.apply_rotation(Rotation::LandscapeFlip).unwrap();
        wire.clear();

        lcd.clear(Rgb888::BLACK).unwrap();
        assert_eq!(wire.data_after(cmd::CASET), [0, 0, 1, 63]);
        assert_eq!(wire.data_after(cmd::PASET), [0, 0, 0, 239]);
        assert_eq!(wire.data_after(cmd::RAMWR).len(), 320 * 240 * 3);
    }
}
