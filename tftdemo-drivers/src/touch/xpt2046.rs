//! XPT2046 resistive touch controller
//!
//! Each conversion is one SPI transaction: a control byte, then two bytes
//! holding a 12-bit result (MSB first, one leading busy bit, three
//! trailing zero bits).
//!
//! A read is accepted only when PENIRQ is low and the pressure (Z1)
//! conversion clears the threshold. Coordinates are averaged over a few
//! samples, mapped through the calibration into portrait pixels, then
//! rotated to match the display orientation.

use embedded_hal::digital::InputPin;
use embedded_hal::spi::{Operation, SpiDevice};
use tftdemo_hal::{TouchPoint, TouchSource};

/// Control bytes (differential reference, 12-bit, power-down between)
#[allow(dead_code)]
pub mod cmd {
    pub const READ_X: u8 = 0xD0;
    pub const READ_Y: u8 = 0x90;
    pub const READ_Z1: u8 = 0xB0;
    pub const READ_Z2: u8 = 0xC0;
}

/// Samples averaged per coordinate
const SAMPLES: u32 = 4;

/// Minimum Z1 reading counted as a press
pub const PRESSURE_THRESHOLD: u16 = 100;

/// Raw reading range for each axis in portrait orientation
///
/// `min` maps to pixel 0 and `max` to the last pixel; `min > max` is
/// allowed for panels whose axis runs backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchCalibration {
    pub x_min: u16,
    pub x_max: u16,
    pub y_min: u16,
    pub y_max: u16,
    /// Portrait panel width in pixels
    pub width: u16,
    /// Portrait panel height in pixels
    pub height: u16,
}

impl Default for TouchCalibration {
    fn default() -> Self {
        Self {
            x_min: 228,
            x_max: 3632,
            y_min: 3730,
            y_max: 308,
            width: 240,
            height: 320,
        }
    }
}

impl TouchCalibration {
    /// Map a raw reading pair to portrait pixel coordinates
    pub fn to_portrait(&self, raw_x: u16, raw_y: u16) -> (i32, i32) {
        (
            scale(raw_x, self.x_min, self.x_max, self.width),
            scale(raw_y, self.y_min, self.y_max, self.height),
        )
    }
}

fn scale(raw: u16, min: u16, max: u16, pixels: u16) -> i32 {
    let span = max as i32 - min as i32;
    let last = pixels as i32 - 1;
    if span == 0 || last <= 0 {
        return 0;
    }
    let v = (raw as i32 - min as i32) * last / span;
    v.clamp(0, last)
}

/// Touch controller errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError<SpiE, PinE> {
    /// SPI transfer failed
    Spi(SpiE),
    /// PENIRQ could not be read
    Pin(PinE),
}

/// XPT2046 driver
pub struct Xpt2046<SPI, IRQ> {
    spi: SPI,
    irq: IRQ,
    calibration: TouchCalibration,
    quarter_turns: u8,
}

impl<SPI, IRQ> Xpt2046<SPI, IRQ>
where
    SPI: SpiDevice,
    IRQ: InputPin,
{
    pub fn new(spi: SPI, irq: IRQ, calibration: TouchCalibration) -> Self {
        Self {
            spi,
            irq,
            calibration,
            quarter_turns: 0,
        }
    }

    pub fn calibration(&self) -> &TouchCalibration {
        &self.calibration
    }

    /// One 12-bit conversion
    pub fn convert(&mut self, command: u8) -> Result<u16, TouchError<SPI::Error, IRQ::Error>> {
        let mut buf = [0u8; 2];
        self.spi
            .transaction(&mut [Operation::Write(&[command]), Operation::Read(&mut buf)])
            .map_err(TouchError::Spi)?;
        Ok(u16::from_be_bytes(buf) >> 3)
    }

    /// Raw averaged `(x, y)` if the panel is pressed
    pub fn read_raw(&mut self) -> Result<Option<(u16, u16)>, TouchError<SPI::Error, IRQ::Error>> {
        if self.irq.is_high().map_err(TouchError::Pin)? {
            return Ok(None);
        }
        if self.convert(cmd::READ_Z1)? < PRESSURE_THRESHOLD {
            return Ok(None);
        }

        let (mut sum_x, mut sum_y) = (0u32, 0u32);
        for _ in 0..SAMPLES {
            sum_x += self.convert(cmd::READ_X)? as u32;
            sum_y += self.convert(cmd::READ_Y)? as u32;
        }

        // Released while sampling
        if self.convert(cmd::READ_Z1)? < PRESSURE_THRESHOLD {
            return Ok(None);
        }
        Ok(Some(((sum_x / SAMPLES) as u16, (sum_y / SAMPLES) as u16)))
    }

    /// Calibrated, rotated position if the panel is pressed
    pub fn read_point(&mut self) -> Result<Option<TouchPoint>, TouchError<SPI::Error, IRQ::Error>> {
        let Some((raw_x, raw_y)) = self.read_raw()? else {
            return Ok(None);
        };
        let (x, y) = self.calibration.to_portrait(raw_x, raw_y);
        Ok(Some(self.rotate(x, y)))
    }

    /// Rotate portrait coordinates clockwise by the current quarter turns
    fn rotate(&self, x: i32, y: i32) -> TouchPoint {
        let w = self.calibration.width as i32;
        let h = self.calibration.height as i32;
        match self.quarter_turns & 3 {
            0 => TouchPoint::new(x, y),
            1 => TouchPoint::new(h - 1 - y, x),
            2 => TouchPoint::new(w - 1 - x, h - 1 - y),
            _ => TouchPoint::new(y, w - 1 - x),
        }
    }
}

impl<SPI, IRQ> TouchSource for Xpt2046<SPI, IRQ>
where
    SPI: SpiDevice,
    IRQ: InputPin,
{
    fn read_touch(&mut self) -> Option<TouchPoint> {
        match self.read_point() {
            Ok(point) => point,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("XPT2046: read failed: {}", defmt::Debug2Format(&_e));
                None
            }
        }
    }

    fn set_quarter_turns(&mut self, quarter_turns: u8) {
        self.quarter_turns = quarter_turns & 3;
    }
}
