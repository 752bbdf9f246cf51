//! Recording bus fakes for driver tests

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::spi::{self, Operation, SpiDevice};

/// What went over the wire, split by the D/C line level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Command(u8),
    Data(Vec<u8>),
}

/// Shared panel wire: SPI writes are tagged with the D/C level
#[derive(Clone, Default)]
pub struct Wire {
    data_mode: Rc<Cell<bool>>,
    frames: Rc<RefCell<Vec<Frame>>>,
}

impl Wire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spi(&self) -> PanelSpi {
        PanelSpi { wire: self.clone() }
    }

    pub fn dc(&self) -> DcPin {
        DcPin { wire: self.clone() }
    }

    pub fn clear(&self) {
        self.frames.borrow_mut().clear();
    }

    /// Command bytes in order
    pub fn commands(&self) -> Vec<u8> {
        self.frames
            .borrow()
            .iter()
            .filter_map(|f| match f {
                Frame::Command(c) => Some(*c),
                Frame::Data(_) => None,
            })
            .collect()
    }

    /// Parameter bytes sent after the last occurrence of `command`
    pub fn data_after(&self, command: u8) -> Vec<u8> {
        let frames = self.frames.borrow();
        let Some(start) = frames.iter().rposition(|f| *f == Frame::Command(command)) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for frame in &frames[start + 1..] {
            match frame {
                Frame::Data(bytes) => out.extend_from_slice(bytes),
                Frame::Command(_) => break,
            }
        }
        out
    }
}

pub struct PanelSpi {
    wire: Wire,
}

impl spi::ErrorType for PanelSpi {
    type Error = Infallible;
}

impl SpiDevice for PanelSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
        let data_mode = self.wire.data_mode.get();
        let mut frames = self.wire.frames.borrow_mut();
        for op in operations.iter() {
            if let Operation::Write(bytes) = op {
                if data_mode {
                    frames.push(Frame::Data(bytes.to_vec()));
                } else {
                    frames.extend(bytes.iter().map(|b| Frame::Command(*b)));
                }
            }
        }
        Ok(())
    }
}

pub struct DcPin {
    wire: Wire,
}

impl digital::ErrorType for DcPin {
    type Error = Infallible;
}

impl OutputPin for DcPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.wire.data_mode.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.wire.data_mode.set(true);
        Ok(())
    }
}

/// Touch controller fake answering conversions from a register map
#[derive(Default)]
pub struct TouchSpi {
    pub values: BTreeMap<u8, u16>,
    pub commands: Vec<u8>,
}

impl TouchSpi {
    pub fn with(values: &[(u8, u16)]) -> Self {
        Self {
            values: values.iter().copied().collect(),
            commands: Vec::new(),
        }
    }
}

impl spi::ErrorType for TouchSpi {
    type Error = Infallible;
}

impl SpiDevice for TouchSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
        let mut last = 0;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    if let Some(&b) = bytes.first() {
                        last = b;
                        self.commands.push(b);
                    }
                }
                Operation::Read(buf) => {
                    // 12-bit result, MSB first, left-aligned after one busy bit
                    let raw = self.values.get(&last).copied().unwrap_or(0) << 3;
                    buf.copy_from_slice(&raw.to_be_bytes()[..buf.len()]);
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// PENIRQ line; low while pressed
pub struct IrqPin {
    pub pressed: bool,
}

impl digital::ErrorType for IrqPin {
    type Error = Infallible;
}

impl InputPin for IrqPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(!self.pressed)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(self.pressed)
    }
}
