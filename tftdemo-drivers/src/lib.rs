//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tftdemo-core and tftdemo-hal for the demo board's peripherals:
//!
//! - Panel controllers (ILI9341 over 4-wire SPI)
//! - Resistive touch controllers (XPT2046)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod panel;
pub mod touch;

#[cfg(test)]
pub(crate) mod bus;
