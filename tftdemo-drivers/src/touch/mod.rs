//! Touch controller drivers

pub mod xpt2046;

pub use xpt2046::{TouchCalibration, TouchError, Xpt2046};
