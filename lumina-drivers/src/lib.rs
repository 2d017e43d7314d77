//! Driver implementations
//!
//! This crate provides concrete implementations of the device traits
//! defined in lumina-core on top of the lumina-hal peripheral traits:
//!
//! - Temperature sensors (NTC thermistor divider, Beta model)

#![no_std]
#![deny(unsafe_code)]

pub mod sensor;
