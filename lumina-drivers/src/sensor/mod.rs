//! Temperature sensors

pub mod ntc;

pub use ntc::NtcThermistor;
