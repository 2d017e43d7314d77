//! Fake drivers for host tests

use lumina_hal::{PersistentStore, PwmOutput, StoreError, WatchdogTimer};

use crate::traits::{SensorError, TemperatureSensor};

const MEM_SIZE: usize = 64;

/// Erased-flash-like byte array
#[derive(Debug, Clone)]
pub struct MemStore {
    bytes: [u8; MEM_SIZE],
    writes: u32,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            bytes: [0xFF; MEM_SIZE],
            writes: 0,
            fail_reads: false,
            fail_writes: false,
        }
    }

    pub fn bytes(&self) -> &[u8; MEM_SIZE] {
        &self.bytes
    }

    pub fn bytes_mut(&mut self) -> &mut [u8; MEM_SIZE] {
        &mut self.bytes
    }

    pub fn write_count(&self) -> u32 {
        self.writes
    }

    fn range(&self, offset: u32, len: usize) -> Result<core::ops::Range<usize>, StoreError> {
        let start = offset as usize;
        let end = start.checked_add(len).ok_or(StoreError::OutOfBounds)?;
        if end > MEM_SIZE {
            return Err(StoreError::OutOfBounds);
        }
        Ok(start..end)
    }
}

impl PersistentStore for MemStore {
    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), StoreError> {
        if self.fail_reads {
            return Err(StoreError::Device);
        }
        let range = self.range(offset, buf.len())?;
        buf.copy_from_slice(&self.bytes[range]);
        Ok(())
    }

    fn write(&mut self, offset: u32, data: &[u8]) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Device);
        }
        let range = self.range(offset, data.len())?;
        self.bytes[range].copy_from_slice(data);
        self.writes += 1;
        Ok(())
    }

    fn capacity(&self) -> u32 {
        MEM_SIZE as u32
    }
}

/// PWM output that records the last applied duty
#[derive(Debug, Default)]
pub struct FakePwm {
    pub duty: u8,
    enabled: bool,
}

impl PwmOutput for FakePwm {
    fn set_duty(&mut self, percent: u8) {
        self.duty = percent;
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.duty = 0;
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Sensor returning a fixed reading
#[derive(Debug)]
pub struct FakeSensor {
    pub reading: Result<i16, SensorError>,
    pub reads: u32,
    pub powered: bool,
}

impl FakeSensor {
    pub fn new(reading: Result<i16, SensorError>) -> Self {
        Self {
            reading,
            reads: 0,
            powered: true,
        }
    }
}

impl TemperatureSensor for FakeSensor {
    fn read_celsius(&mut self) -> Result<i16, SensorError> {
        self.reads += 1;
        self.reading
    }

    fn set_powered(&mut self, powered: bool) {
        self.powered = powered;
    }
}

/// Watchdog that counts feeds
#[derive(Debug, Default)]
pub struct FakeWatchdog {
    pub timeout_ms: Option<u32>,
    pub feeds: u32,
}

impl WatchdogTimer for FakeWatchdog {
    fn start(&mut self, timeout_ms: u32) {
        self.timeout_ms = Some(timeout_ms);
    }

    fn feed(&mut self) {
        self.feeds += 1;
    }

    fn stop(&mut self) {
        self.timeout_ms = None;
    }
}
