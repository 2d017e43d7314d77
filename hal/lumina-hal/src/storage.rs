//! Persistent storage abstractions
//!
//! A small byte-addressed non-volatile region (EEPROM, or a reserved flash
//! sector on chips without one). The control logic stores one fixed-size
//! record at a fixed offset; integrity is handled by the record checksum,
//! not by the store.

/// Errors from persistent storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Underlying memory operation failed
    Device,
    /// Offset/length outside the storage region
    OutOfBounds,
}

/// Byte-addressed persistent storage
///
/// Writes are not atomic: losing power mid-write can leave a torn record.
pub trait PersistentStore {
    /// Read `buffer.len()` bytes starting at `offset`
    fn read(&mut self, offset: u32, buffer: &mut [u8]) -> Result<(), StoreError>;

    /// Write `data` starting at `offset`
    fn write(&mut self, offset: u32, data: &[u8]) -> Result<(), StoreError>;

    /// Size of the storage region in bytes
    fn capacity(&self) -> u32;
}
