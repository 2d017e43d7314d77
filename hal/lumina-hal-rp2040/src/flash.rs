//! Settings sector in on-chip flash
//!
//! RP2040 has no EEPROM, so the last erase sector of flash stands in for
//! it. Offsets are relative to the start of that sector. A write rewrites
//! the whole sector: read, patch, erase, program.

use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use lumina_hal::{PersistentStore, StoreError};

/// Flash size on the lamp board
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Start of the settings sector
pub const STORE_START: u32 = (FLASH_SIZE - ERASE_SIZE) as u32;

/// Flash-backed persistent store
pub struct Rp2040FlashStore<'d> {
    flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>,
}

impl<'d> Rp2040FlashStore<'d> {
    pub fn new(flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>) -> Self {
        Self { flash }
    }

    fn check(&self, offset: u32, len: usize) -> Result<(), StoreError> {
        let end = (offset as usize)
            .checked_add(len)
            .ok_or(StoreError::OutOfBounds)?;
        if end > ERASE_SIZE {
            return Err(StoreError::OutOfBounds);
        }
        Ok(())
    }
}

impl PersistentStore for Rp2040FlashStore<'_> {
    fn read(&mut self, offset: u32, buffer: &mut [u8]) -> Result<(), StoreError> {
        self.check(offset, buffer.len())?;
        self.flash
            .blocking_read(STORE_START + offset, buffer)
            .map_err(|_| StoreError::Device)
    }

    fn write(&mut self, offset: u32, data: &[u8]) -> Result<(), StoreError> {
        self.check(offset, data.len())?;

        let mut sector = [0u8; ERASE_SIZE];
        self.flash
            .blocking_read(STORE_START, &mut sector)
            .map_err(|_| StoreError::Device)?;

        let start = offset as usize;
        sector[start..start + data.len()].copy_from_slice(data);

        self.flash
            .blocking_erase(STORE_START, STORE_START + ERASE_SIZE as u32)
            .map_err(|_| StoreError::Device)?;
        self.flash
            .blocking_write(STORE_START, &sector)
            .map_err(|_| StoreError::Device)
    }

    fn capacity(&self) -> u32 {
        ERASE_SIZE as u32
    }
}
