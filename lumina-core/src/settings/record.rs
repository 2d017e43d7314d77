//! Settings record layout
//!
//! ```text
//! offset  size  field
//! 0       2     magic            (little-endian)
//! 2       2     brightness       (little-endian, percent)
//! 4       1     stepped dimming  (0 or 1)
//! 5       1     proximity lock   (0 or 1)
//! 6       2     checksum         (CRC-16 over bytes 0..8 with this field zeroed)
//! ```

use crate::brightness::{BRIGHTNESS_MAX, BRIGHTNESS_MIN};

/// Magic number identifying a settings record ("LM")
pub const SETTINGS_MAGIC: u16 = 0x4C4D;

/// Encoded record size in bytes
pub const RECORD_LEN: usize = 8;

/// Brightness used when no valid record exists
pub const DEFAULT_BRIGHTNESS: u8 = 32;

/// User settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Brightness in percent, always within 4..=100
    pub brightness: u8,
    /// Dim through the fixed level set instead of 1% increments
    pub stepped_dimming: bool,
    /// Ignore gestures until unlocked by the power-up hold
    pub proximity_locked: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS,
            stepped_dimming: true,
            proximity_locked: false,
        }
    }
}

/// Reasons a stored record is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Magic number mismatch (blank or foreign data)
    BadMagic,
    /// Checksum mismatch (torn or corrupted write)
    BadChecksum,
    /// Field value outside its domain
    OutOfRange,
}

/// CRC-16 update step (reflected polynomial 0xA001)
///
/// Same algorithm as avr-libc's `_crc16_update`; start from `0xFFFF`.
pub fn crc16_update(mut crc: u16, byte: u8) -> u16 {
    crc ^= byte as u16;
    for _ in 0..8 {
        if crc & 1 != 0 {
            crc = (crc >> 1) ^ 0xA001;
        } else {
            crc >>= 1;
        }
    }
    crc
}

fn checksum(bytes: &[u8; RECORD_LEN]) -> u16 {
    let mut zeroed = *bytes;
    zeroed[6] = 0;
    zeroed[7] = 0;
    zeroed.iter().fold(0xFFFF, |crc, &b| crc16_update(crc, b))
}

impl Settings {
    /// Serialize into the on-storage record
    pub fn encode(&self) -> [u8; RECORD_LEN] {
        let mut bytes = [0u8; RECORD_LEN];
        bytes[0..2].copy_from_slice(&SETTINGS_MAGIC.to_le_bytes());
        bytes[2..4].copy_from_slice(&(self.brightness as u16).to_le_bytes());
        bytes[4] = self.stepped_dimming as u8;
        bytes[5] = self.proximity_locked as u8;
        let crc = checksum(&bytes);
        bytes[6..8].copy_from_slice(&crc.to_le_bytes());
        bytes
    }

    /// Parse and validate a stored record
    pub fn decode(bytes: &[u8; RECORD_LEN]) -> Result<Self, RecordError> {
        let magic = u16::from_le_bytes([bytes[0], bytes[1]]);
        if magic != SETTINGS_MAGIC {
            return Err(RecordError::BadMagic);
        }

        let stored_crc = u16::from_le_bytes([bytes[6], bytes[7]]);
        if stored_crc != checksum(bytes) {
            return Err(RecordError::BadChecksum);
        }

        let brightness = u16::from_le_bytes([bytes[2], bytes[3]]);
        if brightness < BRIGHTNESS_MIN as u16 || brightness > BRIGHTNESS_MAX as u16 {
            return Err(RecordError::OutOfRange);
        }

        Ok(Self {
            brightness: brightness as u8,
            stepped_dimming: decode_bool(bytes[4])?,
            proximity_locked: decode_bool(bytes[5])?,
        })
    }
}

fn decode_bool(byte: u8) -> Result<bool, RecordError> {
    match byte {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(RecordError::OutOfRange),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_settings() -> impl Strategy<Value = Settings> {
        (BRIGHTNESS_MIN..=BRIGHTNESS_MAX, any::<bool>(), any::<bool>()).prop_map(
            |(brightness, stepped_dimming, proximity_locked)| Settings {
                brightness,
                stepped_dimming,
                proximity_locked,
            },
        )
    }

    #[test]
    fn test_crc16_known_value() {
        // CRC-16/MODBUS check value for "123456789"
        let crc = b"123456789"
            .iter()
            .fold(0xFFFF, |crc, &b| crc16_update(crc, b));
        assert_eq!(crc, 0x4B37);
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.brightness, 32);
        assert!(s.stepped_dimming);
        assert!(!s.proximity_locked);
    }

    #[test]
    fn test_blank_storage_rejected() {
        assert_eq!(
            Settings::decode(&[0xFF; RECORD_LEN]),
            Err(RecordError::BadMagic)
        );
        assert_eq!(
            Settings::decode(&[0x00; RECORD_LEN]),
            Err(RecordError::BadMagic)
        );
    }

    #[test]
    fn test_layout() {
        let bytes = Settings {
            brightness: 100,
            stepped_dimming: false,
            proximity_locked: true,
        }
        .encode();
        assert_eq!(&bytes[0..2], &[0x4D, 0x4C]);
        assert_eq!(&bytes[2..4], &[100, 0]);
        assert_eq!(bytes[4], 0);
        assert_eq!(bytes[5], 1);
    }

    proptest! {
        #[test]
        fn prop_round_trip(s in any_settings()) {
            prop_assert_eq!(Settings::decode(&s.encode()), Ok(s));
        }

        #[test]
        fn prop_single_bit_corruption_rejected(s in any_settings(), bit in 0usize..RECORD_LEN * 8) {
            let mut bytes = s.encode();
            bytes[bit / 8] ^= 1 << (bit % 8);
            prop_assert!(Settings::decode(&bytes).is_err());
        }
    }
}
