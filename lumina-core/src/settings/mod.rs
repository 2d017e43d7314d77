//! Persistent user settings
//!
//! Brightness preference and the two gesture-configured flags are the only
//! values that survive a power cycle. They are stored as one fixed-size,
//! checksummed record and written only after a quiet period to limit wear.

pub mod record;
pub mod store;

pub use record::{crc16_update, RecordError, Settings, RECORD_LEN, SETTINGS_MAGIC};
pub use store::SettingsStore;
