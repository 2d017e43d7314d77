//! Settings store with quiet-period commits
//!
//! Every change restarts a quiet timer; the record is written only once the
//! value has been stable for [`SETTINGS_COMMIT_DELAY_MS`]. Losing power
//! before that restores the last committed value on the next boot.
//!
//! Writes are not transactional. A power loss during the write itself can
//! leave a torn record; the checksum makes the next load fall back to
//! defaults rather than accept it.

use lumina_hal::{PersistentStore, StoreError};

use super::record::{Settings, RECORD_LEN};
use crate::brightness::clamp_brightness;
use crate::config::SETTINGS_COMMIT_DELAY_MS;

/// Settings with persistence and dirty tracking
pub struct SettingsStore<S> {
    store: S,
    offset: u32,
    current: Settings,
    /// Bytes known to be in storage (None if unknown or invalid)
    committed: Option<[u8; RECORD_LEN]>,
    /// Time of the most recent uncommitted change
    dirty_since: Option<u32>,
}

impl<S: PersistentStore> SettingsStore<S> {
    /// Load settings from storage, falling back to defaults
    ///
    /// Nothing is written here even when the stored record is invalid.
    pub fn load(mut store: S, offset: u32) -> Self {
        let mut bytes = [0u8; RECORD_LEN];
        let (current, committed) = match store.read(offset, &mut bytes) {
            Ok(()) => match Settings::decode(&bytes) {
                Ok(settings) => {
                    info!(
                        "Settings loaded: brightness={}%, stepped={}, locked={}",
                        settings.brightness,
                        settings.stepped_dimming,
                        settings.proximity_locked
                    );
                    (settings, Some(bytes))
                }
                Err(e) => {
                    warn!("Stored settings rejected ({}), using defaults", e);
                    (Settings::default(), None)
                }
            },
            Err(e) => {
                warn!("Settings read failed ({}), using defaults", e);
                (Settings::default(), None)
            }
        };

        Self {
            store,
            offset,
            current,
            committed,
            dirty_since: None,
        }
    }

    /// Current (possibly uncommitted) settings
    pub fn settings(&self) -> Settings {
        self.current
    }

    /// Modify the settings
    ///
    /// Restarts the quiet period if anything actually changed. Returns true
    /// if the value changed.
    pub fn update(&mut self, now_ms: u32, f: impl FnOnce(&mut Settings)) -> bool {
        let mut next = self.current;
        f(&mut next);
        next.brightness = clamp_brightness(next.brightness);

        if next == self.current {
            return false;
        }

        self.current = next;
        self.dirty_since = Some(now_ms);
        true
    }

    /// Check if there is an uncommitted change
    pub fn is_dirty(&self) -> bool {
        self.dirty_since.is_some()
    }

    /// Time at which a pending change becomes eligible for commit
    pub fn commit_deadline(&self) -> Option<u32> {
        self.dirty_since
            .map(|since| since.wrapping_add(SETTINGS_COMMIT_DELAY_MS))
    }

    /// Persist the settings if dirty and stable for the quiet period
    ///
    /// Returns true if the quiet period elapsed and the settings are now
    /// committed. The store is not touched when the record bytes already
    /// match what was last committed. On a failed write the change stays
    /// dirty and is retried after another quiet period.
    pub fn commit_if_quiet(&mut self, now_ms: u32) -> Result<bool, StoreError> {
        let Some(since) = self.dirty_since else {
            return Ok(false);
        };

        if now_ms.wrapping_sub(since) < SETTINGS_COMMIT_DELAY_MS {
            return Ok(false);
        }

        let bytes = self.current.encode();
        if self.committed != Some(bytes) {
            if let Err(e) = self.store.write(self.offset, &bytes) {
                self.dirty_since = Some(now_ms);
                return Err(e);
            }
            self.committed = Some(bytes);
            debug!("Settings committed: {}", self.current);
        }

        self.dirty_since = None;
        Ok(true)
    }

    /// Get access to the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}
