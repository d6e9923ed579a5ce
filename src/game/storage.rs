// Roster persistence boundary
//
// The on-disk format belongs to the host; the core only signals when to load
// and when to save.

use super::characters::Roster;

/// Persistence errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Collaborator that persists the roster
pub trait RosterStore {
    /// Load the roster stored under `key`, `None` when nothing was saved yet
    fn load(&mut self, key: &str) -> Result<Option<Roster>, StoreError>;

    /// Save the roster under `key`
    fn save(&mut self, key: &str, roster: &Roster) -> Result<(), StoreError>;
}

/// Store keeping snapshots in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Option<(String, Roster)>,
    save_count: usize,
    offline: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `roster` already stored under `key`
    pub fn with_roster(key: &str, roster: Roster) -> Self {
        Self {
            saved: Some((key.to_string(), roster)),
            ..Self::default()
        }
    }

    /// Make every call fail, simulating a host that can't persist
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Last saved snapshot
    pub fn snapshot(&self) -> Option<&Roster> {
        self.saved.as_ref().map(|(_, roster)| roster)
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline {
            Err(StoreError::Unavailable("memory store is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl RosterStore for MemoryStore {
    fn load(&mut self, key: &str) -> Result<Option<Roster>, StoreError> {
        self.check_online()?;
        Ok(self
            .saved
            .as_ref()
            .filter(|(saved_key, _)| saved_key == key)
            .map(|(_, roster)| roster.clone()))
    }

    fn save(&mut self, key: &str, roster: &Roster) -> Result<(), StoreError> {
        self.check_online()?;
        self.saved = Some((key.to_string(), roster.clone()));
        self.save_count += 1;
        Ok(())
    }
}
