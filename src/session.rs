//! The single stored session slot.
//!
//! At most one session exists at a time. It is kept as a serialized
//! `{"id": ..., "role": ...}` value behind a [`SessionSlot`], so the
//! server can use a file on disk while tests use memory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::Result;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub role: Role,
}

impl Session {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Raw storage for one string value.
pub trait SessionSlot: Send + Sync {
    fn read(&self) -> Option<String>;
    fn write(&self, value: &str) -> Result<()>;
    fn remove(&self) -> Result<()>;
}

/// Keeps the session as a JSON file. A missing file is an empty slot.
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionSlot for FileSlot {
    fn read(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("could not read session file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn write(&self, value: &str) -> Result<()> {
        fs::write(&self.path, value)?;
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct MemorySlot {
    value: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the slot with arbitrary contents, valid or not.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }
}

impl SessionSlot for MemorySlot {
    fn read(&self) -> Option<String> {
        self.value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn write(&self, value: &str) -> Result<()> {
        *self
            .value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(value.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        self.value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        Ok(())
    }
}

pub struct SessionStore {
    slot: Box<dyn SessionSlot>,
}

impl SessionStore {
    pub fn new(slot: impl SessionSlot + 'static) -> Self {
        Self {
            slot: Box::new(slot),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemorySlot::new())
    }

    /// Returns the stored session. Anything that is not a well-formed
    /// session with a non-empty id reads as "no session".
    pub fn get_session(&self) -> Option<Session> {
        let raw = self.slot.read()?;
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) if !session.id.is_empty() => Some(session),
            Ok(_) => {
                log::warn!("stored session has an empty id, ignoring it");
                None
            }
            Err(e) => {
                log::warn!("stored session is malformed, ignoring it: {}", e);
                None
            }
        }
    }

    pub fn set_session(&self, session: &Session) -> Result<()> {
        let raw = serde_json::to_string(session)?;
        self.slot.write(&raw)
    }

    pub fn clear_session(&self) -> Result<()> {
        self.slot.remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_session_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!(
            "dashboard-{}-{}-{}.json",
            name,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn empty_store_has_no_session() {
        let store = SessionStore::in_memory();
        assert_eq!(store.get_session(), None);
    }

    #[test]
    fn set_then_get_returns_session() {
        let store = SessionStore::in_memory();
        let session = Session::new("11391", Role::Student);
        store.set_session(&session).unwrap();
        assert_eq!(store.get_session(), Some(session));
    }

    #[test]
    fn set_overwrites_previous_session() {
        let store = SessionStore::in_memory();
        store.set_session(&Session::new("11391", Role::Student)).unwrap();
        store.set_session(&Session::new("admin", Role::Admin)).unwrap();
        let session = store.get_session().unwrap();
        assert_eq!(session.id, "admin");
        assert!(session.is_admin());
    }

    #[test]
    fn malformed_value_reads_as_absent() {
        let store = SessionStore::new(MemorySlot::with_value("{not json"));
        assert_eq!(store.get_session(), None);
    }

    #[test]
    fn unknown_role_reads_as_absent() {
        let slot = MemorySlot::with_value(r#"{"id":"x","role":"tutor"}"#);
        let store = SessionStore::new(slot);
        assert_eq!(store.get_session(), None);
    }

    #[test]
    fn empty_id_reads_as_absent() {
        let slot = MemorySlot::with_value(r#"{"id":"","role":"student"}"#);
        let store = SessionStore::new(slot);
        assert_eq!(store.get_session(), None);
    }

    #[test]
    fn role_is_stored_lowercase() {
        let slot = MemorySlot::new();
        let raw = serde_json::to_string(&Session::new("x", Role::Admin)).unwrap();
        slot.write(&raw).unwrap();
        assert_eq!(slot.read().unwrap(), r#"{"id":"x","role":"admin"}"#);
    }

    #[test]
    fn clear_is_idempotent() {
        let store = SessionStore::in_memory();
        store.set_session(&Session::new("x", Role::Student)).unwrap();
        store.clear_session().unwrap();
        store.clear_session().unwrap();
        assert_eq!(store.get_session(), None);
    }

    #[test]
    fn file_slot_round_trips_and_clears() {
        let path = temp_session_path("file-slot");
        let store = SessionStore::new(FileSlot::new(path.clone()));
        assert_eq!(store.get_session(), None);

        let session = Session::new("10042", Role::Student);
        store.set_session(&session).unwrap();
        assert_eq!(store.get_session(), Some(session));

        store.clear_session().unwrap();
        assert!(!path.exists());
        store.clear_session().unwrap();
    }

    #[test]
    fn file_slot_with_garbage_reads_as_absent() {
        let path = temp_session_path("garbage");
        fs::write(&path, "{not json").unwrap();
        let store = SessionStore::new(FileSlot::new(path.clone()));
        assert_eq!(store.get_session(), None);
        fs::remove_file(&path).unwrap();
    }
}
