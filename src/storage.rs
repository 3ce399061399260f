//! Persistent client storage and the typed session store on top of it.
//!
//! Values are JSON strings under fixed keys, last write wins.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::models::{AuthPayload, Organisation, Project, Session, Token};

pub const AUTH_KEY: &str = "CONVOY_AUTH";
pub const AUTH_TOKENS_KEY: &str = "CONVOY_AUTH_TOKENS";
pub const PROJECT_KEY: &str = "CONVOY_PROJECT";
pub const ORGANISATIONS_KEY: &str = "CONVOY_ORGANISATIONS";

const ALL_KEYS: [&str; 4] = [AUTH_KEY, AUTH_TOKENS_KEY, PROJECT_KEY, ORGANISATIONS_KEY];

/// String key-value storage that outlives a single run.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

// ── In-memory backend ────────────────────────────────────────

#[derive(Default)]
pub struct MemoryStorage {
    entries: DashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// ── File backend ─────────────────────────────────────────────

/// Keeps every key in one JSON object file, rewritten on each write.
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        // poisoning never leaves a half-written file: writes go through fs::write
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.guard();
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.guard();
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.guard();
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

// ── Session store ────────────────────────────────────────────

/// Typed access to the session, token and active-project blobs.
///
/// Holds no state of its own; clones share the same backend.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Raw access for callers that need the exact stored blob.
    pub fn raw(&self, key: &str) -> Result<Option<String>> {
        self.storage.get(key)
    }

    pub fn save_session(&self, session: &Session) -> Result<()> {
        self.put(AUTH_KEY, session)?;
        debug!(user = %session.uid, "session saved");
        Ok(())
    }

    /// Persist a login payload exactly as the server sent it.
    pub fn save_auth(&self, payload: &AuthPayload) -> Result<()> {
        self.storage.set(AUTH_KEY, &payload.raw.to_string())?;
        debug!(user = %payload.session.uid, "session saved");
        Ok(())
    }

    /// Persist the payload and its token blob together. When the token
    /// write fails the session write is rolled back.
    pub fn save_auth_with_tokens(&self, payload: &AuthPayload) -> Result<()> {
        let session = payload.raw.to_string();
        let tokens = payload.raw_token().to_string();

        self.storage.set(AUTH_KEY, &session)?;
        if let Err(e) = self.storage.set(AUTH_TOKENS_KEY, &tokens) {
            if let Err(rollback) = self.storage.remove(AUTH_KEY) {
                warn!(error = %rollback, "failed to roll back session write");
            }
            return Err(e);
        }
        debug!(user = %payload.session.uid, "session and tokens saved");
        Ok(())
    }

    pub fn load_session(&self) -> Option<Session> {
        self.read(AUTH_KEY)
    }

    pub fn save_tokens(&self, token: &Token) -> Result<()> {
        self.put(AUTH_TOKENS_KEY, token)
    }

    pub fn load_tokens(&self) -> Option<Token> {
        self.read(AUTH_TOKENS_KEY)
    }

    /// Bearer token for API calls, preferring the standalone token blob.
    pub fn access_token(&self) -> Option<String> {
        self.load_tokens()
            .or_else(|| self.load_session().map(|s| s.token))
            .map(|t| t.access_token)
            .filter(|t| !t.is_empty())
    }

    pub fn save_project(&self, project: &Project) -> Result<()> {
        self.put(PROJECT_KEY, project)
    }

    pub fn load_project(&self) -> Option<Project> {
        self.read(PROJECT_KEY)
    }

    pub fn active_project_id(&self) -> Option<String> {
        self.load_project().map(|p| p.uid)
    }

    pub fn save_organisations(&self, organisations: &[Organisation]) -> Result<()> {
        self.put(ORGANISATIONS_KEY, organisations)
    }

    pub fn load_organisations(&self) -> Vec<Organisation> {
        self.read(ORGANISATIONS_KEY).unwrap_or_default()
    }

    /// Drop everything the dashboard persisted.
    pub fn clear(&self) -> Result<()> {
        for key in ALL_KEYS {
            self.storage.remove(key)?;
        }
        debug!("session store cleared");
        Ok(())
    }

    fn put<T: serde::Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.storage.set(key, &json)
    }

    fn read<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "failed to read client storage");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "discarding unreadable storage entry");
                None
            }
        }
    }
}
