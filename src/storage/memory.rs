// Memory storage implementation
// Author: Gabriel Demetrios Lafis

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::session::Session;
use super::{SessionStorage, StorageError};

/// Memory storage for sessions
pub struct MemoryStorage {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl MemoryStorage {
    /// Create a new memory storage
    pub fn new() -> Self {
        MemoryStorage {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStorage for MemoryStorage {
    fn store(&self, id: &str, session: &Session) -> Result<(), StorageError> {
        let mut sessions = self.sessions.write().map_err(|_| StorageError::Lock("write"))?;

        sessions.insert(id.to_string(), session.clone());
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Session, StorageError> {
        let sessions = self.sessions.read().map_err(|_| StorageError::Lock("read"))?;

        sessions
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn update(&self, id: &str, apply: &mut dyn FnMut(&mut Session)) -> Result<Session, StorageError> {
        let mut sessions = self.sessions.write().map_err(|_| StorageError::Lock("write"))?;

        let session = sessions
            .get_mut(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        apply(session);
        Ok(session.clone())
    }

    fn exists(&self, id: &str) -> Result<bool, StorageError> {
        let sessions = self.sessions.read().map_err(|_| StorageError::Lock("read"))?;

        Ok(sessions.contains_key(id))
    }

    fn delete(&self, id: &str) -> Result<(), StorageError> {
        let mut sessions = self.sessions.write().map_err(|_| StorageError::Lock("write"))?;

        if sessions.remove(id).is_none() {
            return Err(StorageError::NotFound(id.to_string()));
        }

        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        let sessions = self.sessions.read().map_err(|_| StorageError::Lock("read"))?;

        Ok(sessions.keys().cloned().collect())
    }
}
