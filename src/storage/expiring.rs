// Idle-session eviction
// Author: Gabriel Demetrios Lafis

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::session::Session;
use super::{SessionStorage, StorageError};

/// Session storage that forgets sessions left idle longer than a
/// time-to-live. Every store or load counts as activity.
pub struct ExpiringStorage {
    backend: Box<dyn SessionStorage + Send + Sync>,
    last_access: Arc<RwLock<HashMap<String, Instant>>>,
    ttl: Option<Duration>,
}

impl ExpiringStorage {
    /// Wrap a backend; without a TTL nothing expires
    pub fn new<S>(backend: S) -> Self
    where
        S: SessionStorage + Send + Sync + 'static,
    {
        ExpiringStorage {
            backend: Box::new(backend),
            last_access: Arc::new(RwLock::new(HashMap::new())),
            ttl: None,
        }
    }

    /// Set the idle time-to-live
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Delete every session idle for at least the TTL, returning how many
    pub fn evict_expired(&self) -> Result<usize, StorageError> {
        let ttl = match self.ttl {
            Some(ttl) => ttl,
            None => return Ok(0),
        };

        let expired: Vec<String> = {
            let mut last_access = self.last_access.write().map_err(|_| StorageError::Lock("write"))?;
            let now = Instant::now();
            let expired: Vec<String> = last_access
                .iter()
                .filter(|(_, at)| now.duration_since(**at) >= ttl)
                .map(|(id, _)| id.clone())
                .collect();
            for id in &expired {
                last_access.remove(id);
            }
            expired
        };

        for id in &expired {
            match self.backend.delete(id) {
                Ok(()) | Err(StorageError::NotFound(_)) => {}
                Err(err) => return Err(err),
            }
            log::info!("Session {} expired", id);
        }

        Ok(expired.len())
    }

    fn touch(&self, id: &str) -> Result<(), StorageError> {
        let mut last_access = self.last_access.write().map_err(|_| StorageError::Lock("write"))?;

        last_access.insert(id.to_string(), Instant::now());
        Ok(())
    }
}

impl SessionStorage for ExpiringStorage {
    fn store(&self, id: &str, session: &Session) -> Result<(), StorageError> {
        self.evict_expired()?;
        self.backend.store(id, session)?;
        self.touch(id)
    }

    fn load(&self, id: &str) -> Result<Session, StorageError> {
        self.evict_expired()?;
        let session = self.backend.load(id)?;
        self.touch(id)?;
        Ok(session)
    }

    fn update(&self, id: &str, apply: &mut dyn FnMut(&mut Session)) -> Result<Session, StorageError> {
        self.evict_expired()?;
        let session = self.backend.update(id, apply)?;
        self.touch(id)?;
        Ok(session)
    }

    fn exists(&self, id: &str) -> Result<bool, StorageError> {
        self.evict_expired()?;
        self.backend.exists(id)
    }

    fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.backend.delete(id)?;

        let mut last_access = self.last_access.write().map_err(|_| StorageError::Lock("write"))?;
        last_access.remove(id);
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        self.evict_expired()?;
        self.backend.list()
    }
}
