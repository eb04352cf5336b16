// Storage module for session state
// Author: Gabriel Demetrios Lafis

mod expiring;
mod memory;

pub use expiring::*;
pub use memory::*;

use rand::Rng;
use thiserror::Error;

use crate::session::Session;

/// Callback type for `SessionStorage::update` (aliased so `automock` can mock it)
pub type SessionUpdateFn<'a> = dyn FnMut(&mut Session) + 'a;

/// Represents a session store
#[cfg_attr(test, mockall::automock)]
pub trait SessionStorage {
    /// Store a session under an id, replacing any previous state
    fn store(&self, id: &str, session: &Session) -> Result<(), StorageError>;

    /// Load a session
    fn load(&self, id: &str) -> Result<Session, StorageError>;

    /// Modify a stored session in place and return the new state.
    ///
    /// No other change to the same session can interleave with `apply`.
    fn update<'a>(&self, id: &str, apply: &'a mut SessionUpdateFn<'a>) -> Result<Session, StorageError>;

    /// Check if a session exists
    fn exists(&self, id: &str) -> Result<bool, StorageError>;

    /// Delete a session
    fn delete(&self, id: &str) -> Result<(), StorageError>;

    /// List all session ids
    fn list(&self) -> Result<Vec<String>, StorageError>;
}

/// Generate a random 128-bit session id as lowercase hex
pub fn new_session_id() -> String {
    format!("{:032x}", rand::thread_rng().gen::<u128>())
}

/// Represents an error in the storage module
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Session '{0}' not found")]
    NotFound(String),

    #[error("Failed to acquire {0} lock")]
    Lock(&'static str),
}
