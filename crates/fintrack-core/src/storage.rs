//! Blob-store abstraction the Ledger Store persists through.

use std::{collections::HashMap, sync::Mutex};

use crate::CoreError;

/// The six persisted collections and their storage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Accounts,
    Transactions,
    Categories,
    Goals,
    Bills,
    Settings,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Accounts,
        Collection::Transactions,
        Collection::Categories,
        Collection::Goals,
        Collection::Bills,
        Collection::Settings,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Collection::Accounts => "accounts",
            Collection::Transactions => "transactions",
            Collection::Categories => "categories",
            Collection::Goals => "goals",
            Collection::Bills => "bills",
            Collection::Settings => "settings",
        }
    }
}

/// Abstraction over key-value persistence for serialized collections.
///
/// Each collection is written as one self-contained blob under its own key.
/// Backends provide no durability guarantee beyond a successful `set`.
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&self, key: &str, blob: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

impl<T: BlobStore + ?Sized> BlobStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        self.as_ref().get(key)
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), CoreError> {
        self.as_ref().set(key, blob)
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.as_ref().remove(key)
    }
}

/// In-memory backend for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.blobs.lock().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| CoreError::Storage("blob map poisoned".into()))?;
        Ok(blobs.get(key).cloned())
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), CoreError> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| CoreError::Storage("blob map poisoned".into()))?;
        blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| CoreError::Storage("blob map poisoned".into()))?;
        blobs.remove(key);
        Ok(())
    }
}
