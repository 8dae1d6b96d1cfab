/// File-backed data store
///
/// The whole state lives in one JSON document. Every operation reads the
/// file fresh; every mutation rewrites it completely. One `RwLock` per
/// `Database` guards the document: reads share it, and each mutation holds
/// the write side across load, mutate and save so that concurrent creates
/// cannot observe the same next id.

mod chirps;
mod document;
mod fs;
mod tokens;
mod users;

pub use document::{Chirp, Collection, Document, Sequences, SortOrder, User};
pub use tokens::Session;

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{AppError, StorageError};

pub struct Database {
    path: PathBuf,
    lock: RwLock<()>,
}

impl Database {
    /// Open the store at `path`, creating an empty document if the file is absent
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let db = Self {
            path: path.into(),
            lock: RwLock::new(()),
        };
        db.ensure_initialized()?;
        tracing::info!(path = %db.path.display(), "Database ready");
        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty document if the backing file does not exist yet
    pub fn ensure_initialized(&self) -> Result<(), AppError> {
        let _guard = self.write_lock()?;
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        tracing::info!(path = %self.path.display(), "Creating empty database file");
        self.write_document(&Document::default())
    }

    /// Replace the contents with an empty document
    pub fn reset(&self) -> Result<(), AppError> {
        let _guard = self.write_lock()?;
        tracing::warn!(path = %self.path.display(), "Wiping database");
        self.write_document(&Document::default())
    }

    /// Read the whole document under the shared lock
    pub fn load(&self) -> Result<Document, AppError> {
        let _guard = self.read_lock()?;
        self.read_document()
    }

    /// Overwrite the whole document under the exclusive lock
    pub fn save(&self, document: &Document) -> Result<(), AppError> {
        let _guard = self.write_lock()?;
        self.write_document(document)
    }

    /// Id the next record in `collection` would receive
    pub fn next_id(&self, collection: Collection) -> Result<u64, AppError> {
        Ok(self.load()?.next_id(collection))
    }

    /// Load, apply `mutate`, save; all under one exclusive lock.
    /// Nothing is written when `mutate` fails.
    pub(crate) fn update<T, F>(&self, mutate: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Document) -> Result<T, AppError>,
    {
        let _guard = self.write_lock()?;
        let mut document = self.read_document()?;
        let output = mutate(&mut document)?;
        self.write_document(&document)?;
        Ok(output)
    }

    fn read_document(&self) -> Result<Document, AppError> {
        let data = std::fs::read(&self.path).map_err(|e| {
            StorageError::Io(format!("reading {}: {}", self.path.display(), e))
        })?;

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Document::default());
        }

        serde_json::from_slice(&data).map_err(|e| {
            StorageError::Serialization(format!("parsing {}: {}", self.path.display(), e)).into()
        })
    }

    fn write_document(&self, document: &Document) -> Result<(), AppError> {
        let data = serde_json::to_vec(document)?;
        fs::write_atomically(&self.path, &data).map_err(|e| {
            StorageError::Io(format!("writing {}: {}", self.path.display(), e)).into()
        })
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<'_, ()>, AppError> {
        self.lock.read().map_err(|_| StorageError::LockPoisoned.into())
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<'_, ()>, AppError> {
        self.lock.write().map_err(|_| StorageError::LockPoisoned.into())
    }
}
