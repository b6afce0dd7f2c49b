/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/10/26
******************************************************************************/

//! Persistence of the bearer token
//!
//! [`EncryptedTokenStore`] keeps a small JSON key-value file whose values are sealed
//! with [`TokenCipher`]; the token lives under a single fixed key.
//! [`MemoryTokenStore`] keeps it in process memory only.

use crate::application::config::StorageConfig;
use crate::constants::{MASTER_KEY_FILE_NAME, TOKEN_FILE_NAME, TOKEN_KEY};
use crate::error::AppError;
use crate::model::auth::Token;
use crate::storage::crypto::TokenCipher;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Storage of the single current bearer token
///
/// Calls are synchronous: `save` returns only once the token is durable.
pub trait TokenStore: Send + Sync {
    /// Persists `token`, replacing any previous one
    fn save(&self, token: &Token) -> Result<(), AppError>;

    /// Returns the last saved token, or `None` when there is none
    fn get(&self) -> Result<Option<Token>, AppError>;

    /// Removes the stored token
    fn clear(&self) -> Result<(), AppError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    entries: BTreeMap<String, String>,
}

/// Token store backed by an encrypted key-value file
pub struct EncryptedTokenStore {
    path: PathBuf,
    cipher: TokenCipher,
    write_lock: Mutex<()>,
}

impl EncryptedTokenStore {
    /// Creates a store writing to `path` with the given cipher
    pub fn new(path: impl Into<PathBuf>, cipher: TokenCipher) -> Self {
        Self {
            path: path.into(),
            cipher,
            write_lock: Mutex::new(()),
        }
    }

    /// Opens the store described by the storage configuration
    ///
    /// Creates the storage directory if needed. The master key comes from the
    /// configuration when set, otherwise from a key file in the storage directory.
    pub fn open(config: &StorageConfig) -> Result<Self, AppError> {
        fs::create_dir_all(&config.directory)?;

        let cipher = match &config.master_key {
            Some(hex_key) => TokenCipher::from_hex(hex_key)?,
            None => TokenCipher::load_or_create(&config.directory.join(MASTER_KEY_FILE_NAME))?,
        };

        Ok(Self::new(config.directory.join(TOKEN_FILE_NAME), cipher))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seals and stores `value` under `key`
    pub fn put(&self, key: &str, value: &[u8]) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = self.read_file()?;
        let envelope = self.cipher.seal(value, key.as_bytes())?;
        file.entries.insert(key.to_string(), hex::encode(envelope));
        self.write_file(&file)
    }

    /// Returns the opened value stored under `key`
    ///
    /// An entry that can no longer be opened (for instance after the master key
    /// changed) is reported as absent.
    pub fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        let file = self.read_file()?;
        let Some(encoded) = file.entries.get(key) else {
            return Ok(None);
        };

        let opened = hex::decode(encoded)
            .map_err(AppError::from)
            .and_then(|envelope| self.cipher.open(&envelope, key.as_bytes()));

        match opened {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Discarding unreadable entry {}: {}", key, e);
                Ok(None)
            }
        }
    }

    /// Removes the entry stored under `key`
    pub fn remove(&self, key: &str) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = self.read_file()?;
        if file.entries.remove(key).is_some() {
            self.write_file(&file)?;
        }
        Ok(())
    }

    /// Reads the backing file; an unparseable file is treated as empty and gets
    /// overwritten by the next write
    fn read_file(&self) -> Result<StoreFile, AppError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoreFile::default()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(file) => Ok(file),
            Err(e) => {
                warn!("Ignoring unreadable store file {}: {}", self.path.display(), e);
                Ok(StoreFile::default())
            }
        }
    }

    fn write_file(&self, file: &StoreFile) -> Result<(), AppError> {
        let bytes = serde_json::to_vec_pretty(file)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| AppError::Io(e.error))?;
        debug!("Wrote {} entries to {}", file.entries.len(), self.path.display());
        Ok(())
    }
}

impl TokenStore for EncryptedTokenStore {
    fn save(&self, token: &Token) -> Result<(), AppError> {
        let value = serde_json::to_vec(token)?;
        self.put(TOKEN_KEY, &value)
    }

    fn get(&self) -> Result<Option<Token>, AppError> {
        match self.fetch(TOKEN_KEY)? {
            Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
            None => Ok(None),
        }
    }

    fn clear(&self) -> Result<(), AppError> {
        self.remove(TOKEN_KEY)
    }
}

/// Token store that keeps the token in memory
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<Token>>,
}

impl MemoryTokenStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `token`
    pub fn with_token(token: Token) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &Token) -> Result<(), AppError> {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token.clone());
        Ok(())
    }

    fn get(&self) -> Result<Option<Token>, AppError> {
        let guard = self.token.read().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn clear(&self) -> Result<(), AppError> {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
        Ok(())
    }
}
