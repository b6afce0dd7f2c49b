/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/10/26
******************************************************************************/

//! At-rest encryption for locally persisted values
//!
//! Values are sealed with XChaCha20-Poly1305. An envelope is laid out as
//! `version (1 byte) || nonce (24 bytes) || ciphertext+tag`, and the caller supplied
//! associated data (the entry key) must match on open.

use crate::error::AppError;
use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use rand::RngCore;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::{debug, info};

/// Length of the master key in bytes
pub const KEY_SIZE: usize = 32;
const NONCE_SIZE: usize = 24;
const TAG_SIZE: usize = 16;
const ENVELOPE_VERSION: u8 = 1;
const HEADER_SIZE: usize = 1 + NONCE_SIZE;

/// Symmetric cipher used to seal stored entries
pub struct TokenCipher {
    cipher: XChaCha20Poly1305,
}

impl TokenCipher {
    /// Creates a cipher from raw key bytes
    ///
    /// # Returns
    /// * `Err(AppError::Crypto)` - If the key is not exactly 32 bytes
    pub fn from_key(key: &[u8]) -> Result<Self, AppError> {
        if key.len() != KEY_SIZE {
            return Err(AppError::Crypto(format!(
                "invalid key length: expected {KEY_SIZE}, got {}",
                key.len()
            )));
        }
        let cipher = XChaCha20Poly1305::new_from_slice(key)
            .map_err(|_| AppError::Crypto("invalid key".to_string()))?;
        Ok(Self { cipher })
    }

    /// Creates a cipher from a hex encoded key
    pub fn from_hex(hex_key: &str) -> Result<Self, AppError> {
        let key = hex::decode(hex_key.trim())?;
        Self::from_key(&key)
    }

    /// Generates a fresh random master key
    #[must_use]
    pub fn generate_key() -> [u8; KEY_SIZE] {
        let mut key = [0u8; KEY_SIZE];
        rand::rng().fill_bytes(&mut key);
        key
    }

    /// Loads the hex encoded key stored at `path`, generating and writing one if missing
    pub fn load_or_create(path: &Path) -> Result<Self, AppError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!("Loaded master key from {}", path.display());
                Self::from_hex(&contents)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let key = Self::generate_key();
                write_private(path, hex::encode(key).as_bytes())?;
                info!("Generated new master key at {}", path.display());
                Self::from_key(&key)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Encrypts `plaintext`, binding it to `aad`
    pub fn seal(&self, plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, AppError> {
        let mut nonce = [0u8; NONCE_SIZE];
        rand::rng().fill_bytes(&mut nonce);

        let ciphertext = self
            .cipher
            .encrypt(
                XNonce::from_slice(&nonce),
                Payload {
                    msg: plaintext,
                    aad,
                },
            )
            .map_err(|_| AppError::Crypto("encryption failed".to_string()))?;

        let mut envelope = Vec::with_capacity(HEADER_SIZE + ciphertext.len());
        envelope.push(ENVELOPE_VERSION);
        envelope.extend_from_slice(&nonce);
        envelope.extend_from_slice(&ciphertext);
        Ok(envelope)
    }

    /// Decrypts an envelope produced by [`TokenCipher::seal`] with the same `aad`
    pub fn open(&self, envelope: &[u8], aad: &[u8]) -> Result<Vec<u8>, AppError> {
        if envelope.len() < HEADER_SIZE + TAG_SIZE {
            return Err(AppError::Crypto("malformed envelope".to_string()));
        }
        if envelope[0] != ENVELOPE_VERSION {
            return Err(AppError::Crypto(format!(
                "unsupported envelope version {}",
                envelope[0]
            )));
        }

        let nonce = XNonce::from_slice(&envelope[1..HEADER_SIZE]);
        self.cipher
            .decrypt(
                nonce,
                Payload {
                    msg: &envelope[HEADER_SIZE..],
                    aad,
                },
            )
            .map_err(|_| AppError::Crypto("authentication failed".to_string()))
    }
}

/// Writes `contents` to `path`, readable by the owner only on unix
fn write_private(path: &Path, contents: &[u8]) -> Result<(), AppError> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    Ok(())
}
