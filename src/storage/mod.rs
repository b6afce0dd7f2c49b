/// At-rest encryption of persisted values
pub mod crypto;
/// Bearer token persistence
pub mod token_store;

pub use crypto::TokenCipher;
pub use token_store::{EncryptedTokenStore, MemoryTokenStore, TokenStore};
