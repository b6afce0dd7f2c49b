/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # Adopty Client Prelude
//!
//! Brings the commonly used types of the library into scope.
//!
//! ```rust
//! use adopty_client::prelude::*;
//!
//! let filter = BreedFilter::from("Beagle");
//! assert_eq!(filter.query_value(), Some("Beagle"));
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Configuration for the client
pub use crate::config::{Config, Credentials, RestApiConfig, StorageConfig};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type for the library
pub use crate::error::AppError;

// ============================================================================
// AUTHENTICATION AND TRANSPORT
// ============================================================================

/// Authentication manager
pub use crate::application::auth::Auth;

/// Token models
pub use crate::model::auth::Token;

/// HTTP client with transparent token refresh
pub use crate::model::http::HttpClient;

/// Token storage
pub use crate::storage::{EncryptedTokenStore, MemoryTokenStore, TokenCipher, TokenStore};

// ============================================================================
// SERVICES
// ============================================================================

/// Pet service trait and its implementation
pub use crate::application::client::Client;
pub use crate::application::interfaces::pet::PetService;

/// Gateway producing query outcomes
pub use crate::application::services::PetRepository;

// ============================================================================
// PRESENTATION LAYER
// ============================================================================

pub use crate::presentation::{
    Animal, AnimalList, BreedFilter, Breeds, HomeViewModel, HomeViewState, Photo, QueryOutcome,
    SpecialNeedsViewModel, is_loading, publish,
};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;
pub use tokio;
pub use tracing::{debug, error, info, warn};
