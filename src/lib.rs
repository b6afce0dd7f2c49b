//! # adopty-client
//!
//! A client for the Petfinder adoption listings API.
//!
//! It lists adoptable dogs, filters them by breed and exposes the animals flagged as
//! having special needs. Authentication uses the OAuth2 client-credentials grant: the
//! bearer token is kept in an encrypted local store, attached to every request and
//! refreshed transparently when the API rejects it.
//!
//! ## Layers
//!
//! - [`storage`]: encrypted persistence of the bearer token
//! - [`application::auth`]: request decoration and token exchange
//! - [`model::http`]: HTTP client retrying once after a refresh
//! - [`application::client`] and [`application::services`]: typed queries and their
//!   tri-state outcomes
//! - [`presentation`]: observable state holders for a front end
//!
//! ## Example
//!
//! ```ignore
//! use adopty_client::prelude::*;
//!
//! setup_logger();
//! let client = Arc::new(Client::connect(Config::new()).await?);
//! let repository = Arc::new(PetRepository::new(client));
//! let home = HomeViewModel::new(repository.clone());
//! home.on_breed_selected(BreedFilter::from("Beagle"));
//! ```

/// Application layer: authentication, configuration, client and services
pub mod application;
/// Global constants
pub mod constants;
/// Error type
pub mod error;
/// Wire models and the HTTP client
pub mod model;
/// Convenience re-exports
pub mod prelude;
/// Models and state holders consumed by a front end
pub mod presentation;
/// Encrypted token persistence
pub mod storage;
/// Environment and logging helpers
pub mod utils;

pub use application::config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
