/// Token decoration and client-credentials exchange
pub mod auth;
/// Petfinder client implementing the service interfaces
pub mod client;
/// Application configuration module
pub mod config;
/// Service interfaces
pub mod interfaces;
/// Services built on top of the interfaces
pub mod services;
