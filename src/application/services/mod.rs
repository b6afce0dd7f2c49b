/// Module containing the pet data gateway
pub mod pet_repository;

pub use pet_repository::*;
