use crate::error::AppError;
use crate::presentation::animal::{AnimalList, BreedFilter};
use async_trait::async_trait;

/// Interface for the pet listings service
#[async_trait]
pub trait PetService: Send + Sync {
    /// Lists adoptable dogs, restricted to one breed unless the filter is `All`
    async fn get_animals(&self, breed: &BreedFilter) -> Result<AnimalList, AppError>;

    /// Lists adoptable dogs flagged as having special needs
    async fn get_special_needs_animals(&self) -> Result<AnimalList, AppError>;
}
