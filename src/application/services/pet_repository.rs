use crate::application::interfaces::pet::PetService;
use crate::constants::KNOWN_BREEDS;
use crate::presentation::animal::{AnimalList, BreedFilter};
use crate::presentation::state::QueryOutcome;
use std::sync::Arc;
use tracing::debug;

/// Gateway turning service results into [`QueryOutcome`]s
pub struct PetRepository<S: PetService> {
    service: Arc<S>,
}

impl<S: PetService> PetRepository<S> {
    /// Creates a repository on top of a pet service
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }

    /// Lists animals for the breed filter
    pub async fn list_animals(&self, breed: &BreedFilter) -> QueryOutcome<AnimalList> {
        debug!("Listing animals for {}", breed);
        QueryOutcome::from_result(self.service.get_animals(breed).await)
    }

    /// Lists special needs animals
    pub async fn list_special_needs_animals(&self) -> QueryOutcome<AnimalList> {
        QueryOutcome::from_result(self.service.get_special_needs_animals().await)
    }

    /// Breeds offered as filters
    ///
    /// This is a fixed list, not a server query. The `All` sentinel comes first.
    pub fn list_known_breeds(&self) -> Vec<BreedFilter> {
        KNOWN_BREEDS.iter().map(|name| BreedFilter::from(*name)).collect()
    }
}
