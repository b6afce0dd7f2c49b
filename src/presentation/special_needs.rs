/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! State holder behind the "dogs needing special care" strip

use crate::application::interfaces::pet::PetService;
use crate::application::services::pet_repository::PetRepository;
use crate::presentation::animal::AnimalList;
use crate::presentation::state::{QueryOutcome, publish};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// State holder behind the special needs strip
///
/// Issues its query on creation; must be created inside a tokio runtime.
pub struct SpecialNeedsViewModel<S: PetService + 'static> {
    repository: Arc<PetRepository<S>>,
    animals: Arc<watch::Sender<QueryOutcome<AnimalList>>>,
}

impl<S: PetService + 'static> SpecialNeedsViewModel<S> {
    /// Creates the view model and issues the special needs query
    pub fn new(repository: Arc<PetRepository<S>>) -> Self {
        let (animals, _) = watch::channel(QueryOutcome::InFlight);
        let view_model = Self {
            repository,
            animals: Arc::new(animals),
        };
        view_model.refresh();
        view_model
    }

    /// Issues the query again; the handle resolves once the outcome is published
    pub fn refresh(&self) -> JoinHandle<()> {
        let repository = self.repository.clone();
        let animals = self.animals.clone();
        tokio::spawn(async move {
            publish(&animals, repository.list_special_needs_animals()).await;
        })
    }

    /// Receiver of the special needs outcome
    pub fn state(&self) -> watch::Receiver<QueryOutcome<AnimalList>> {
        self.animals.subscribe()
    }
}
