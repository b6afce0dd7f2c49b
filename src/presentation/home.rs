/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! State holder behind the home screen
//!
//! Holds the selected breed, the outcome of the animal query for it and the animal
//! picked for the detail view. Each input lives in its own watch channel; a
//! background task combines them into a single [`HomeViewState`].

use crate::application::interfaces::pet::PetService;
use crate::application::services::pet_repository::PetRepository;
use crate::constants::DEFAULT_BREED;
use crate::presentation::animal::{Animal, AnimalList, BreedFilter};
use crate::presentation::state::{QueryOutcome, publish};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Aggregate state rendered by the home screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeViewState {
    /// Outcome of the latest completed or in-flight animal query
    pub animals: QueryOutcome<AnimalList>,
    /// Breeds offered as tabs
    pub breeds: Vec<BreedFilter>,
    /// Currently selected breed
    pub selected_breed: BreedFilter,
}

/// Home screen state holder
///
/// Must be created inside a tokio runtime. Queries are never cancelled: selecting
/// breeds quickly can let an older, slower query overwrite a newer one.
pub struct HomeViewModel<S: PetService + 'static> {
    repository: Arc<PetRepository<S>>,
    selected_breed: watch::Sender<BreedFilter>,
    animals: Arc<watch::Sender<QueryOutcome<AnimalList>>>,
    selected_animal: watch::Sender<Option<Animal>>,
    state: watch::Receiver<HomeViewState>,
    combiner: JoinHandle<()>,
}

impl<S: PetService + 'static> HomeViewModel<S> {
    /// Creates the view model and issues the query for the default breed
    pub fn new(repository: Arc<PetRepository<S>>) -> Self {
        let breeds = repository.list_known_breeds();
        let initial_breed = BreedFilter::from(DEFAULT_BREED);

        let (selected_breed, breed_rx) = watch::channel(initial_breed.clone());
        let (animals, animals_rx) = watch::channel(QueryOutcome::InFlight);
        let (selected_animal, _) = watch::channel(None);
        let (state_tx, state) = watch::channel(HomeViewState {
            animals: QueryOutcome::InFlight,
            breeds: breeds.clone(),
            selected_breed: initial_breed.clone(),
        });

        let combiner = tokio::spawn(combine(animals_rx, breed_rx, breeds, state_tx));

        let view_model = Self {
            repository,
            selected_breed,
            animals: Arc::new(animals),
            selected_animal,
            state,
            combiner,
        };
        view_model.on_breed_selected(initial_breed);
        view_model
    }

    /// Selects a breed and issues the matching query
    ///
    /// The returned handle resolves once the outcome has been published.
    pub fn on_breed_selected(&self, breed: BreedFilter) -> JoinHandle<()> {
        info!("Breed selected: {}", breed);
        self.selected_breed.send_replace(breed.clone());

        let repository = self.repository.clone();
        let animals = self.animals.clone();
        tokio::spawn(async move {
            publish(&animals, repository.list_animals(&breed)).await;
            debug!("Published animals for {}", breed);
        })
    }

    /// Remembers the animal opened in the detail view
    pub fn on_animal_selected(&self, animal: Animal) {
        debug!("Animal selected: {} ({})", animal.name, animal.id);
        self.selected_animal.send_replace(Some(animal));
    }

    /// Receiver of the aggregate screen state
    pub fn state(&self) -> watch::Receiver<HomeViewState> {
        self.state.clone()
    }

    /// Receiver of the animal picked for the detail view
    pub fn selected_animal(&self) -> watch::Receiver<Option<Animal>> {
        self.selected_animal.subscribe()
    }

    /// Latest animal query outcome
    pub fn animals(&self) -> QueryOutcome<AnimalList> {
        self.animals.borrow().clone()
    }
}

impl<S: PetService + 'static> Drop for HomeViewModel<S> {
    fn drop(&mut self) {
        self.combiner.abort();
    }
}

/// Recomputes the aggregate state whenever one of its inputs changes
async fn combine(
    mut animals: watch::Receiver<QueryOutcome<AnimalList>>,
    mut selected_breed: watch::Receiver<BreedFilter>,
    breeds: Vec<BreedFilter>,
    state: watch::Sender<HomeViewState>,
) {
    loop {
        let next = HomeViewState {
            animals: animals.borrow_and_update().clone(),
            breeds: breeds.clone(),
            selected_breed: selected_breed.borrow_and_update().clone(),
        };
        state.send_replace(next);

        let changed = tokio::select! {
            r = animals.changed() => r,
            r = selected_breed.changed() => r,
        };
        if changed.is_err() {
            break;
        }
    }
}

/// Whether either screen section is still loading
#[must_use]
pub fn is_loading(home: &HomeViewState, special_needs: &QueryOutcome<AnimalList>) -> bool {
    home.animals.is_loading() || special_needs.is_loading()
}
