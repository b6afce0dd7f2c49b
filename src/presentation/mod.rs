/// Animal, breed and photo models
pub mod animal;
/// Home screen state holder
pub mod home;
/// Special needs strip state holder
pub mod special_needs;
/// Tri-state query outcome and its publication
pub mod state;

pub use animal::{Animal, AnimalList, BreedFilter, Breeds, Photo};
pub use home::{HomeViewModel, HomeViewState, is_loading};
pub use special_needs::SpecialNeedsViewModel;
pub use state::{QueryOutcome, publish};
