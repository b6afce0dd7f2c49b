/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/10/26
******************************************************************************/
use crate::application::config::Config;
use crate::application::interfaces::pet::PetService;
use crate::constants::{ANIMAL_TYPE, ANIMALS_PATH};
use crate::error::AppError;
use crate::model::http::HttpClient;
use crate::presentation::animal::{AnimalList, BreedFilter};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Petfinder client implementing [`PetService`]
pub struct Client {
    http_client: Arc<HttpClient>,
}

impl Client {
    /// Wraps an existing HTTP client
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }

    /// Builds the HTTP client from `config` and makes sure a token is available
    pub async fn connect(config: Config) -> Result<Self, AppError> {
        let http_client = HttpClient::new(config).await?;
        Ok(Self::new(Arc::new(http_client)))
    }

    /// Gets the underlying HTTP client
    pub fn http_client(&self) -> &HttpClient {
        &self.http_client
    }
}

#[async_trait]
impl PetService for Client {
    async fn get_animals(&self, breed: &BreedFilter) -> Result<AnimalList, AppError> {
        info!("Getting animals for breed: {}", breed);

        let mut query = vec![("type", ANIMAL_TYPE)];
        if let Some(name) = breed.query_value() {
            query.push(("breed", name));
        }

        let result: AnimalList = self.http_client.get(ANIMALS_PATH, &query).await?;
        debug!("Animals obtained: {} animals", result.len());
        Ok(result)
    }

    async fn get_special_needs_animals(&self) -> Result<AnimalList, AppError> {
        info!("Getting special needs animals");

        let query = [("type", ANIMAL_TYPE), ("special_needs", "true")];
        let result: AnimalList = self.http_client.get(ANIMALS_PATH, &query).await?;
        debug!("Special needs animals obtained: {} animals", result.len());
        Ok(result)
    }
}
