/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/10/26
******************************************************************************/

use crate::application::auth::Auth;
use crate::application::config::Config;
use crate::constants::USER_AGENT;
use crate::error::AppError;
use crate::model::auth::Token;
use crate::storage::token_store::{EncryptedTokenStore, TokenStore};
use reqwest::Client as HttpInternalClient;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// HTTP client for the Petfinder API with transparent token refresh
///
/// Every request carries the stored bearer token when there is one. A request
/// rejected with `401 Unauthorized` triggers one client-credentials exchange and is
/// replayed once with the new token; if the exchange fails the original
/// `Unauthorized` error is returned.
pub struct HttpClient {
    auth: Arc<Auth>,
    http_client: HttpInternalClient,
    config: Arc<Config>,
}

impl HttpClient {
    /// Creates a new client and makes sure a token is available
    ///
    /// The token is persisted in the encrypted store described by `config.storage`.
    ///
    /// # Returns
    /// * `Ok(HttpClient)` - Client ready to use
    /// * `Err(AppError)` - If the store cannot be opened or no token can be obtained
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let store = Arc::new(EncryptedTokenStore::open(&config.storage)?);
        let client = Self::with_store(config, store)?;
        client.auth.login().await?;
        Ok(client)
    }

    /// Creates a new client without any network call
    ///
    /// A token will be obtained the first time the API rejects a request.
    pub fn new_lazy(config: Config) -> Result<Self, AppError> {
        let store = Arc::new(EncryptedTokenStore::open(&config.storage)?);
        Self::with_store(config, store)
    }

    /// Creates a new client on top of an explicit token store
    pub fn with_store(config: Config, store: Arc<dyn TokenStore>) -> Result<Self, AppError> {
        let config = Arc::new(config);
        let http_client = HttpInternalClient::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.rest_api.timeout))
            .build()?;
        let auth = Arc::new(Auth::new(config.clone(), store)?);

        Ok(Self {
            auth,
            http_client,
            config,
        })
    }

    /// Makes a GET request with query parameters
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, AppError> {
        self.request(Method::GET, path, query, None::<()>).await
    }

    /// Makes a request, refreshing the token and retrying once on `401`
    pub async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<B>,
    ) -> Result<T, AppError> {
        let url = self.config.url_for(path);

        match self
            .request_internal(method.clone(), &url, query, &body, None)
            .await
        {
            Ok(response) => self.parse_response(response).await,
            Err(AppError::Unauthorized) => {
                warn!("Request to {} unauthorized, refreshing token and retrying", url);
                let token = match self.auth.refresh_token().await {
                    Ok(token) => token,
                    Err(e) => {
                        warn!("Token refresh failed: {}", e);
                        return Err(AppError::Unauthorized);
                    }
                };
                let response = self
                    .request_internal(method, &url, query, &body, Some(&token))
                    .await?;
                self.parse_response(response).await
            }
            Err(e) => Err(e),
        }
    }

    /// Builds and sends one request
    ///
    /// With `token` set the header is taken from it, otherwise the stored token is used.
    async fn request_internal<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
        body: &Option<B>,
        token: Option<&Token>,
    ) -> Result<Response, AppError> {
        let mut request = self
            .http_client
            .request(method, url)
            .header(ACCEPT, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }

        request = match token {
            Some(token) => request.header(AUTHORIZATION, token.authorization_header()),
            None => self.auth.authorize(request),
        };

        if let Some(b) = body {
            request = request.json(b);
        }

        make_http_request(request).await
    }

    /// Parses a response into the desired type
    async fn parse_response<T: DeserializeOwned>(&self, response: Response) -> Result<T, AppError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            error!("Failed to parse response body: {}", e);
            AppError::Deserialization(e.to_string())
        })
    }

    /// Gets Auth reference
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Gets the configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Sends a prepared request and classifies the response status
///
/// # Returns
/// * `Ok(Response)` - For any 2xx status
/// * `Err(AppError::Unauthorized)` - For `401`
/// * `Err(AppError::NotFound)` - For `404`
/// * `Err(AppError::Unexpected)` - For any other status
pub async fn make_http_request(request: RequestBuilder) -> Result<Response, AppError> {
    let response = request.send().await?;
    let status = response.status();
    debug!("{} {}", status, response.url());

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    match status {
        StatusCode::UNAUTHORIZED => {
            warn!("Unauthorized: {}", body);
            Err(AppError::Unauthorized)
        }
        StatusCode::NOT_FOUND => {
            error!("Not found: {}", body);
            Err(AppError::NotFound)
        }
        _ => {
            error!("Request failed with status {}: {}", status, body);
            Err(AppError::Unexpected(status))
        }
    }
}
