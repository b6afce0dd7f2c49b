/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/10/26
******************************************************************************/

//! Authentication for the Petfinder API
//!
//! This module provides:
//! - The request decorator attaching the stored bearer token
//! - The client-credentials exchange used to obtain and refresh the token
//!
//! Validity of a token is discovered reactively: the HTTP client calls
//! [`Auth::refresh_token`] when a request comes back `401 Unauthorized`.

use crate::application::config::Config;
use crate::constants::{TOKEN_PATH, USER_AGENT};
use crate::error::AppError;
use crate::model::auth::{ClientCredentialsRequest, Token, TokenResponse};
use crate::storage::token_store::TokenStore;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Authentication manager for the Petfinder API
///
/// Holds the token store and performs token exchanges. Concurrent refreshes are not
/// coordinated: two requests rejected at the same time each run their own exchange.
pub struct Auth {
    config: Arc<Config>,
    client: Client,
    store: Arc<dyn TokenStore>,
}

impl Auth {
    /// Creates a new Auth instance
    ///
    /// # Arguments
    /// * `config` - Configuration containing credentials and API settings
    /// * `store` - Where the bearer token is persisted
    pub fn new(config: Arc<Config>, store: Arc<dyn TokenStore>) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.rest_api.timeout))
            .build()?;

        Ok(Self {
            config,
            client,
            store,
        })
    }

    /// Returns the currently stored token, if any
    ///
    /// A store that cannot be read is treated as empty.
    pub fn current_token(&self) -> Option<Token> {
        match self.store.get() {
            Ok(token) => token,
            Err(e) => {
                warn!("Could not read stored token: {}", e);
                None
            }
        }
    }

    /// Attaches `Authorization: Bearer <token>` when a token is stored
    ///
    /// Without a stored token the request is returned unchanged.
    pub fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.current_token() {
            Some(token) => request.header(AUTHORIZATION, token.authorization_header()),
            None => request,
        }
    }

    /// Makes sure a token is stored, exchanging credentials if there is none
    ///
    /// # Returns
    /// * `Ok(Token)` - The stored or freshly obtained token
    /// * `Err(AppError)` - If no token was stored and the exchange failed
    pub async fn login(&self) -> Result<Token, AppError> {
        if let Some(token) = self.current_token() {
            debug!("Reusing stored token obtained at {}", token.obtained_at);
            return Ok(token);
        }

        info!("No stored token, requesting one");
        self.refresh_token().await
    }

    /// Exchanges the client credentials for a new token and persists it
    ///
    /// The store is only written after a successful exchange, so a failed refresh
    /// leaves the previous token in place.
    ///
    /// # Returns
    /// * `Ok(Token)` - The new token, already persisted
    /// * `Err(AppError)` - If the exchange or the write failed
    pub async fn refresh_token(&self) -> Result<Token, AppError> {
        let url = self.config.url_for(TOKEN_PATH);
        debug!("Requesting access token from: {}", url);

        let body = ClientCredentialsRequest::from(&self.config.credentials);
        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!("Token exchange failed with status {}: {}", status, body);
            return Err(AppError::TokenExchange(status));
        }

        let token: Token = response.json::<TokenResponse>().await?.into();
        self.store.save(&token)?;

        info!("✓ Access token refreshed");
        Ok(token)
    }

    /// Removes the stored token
    pub fn logout(&self) -> Result<(), AppError> {
        info!("Clearing stored token");
        self.store.clear()
    }
}
