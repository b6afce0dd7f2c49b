/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use crate::application::config::Credentials;
use crate::constants::CLIENT_CREDENTIALS_GRANT;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Bearer token issued by the client-credentials exchange
///
/// No expiry bookkeeping is done with `expires_in`: a token is only known to be stale
/// once the API rejects it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// Opaque access token sent in the `Authorization` header
    pub access_token: String,
    /// Token type, usually "Bearer"
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime announced by the server, in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// When this client received the token
    #[serde(default = "Utc::now")]
    pub obtained_at: DateTime<Utc>,
}

impl Token {
    /// Creates a bearer token stamped with the current time
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: default_token_type(),
            expires_in: None,
            obtained_at: Utc::now(),
        }
    }

    /// Value of the `Authorization` header for this token
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Body of the client-credentials token request
#[derive(Debug, Clone, Serialize)]
pub struct ClientCredentialsRequest<'a> {
    /// Always `client_credentials`
    pub grant_type: &'static str,
    /// OAuth2 client identifier
    pub client_id: &'a str,
    /// OAuth2 client secret
    pub client_secret: &'a str,
}

impl<'a> From<&'a Credentials> for ClientCredentialsRequest<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            grant_type: CLIENT_CREDENTIALS_GRANT,
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
        }
    }
}

/// Response of the token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Token type, usually "Bearer"
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Opaque access token
    pub access_token: String,
}

impl From<TokenResponse> for Token {
    fn from(response: TokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            token_type: response.token_type,
            expires_in: response.expires_in,
            obtained_at: Utc::now(),
        }
    }
}
