/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Error type shared by every layer of the client

use reqwest::StatusCode;
use std::fmt;

/// Main error type for the library
#[derive(Debug)]
pub enum AppError {
    /// Transport level failure reported by reqwest
    Network(reqwest::Error),
    /// Failure while encoding or decoding JSON
    Json(serde_json::Error),
    /// Local filesystem failure
    Io(std::io::Error),
    /// The API rejected the bearer token
    Unauthorized,
    /// The client-credentials exchange did not return a token
    TokenExchange(StatusCode),
    /// The API answered with a status the client does not handle
    Unexpected(StatusCode),
    /// The requested resource does not exist
    NotFound,
    /// Sealing or opening a stored value failed
    Crypto(String),
    /// A caller supplied value was rejected
    InvalidInput(String),
    /// A response body could not be mapped to the expected model
    Deserialization(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(e) => write!(f, "network error: {e}"),
            AppError::Json(e) => write!(f, "json error: {e}"),
            AppError::Io(e) => write!(f, "io error: {e}"),
            AppError::Unauthorized => write!(f, "unauthorized"),
            AppError::TokenExchange(status) => {
                write!(f, "token exchange failed with status {status}")
            }
            AppError::Unexpected(status) => write!(f, "unexpected status code: {status}"),
            AppError::NotFound => write!(f, "not found"),
            AppError::Crypto(msg) => write!(f, "crypto error: {msg}"),
            AppError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            AppError::Deserialization(msg) => write!(f, "deserialization error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Network(e) => Some(e),
            AppError::Json(e) => Some(e),
            AppError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<hex::FromHexError> for AppError {
    fn from(err: hex::FromHexError) -> Self {
        AppError::Crypto(format!("invalid hex: {err}"))
    }
}
