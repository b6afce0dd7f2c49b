/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/10/26
******************************************************************************/

//! Tri-state outcome of a query and its publication through watch channels

use crate::constants::GENERIC_ERROR_MESSAGE;
use crate::error::AppError;
use std::future::Future;
use tokio::sync::watch;
use tracing::error;

/// Result of a query as seen by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome<T> {
    /// The query has been issued and has not resolved yet
    InFlight,
    /// The query resolved with a payload
    Success(T),
    /// The query failed; the message is meant for display
    Failure(String),
}

impl<T> Default for QueryOutcome<T> {
    fn default() -> Self {
        QueryOutcome::InFlight
    }
}

impl<T> QueryOutcome<T> {
    /// Maps a service result, logging the error and keeping a displayable message
    pub fn from_result(result: Result<T, AppError>) -> Self {
        match result {
            Ok(payload) => QueryOutcome::Success(payload),
            Err(e) => {
                error!("Query failed: {}", e);
                QueryOutcome::Failure(GENERIC_ERROR_MESSAGE.to_string())
            }
        }
    }

    /// Whether the query is still in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryOutcome::InFlight)
    }

    /// Payload of a successful query
    #[must_use]
    pub fn payload(&self) -> Option<&T> {
        match self {
            QueryOutcome::Success(payload) => Some(payload),
            _ => None,
        }
    }

    /// Message of a failed query
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            QueryOutcome::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Publishes `InFlight`, awaits `query`, then publishes its outcome
///
/// Nothing cancels an earlier call: when two calls overlap, whichever resolves last
/// wins.
pub async fn publish<T, F>(sender: &watch::Sender<QueryOutcome<T>>, query: F)
where
    F: Future<Output = QueryOutcome<T>>,
{
    sender.send_replace(QueryOutcome::InFlight);
    let outcome = query.await;
    sender.send_replace(outcome);
}
