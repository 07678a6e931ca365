//! The finance API that stores categories and transactions.
//!
//! The forms in this crate only talk to the API through the [FinanceApi]
//! trait. [InMemoryFinanceApi] backs the server binary, tests use a scripted
//! fake.

mod memory;

use std::fmt::Debug;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::Value;

use crate::{
    category::{Category, NewCategory},
    transaction::{NewTransaction, Transaction},
};

pub use memory::InMemoryFinanceApi;

/// Operations offered by the finance API.
#[async_trait]
pub trait FinanceApi: Debug + Send + Sync {
    /// Fetch every known category.
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Create a category, returning the stored record.
    async fn create_category(&self, category: NewCategory) -> Result<Category, ApiError>;

    /// Create a transaction, returning the stored record.
    async fn create_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, ApiError>;

    /// Fetch every recorded transaction.
    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError>;
}

/// The response the API sent along with a failed request.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    /// The HTTP status of the response.
    pub status: StatusCode,
    /// The response body, usually an object with a `message` string.
    pub data: Value,
}

/// A failed request to the finance API.
///
/// Network failures, rejected input and server faults are all represented by
/// this one type. Use [ApiError::server_message] to get the human readable
/// reason when the API provided one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("finance API request failed: {reason}")]
pub struct ApiError {
    /// A description of the failure for the server logs.
    pub reason: String,
    /// The API response, absent when the request never got one.
    pub response: Option<ErrorResponse>,
}

impl ApiError {
    /// An error for a request that never received a response.
    pub fn without_response(reason: &str) -> Self {
        Self {
            reason: reason.to_owned(),
            response: None,
        }
    }

    /// An error for a request the API answered with a failure status.
    pub fn with_response(status: StatusCode, data: Value) -> Self {
        Self {
            reason: format!("the API responded with status {status}"),
            response: Some(ErrorResponse { status, data }),
        }
    }

    /// The message the API put in the response body, if it is a string.
    pub fn server_message(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .data
            .get("message")?
            .as_str()
            .filter(|message| !message.is_empty())
    }

    /// The text to show the user, falling back to `fallback` when the API
    /// did not provide a message.
    pub fn display_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.server_message().unwrap_or(fallback)
    }
}
