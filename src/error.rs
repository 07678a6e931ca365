//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, api::ApiError, internal_server_error::InternalServerError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// A string other than "income" or "expense" was used as a transaction or
    /// category type.
    #[error("\"{0}\" is not a valid type, expected \"income\" or \"expense\"")]
    InvalidTransactionType(String),

    /// A category given on the command line was not in the form `NAME:TYPE`.
    #[error("\"{0}\" is not a valid category, expected NAME:TYPE, e.g. \"Groceries:expense\"")]
    InvalidCategorySpec(String),

    /// A request to the finance API failed.
    #[error(transparent)]
    FinanceApi(#[from] ApiError),

    /// The lock guarding the category cache was poisoned.
    #[error("could not acquire the category cache lock")]
    CacheLockError,

    /// A form was submitted again before the previous submission resolved.
    #[error("a submission is already in progress")]
    SubmissionInProgress,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::FinanceApi(error) => {
                tracing::error!("The finance API request failed: {error}");
                InternalServerError {
                    description: "Could not reach the finance service",
                    fix: "Check that the finance service is running and try again.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::SubmissionInProgress => (
                StatusCode::CONFLICT,
                Alert::Error {
                    message: "Already submitting".to_owned(),
                    details: "Wait for the previous submission to finish before trying again."
                        .to_owned(),
                },
            ),
            Error::FinanceApi(error) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Could not reach the finance service".to_owned(),
                    details: error
                        .display_message("Try again later or check the server logs.")
                        .to_owned(),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}
