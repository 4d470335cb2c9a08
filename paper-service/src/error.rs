//! Error type for the paper generation endpoint.
//!
//! Every failure is turned into a response here. Details are logged; the
//! caller only ever sees one of the fixed messages below.

use crate::services::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use service_core::error::ErrorResponse;
use thiserror::Error;
use validator::ValidationErrors;

use crate::dtos::REQUIRED_FIELDS;

pub const MISSING_FIELDS_MESSAGE: &str = "Subject and Chapter are required";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";
pub const FETCH_ERROR_MESSAGE: &str = "Gemini API Fetch Error, check your API key or internet";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum PaperError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Prompt rendering failed: {0}")]
    Prompt(#[from] minijinja::Error),

    #[error("Text provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl From<ValidationErrors> for PaperError {
    fn from(errors: ValidationErrors) -> Self {
        let invalid: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();

        let missing = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| invalid.iter().any(|name| name == field))
            .collect();

        PaperError::MissingFields(missing)
    }
}

impl IntoResponse for PaperError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            PaperError::MissingFields(fields) => {
                tracing::warn!(fields = ?fields, "Rejected paper request with missing fields");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(MISSING_FIELDS_MESSAGE)
                        .with_details(format!("missing fields: {}", fields.join(", "))),
                )
            }
            PaperError::MalformedBody(err) => {
                tracing::warn!(error = %err, "Rejected malformed paper request");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(INVALID_BODY_MESSAGE).with_details(err.to_string()),
                )
            }
            PaperError::Provider(err) if err.is_fetch_error() => {
                tracing::error!(error = ?err, "Gemini API fetch error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(FETCH_ERROR_MESSAGE),
                )
            }
            PaperError::Provider(err) => {
                tracing::error!(error = ?err, "Gemini API error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(INTERNAL_ERROR_MESSAGE),
                )
            }
            PaperError::Prompt(err) => {
                tracing::error!(error = ?err, "Failed to render paper prompt");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(INTERNAL_ERROR_MESSAGE),
                )
            }
        };

        body.into_response_with(status)
    }
}
