use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use serde_json::{Map, Value};
use validator::Validate;

use crate::dtos::{missing_fields, GeneratePaperRequest, GeneratePaperResponse};
use crate::error::PaperError;
use crate::startup::AppState;

/// Generate a predicted question paper for a subject and chapter.
///
/// Validation happens before the prompt is built, so a rejected request never
/// reaches the text provider. The provider is called exactly once.
pub async fn generate_paper(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<GeneratePaperResponse>, PaperError> {
    let req = parse_request(&headers, &body)?;
    req.validate()?;

    let duration = req.effective_duration();
    let prompt = state.template.build(&req.subject, &req.chapter, duration)?;

    tracing::info!(
        subject = %req.subject,
        chapter = %req.chapter,
        duration,
        model = %state.template.model(),
        "Generating question paper"
    );

    let paper = state
        .text_provider
        .generate(&prompt, &state.template.options())
        .await?;

    tracing::info!(paper_len = paper.len(), "Question paper generated");

    Ok(Json(GeneratePaperResponse { paper }))
}

/// Decode the body, reporting missing fields ahead of type errors.
///
/// An empty body, or one sent without a JSON content type, reads as `{}`.
fn parse_request(headers: &HeaderMap, body: &[u8]) -> Result<GeneratePaperRequest, PaperError> {
    let value = if is_json(headers) && !body.trim_ascii().is_empty() {
        serde_json::from_slice::<Value>(body)?
    } else {
        Value::Object(Map::new())
    };

    let missing = missing_fields(&value);
    if !missing.is_empty() {
        return Err(PaperError::MissingFields(missing));
    }

    Ok(serde_json::from_value(value)?)
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
