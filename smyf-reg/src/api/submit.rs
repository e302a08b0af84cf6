//! Form submission handler
//!
//! Validates the tag list, then writes one `submissions` row followed by one
//! `tag_submissions` row. The two inserts are not wrapped in a transaction:
//! if the second fails the first stays committed.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use smyf_common::db::{insert_submission, insert_tag_submission, serialize_tags, NewSubmission};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::api::body::{decode_body, BodyKind};
use crate::AppState;

/// Acknowledgment sent back after both rows are stored
pub const THANK_YOU_HTML: &str = r#"
    <script>
        alert("Thank you for registering!");
        window.location.href = "/";
    </script>
"#;

/// POST /submit request body
///
/// Scalar fields are taken as raw JSON so they reach the store uncoerced.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SubmissionRequest {
    #[serde(flatten)]
    pub fields: NewSubmission,
    #[serde(default)]
    pub tags: Option<Value>,
}

impl SubmissionRequest {
    /// Decode from a request body, dispatching on `Content-Type`
    pub fn from_body(headers: &HeaderMap, body: &[u8]) -> Option<Self> {
        let kind = BodyKind::from_headers(headers)?;
        let value = decode_body(kind, body)?;
        serde_json::from_value(value).ok()
    }

    /// The tag list, if present as a non-empty array
    pub fn tag_list(&self) -> Option<&[Value]> {
        match &self.tags {
            Some(Value::Array(tags)) if !tags.is_empty() => Some(tags.as_slice()),
            _ => None,
        }
    }
}

/// POST /submit
///
/// Accepts JSON or urlencoded form bodies.
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Html<&'static str>, SubmitError> {
    // An unreadable body carries no tags
    let request = SubmissionRequest::from_body(&headers, &body).ok_or_else(|| {
        debug!("Rejected unreadable submission body");
        SubmitError::MissingTags
    })?;

    let tags = request.tag_list().ok_or(SubmitError::MissingTags)?;
    let tags_json = serialize_tags(tags);

    let submission_id = insert_submission(&state.db, &request.fields)
        .await
        .map_err(|e| {
            error!("Error inserting form data into submissions: {}", e);
            SubmitError::Database(e.to_string())
        })?;

    let tags_id = insert_tag_submission(&state.db, &tags_json)
        .await
        .map_err(|e| {
            error!(
                "Error inserting tags into tag_submissions (submission {} left without tags): {}",
                submission_id, e
            );
            SubmitError::Database(e.to_string())
        })?;

    info!(
        "Stored submission {} with tag row {}",
        submission_id, tags_id
    );
    Ok(Html(THANK_YOU_HTML))
}

/// Submission errors
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("No tags provided")]
    MissingTags,
    #[error("Database error: {0}")]
    Database(String),
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        // Store details stay in the server log
        let (status, message) = match self {
            SubmitError::MissingTags => (StatusCode::BAD_REQUEST, "No tags provided"),
            SubmitError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
