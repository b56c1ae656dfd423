use std::collections::BTreeMap;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::pkg::internal::schema::{flatten_errors, ResumePayload};

// Body extraction, JSON parsing and rule checking happen before the handler
// runs. The body is kept verbatim alongside the typed payload: storage gets
// the exact bytes the candidate sent, never a re-serialization.
#[derive(Debug)]
pub struct ResumeSubmission {
    raw: String,
    payload: ResumePayload,
}

impl ResumeSubmission {
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn payload(&self) -> &ResumePayload {
        &self.payload
    }
}

#[derive(Debug)]
pub enum SchemaRejection {
    UnreadableBody,
    MalformedJson(String),
    TypeMismatch(String),
    FailedRules(BTreeMap<String, Vec<String>>),
}

impl IntoResponse for SchemaRejection {
    fn into_response(self) -> Response {
        match self {
            SchemaRejection::UnreadableBody => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "The request body could not be read." })),
            )
                .into_response(),
            SchemaRejection::MalformedJson(detail) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "message": "The request body is not valid JSON.",
                    "detail": detail
                })),
            )
                .into_response(),
            SchemaRejection::TypeMismatch(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "message": "The given data was invalid.",
                    "errors": { "payload": [detail] }
                })),
            )
                .into_response(),
            SchemaRejection::FailedRules(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "message": "The given data was invalid.",
                    "errors": errors
                })),
            )
                .into_response(),
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for ResumeSubmission
where
    S: Send + Sync,
{
    type Rejection = SchemaRejection;

    // The body is treated as JSON no matter what content type the client
    // declared.
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let raw = String::from_request(req, state)
            .await
            .map_err(|_| SchemaRejection::UnreadableBody)?;
        let payload: ResumePayload = serde_json::from_str(&raw).map_err(|err| {
            if err.classify() == serde_json::error::Category::Data {
                SchemaRejection::TypeMismatch(err.to_string())
            } else {
                SchemaRejection::MalformedJson(err.to_string())
            }
        })?;
        if let Err(errors) = payload.validate() {
            return Err(SchemaRejection::FailedRules(flatten_errors(&errors)));
        }
        Ok(ResumeSubmission { raw, payload })
    }
}
