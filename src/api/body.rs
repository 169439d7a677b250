//! Student request bodies.
//!
//! Create and update accept the same fields as JSON, as an urlencoded form
//! or as text fields of a multipart form. The parser is picked from the
//! `Content-Type` header; a body with any other type carries no fields.

use std::collections::HashMap;

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::models::StudentPayload;

/// Body formats understood by [`StudentBody`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Json,
    UrlEncoded,
    Multipart,
    Empty,
}

impl BodyFormat {
    /// Picks the format from a `Content-Type` header value.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(content_type) = content_type else {
            return BodyFormat::Empty;
        };
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if mime == "application/json" || mime.ends_with("+json") {
            BodyFormat::Json
        } else if mime == "application/x-www-form-urlencoded" {
            BodyFormat::UrlEncoded
        } else if mime == "multipart/form-data" {
            BodyFormat::Multipart
        } else {
            BodyFormat::Empty
        }
    }
}

/// Student fields extracted from the request body.
///
/// Only a body that cannot be parsed in its declared format is rejected
/// (400); everything else is handed to the store as-is.
pub struct StudentBody(pub StudentPayload);

impl<S> FromRequest<S> for StudentBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());

        let fields = match BodyFormat::from_content_type(content_type) {
            BodyFormat::Json => {
                let Json(value) = Json::<Value>::from_request(req, state).await?;
                value
            }
            BodyFormat::UrlEncoded => {
                let Form(pairs) = Form::<HashMap<String, String>>::from_request(req, state).await?;
                Value::Object(
                    pairs
                        .into_iter()
                        .map(|(name, value)| (name, Value::String(value)))
                        .collect(),
                )
            }
            BodyFormat::Multipart => {
                let multipart = Multipart::from_request(req, state).await?;
                multipart_fields(multipart).await?
            }
            BodyFormat::Empty => Value::Object(Map::new()),
        };

        let payload = StudentPayload::from_fields(fields)
            .map_err(|err| ApiError::BadRequest(err.to_string()))?;
        Ok(StudentBody(payload))
    }
}

/// Collects the text fields of a multipart form. File parts are skipped.
async fn multipart_fields(mut multipart: Multipart) -> Result<Value, ApiError> {
    let mut fields = Map::new();
    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let text = field.text().await?;
        fields.insert(name, Value::String(text));
    }
    Ok(Value::Object(fields))
}
