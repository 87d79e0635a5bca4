use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::Json;
use axum_typed_multipart::{FieldData, TypedMultipart, TypedMultipartError};
use bytes::Bytes;

use crate::domain::types::Upload;
use crate::error::AdminServiceError;

pub mod announcements;
pub mod auth;
pub mod content;
pub mod events;
pub mod members;
pub mod profile;

/// Unwrap a JSON body, reporting malformed input as a 422 on `body`.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AdminServiceError> {
    body.map(|Json(value)| value)
        .map_err(|e| AdminServiceError::invalid_field("body", e.body_text()))
}

/// A record id that does not parse can never match a row.
pub(crate) fn path_id(
    path: Result<Path<i64>, PathRejection>,
    resource: &'static str,
) -> Result<i64, AdminServiceError> {
    path.map(|Path(id)| id)
        .map_err(|_| AdminServiceError::NotFound(resource))
}

/// Unwrap query parameters, reporting malformed input as a 422 on `query`.
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AdminServiceError> {
    query
        .map(|Query(value)| value)
        .map_err(|e| AdminServiceError::invalid_field("query", e.body_text()))
}

/// Unwrap a multipart form, reporting malformed input as a 422 on `form`.
pub(crate) fn form_body<T>(
    form: Result<TypedMultipart<T>, TypedMultipartError>,
) -> Result<T, AdminServiceError> {
    form.map(|TypedMultipart(value)| value)
        .map_err(|e| AdminServiceError::invalid_field("form", e.to_string()))
}

/// An empty file part (no file chosen in the browser) counts as absent.
pub(crate) fn upload(field: Option<FieldData<Bytes>>) -> Option<Upload> {
    let field = field?;
    if field.contents.is_empty() {
        return None;
    }
    Some(Upload {
        file_name: field.metadata.file_name,
        content_type: field.metadata.content_type,
        bytes: field.contents,
    })
}
