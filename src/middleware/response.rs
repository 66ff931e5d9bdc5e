use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::error::ApiError;

/// Result of a single request, written to the client by exactly one
/// `into_response` call.
#[derive(Debug)]
pub enum Outcome<T: Serialize> {
    /// Serialize the entity as JSON with the given status.
    Entity(StatusCode, T),
    /// Status only, no body (e.g. 204 after a delete).
    Empty(StatusCode),
    /// No entity for the requested id: 404 with an empty body.
    NotFound,
    Failed(ApiError),
}

impl<T: Serialize> Outcome<T> {
    /// 200 OK with the entity
    pub fn ok(entity: T) -> Self {
        Outcome::Entity(StatusCode::OK, entity)
    }

    /// 201 Created with the entity
    pub fn created(entity: T) -> Self {
        Outcome::Entity(StatusCode::CREATED, entity)
    }

    /// 204 No Content
    pub fn no_content() -> Self {
        Outcome::Empty(StatusCode::NO_CONTENT)
    }

    /// Map a lookup result: `None` short-circuits to `NotFound`, an error to `Failed`.
    pub fn from_lookup<E: Into<ApiError>>(result: Result<Option<T>, E>, status: StatusCode) -> Self {
        match result {
            Ok(Some(entity)) => Outcome::Entity(status, entity),
            Ok(None) => Outcome::NotFound,
            Err(e) => Outcome::Failed(e.into()),
        }
    }
}

impl<T: Serialize, E: Into<ApiError>> From<Result<T, E>> for Outcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(entity) => Outcome::ok(entity),
            Err(e) => Outcome::Failed(e.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        match self {
            Outcome::Entity(status, entity) => match serde_json::to_value(&entity) {
                Ok(value) => (status, Json(value)).into_response(),
                Err(e) => {
                    tracing::error!("Failed to serialize response data: {}", e);
                    ApiError::internal_server_error("Failed to serialize response data").into_response()
                }
            },
            Outcome::Empty(status) => status.into_response(),
            Outcome::NotFound => StatusCode::NOT_FOUND.into_response(),
            Outcome::Failed(err) => err.into_response(),
        }
    }
}
