use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::drive::TextFile;
use crate::error::ApiError;
use crate::middleware::{AuthUser, Outcome};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub title: String,
    pub content: String,
}

/// POST /drive/upload - store a note's content as a plain-text file in the
/// caller's Google Drive
///
/// Uses the Drive access token carried by the session. The remote status is
/// forwarded as-is: success comes back with an empty body, failure with the
/// raw remote error body.
pub async fn upload(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Result<Json<UploadRequest>, JsonRejection>,
) -> Outcome<()> {
    let Some(access_token) = user.access_token.as_deref() else {
        tracing::warn!("User {} attempted a Drive upload without a Drive token", user.id);
        return Outcome::Failed(ApiError::unauthorized(
            "Session has no Google Drive access token",
        ));
    };

    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return Outcome::Failed(rejection.into()),
    };

    let file = TextFile {
        name: request.title,
        content: request.content,
    };

    match state.drive.authorize(access_token).create_text_file(&file).await {
        Ok(created) => {
            Outcome::Empty(StatusCode::from_u16(created.status.as_u16()).unwrap_or(StatusCode::OK))
        }
        Err(e) => Outcome::Failed(e.into()),
    }
}
