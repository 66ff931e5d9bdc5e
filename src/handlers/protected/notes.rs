// Note resource controller
//
// GET     /notes       ->  index
// POST    /notes       ->  create
// GET     /notes/:id   ->  show
// PUT     /notes/:id   ->  update
// DELETE  /notes/:id   ->  destroy

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{Map, Value};

use crate::database::{NewNote, Note, NotePatch, StoreError};
use crate::middleware::{AuthUser, Outcome};
use crate::state::AppState;

type Body = Result<Json<Map<String, Value>>, JsonRejection>;

/// GET /notes - notes written by the caller
pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Outcome<Vec<Note>> {
    state.notes.find_by_author(&user.id).await.into()
}

/// GET /notes/:id
pub async fn show(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Outcome<Note> {
    Outcome::from_lookup(find_owned(&state, &user, &id).await, StatusCode::OK)
}

/// POST /notes - body is a JSON object of note fields; `id`/`_id` are ignored
/// and `author` is always the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Body,
) -> Outcome<Note> {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return Outcome::Failed(rejection.into()),
    };

    match state.notes.create(&user.id, NewNote::from_body(body)).await {
        Ok(note) => {
            tracing::info!("Created note {} for {}", note.id, user.id);
            Outcome::created(note)
        }
        Err(e) => Outcome::Failed(e.into()),
    }
}

/// PUT /notes/:id - shallow-merge the body over the stored note
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Body,
) -> Outcome<Note> {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return Outcome::Failed(rejection.into()),
    };
    let patch = NotePatch::from_body(body);
    if patch.is_empty() {
        tracing::debug!("Update of note {} carries no writable fields", id);
    }

    let mut note = match find_owned(&state, &user, &id).await {
        Ok(Some(note)) => note,
        Ok(None) => return Outcome::NotFound,
        Err(e) => return Outcome::Failed(e.into()),
    };

    patch.merge_into(&mut note);

    match state.notes.save(&note).await {
        Ok(saved) => Outcome::ok(saved),
        Err(StoreError::Gone(id)) => {
            tracing::debug!("Note {} removed before update could be saved", id);
            Outcome::NotFound
        }
        Err(e) => Outcome::Failed(e.into()),
    }
}

/// DELETE /notes/:id
pub async fn destroy(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Outcome<()> {
    match find_owned(&state, &user, &id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Outcome::NotFound,
        Err(e) => return Outcome::Failed(e.into()),
    }

    match state.notes.remove(&id).await {
        Ok(true) => {
            tracing::info!("Deleted note {} for {}", id, user.id);
            Outcome::no_content()
        }
        // lost a race with another delete
        Ok(false) => Outcome::NotFound,
        Err(e) => Outcome::Failed(e.into()),
    }
}

/// Look up a note, hiding notes that belong to someone else.
async fn find_owned(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> Result<Option<Note>, StoreError> {
    let note = state.notes.find_by_id(id).await?;

    Ok(note.filter(|note| {
        let owned = note.is_owned_by(&user.id);
        if !owned {
            tracing::warn!("User {} requested note {} owned by another user", user.id, id);
        }
        owned
    }))
}
