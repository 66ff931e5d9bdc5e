use std::sync::Arc;

use crate::database::NoteStore;
use crate::drive::DriveClient;

/// Shared handles passed to every handler. Cloned per request; holds no
/// per-user data.
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteStore>,
    pub drive: DriveClient,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(notes: Arc<dyn NoteStore>, drive: DriveClient, jwt_secret: &str) -> Self {
        Self {
            notes,
            drive,
            jwt_secret: Arc::from(jwt_secret),
        }
    }
}
