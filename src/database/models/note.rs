use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys the client may never set directly on a note document.
/// `_id` is accepted as an alias of `id` for clients written against Mongo-style APIs.
const RESERVED_FIELDS: &[&str] = &["id", "_id", "author"];

/// A persisted note document.
///
/// `id` and `author` are owned by the server; every other top-level field is
/// free-form client data kept in `fields` and flattened on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub author: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Note {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.author == user_id
    }
}

/// Client-supplied fields for a new note, with reserved keys removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewNote {
    pub fields: Map<String, Value>,
}

impl NewNote {
    pub fn from_body(body: Map<String, Value>) -> Self {
        Self {
            fields: strip_reserved(body),
        }
    }
}

/// Partial update of a note. Only the top-level keys present in the request
/// body are carried; anything absent is left alone on merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePatch {
    fields: Map<String, Value>,
}

impl NotePatch {
    pub fn from_body(body: Map<String, Value>) -> Self {
        Self {
            fields: strip_reserved(body),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Shallow merge: each present key replaces the stored value wholesale,
    /// nested objects included.
    pub fn merge_into(self, note: &mut Note) {
        for (key, value) in self.fields {
            note.fields.insert(key, value);
        }
    }
}

fn strip_reserved(mut body: Map<String, Value>) -> Map<String, Value> {
    for key in RESERVED_FIELDS {
        if body.remove(*key).is_some() {
            tracing::debug!("Dropped reserved field '{}' from note body", key);
        }
    }
    body
}
