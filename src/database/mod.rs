pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::DatabaseManager;
pub use memory::MemoryNoteStore;
pub use models::note::{NewNote, Note, NotePatch};
pub use postgres::PgNoteStore;
pub use store::{NoteStore, StoreError};
