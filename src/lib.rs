pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod drive;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::app;
pub use state::AppState;
