// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Service description and liveness probes. No middleware beyond tracing/CORS.
pub mod system;

pub use system::{health, root};
