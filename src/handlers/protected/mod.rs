// handlers/protected/mod.rs - Protected handlers (session token required)
//
// Every route in this tier sits behind `jwt_auth_middleware`, so handlers can
// rely on an `AuthUser` extension being present.
pub mod drive;
pub mod notes;
