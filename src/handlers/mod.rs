// handlers/mod.rs - handler tiers
//
// Public (no session) → Protected (session token required)
pub mod public;    // /, /health
pub mod protected; // /notes/*, /drive/*
