// handlers/protected/mod.rs - Protected handlers (backend user session required)
//
// Handlers here take the `CurrentUser` extractor, which runs the session
// guard and rejects with 401 before the handler body executes.

pub mod auth;

pub use auth::*;
