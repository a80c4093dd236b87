// handlers/public/mod.rs - Public handlers (no authentication required)

pub mod debug; // GET /api/_debug/env
pub mod stories; // GET /api/stories
pub mod system; // GET /, GET /health

pub use debug::debug_env;
pub use stories::stories_get;
pub use system::{health, root};
