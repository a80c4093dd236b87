// handlers/mod.rs - handler tiers
//
// Public (no auth) → Admin (flag cookie) → Protected (backend session)
pub mod admin; // /api/admin/* - admin flag cookie gate
pub mod protected; // /api/auth/* - requires a backend user session
pub mod public; // /, /health, /api/stories, /api/_debug/*
