pub mod user; // GET /api/auth/user

pub use user::current_user;
