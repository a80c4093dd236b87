// handlers/admin/mod.rs - Admin flag cookie endpoints
//
// The admin gate is the `admin-authenticated` cookie alone; there is no
// server-side session table behind it.

pub mod session; // check-auth, login, logout

pub use session::{check_auth, login, logout};
