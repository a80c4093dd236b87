//! The `admin-authenticated` flag cookie.
//!
//! The cookie is the only record of an admin session. Issuing and clearing
//! go through the same builder: a clearing cookie whose path, sameSite or
//! secure attributes differ from the original is stored by the browser as a
//! second cookie instead of replacing the first.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

use crate::config::SecurityConfig;
use crate::context::RequestContext;

pub const ADMIN_COOKIE: &str = "admin-authenticated";
pub const AUTHENTICATED_VALUE: &str = "true";
pub const COOKIE_PATH: &str = "/";

const LIFETIME: Duration = Duration::days(365 * 10);

fn builder(value: &'static str, security: &SecurityConfig) -> Cookie<'static> {
    Cookie::build((ADMIN_COOKIE, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(security.secure_cookies)
        .path(COOKIE_PATH)
        .build()
}

/// Cookie marking the browser as admin-authenticated
pub fn issued(security: &SecurityConfig) -> Cookie<'static> {
    let mut cookie = builder(AUTHENTICATED_VALUE, security);
    cookie.set_expires(OffsetDateTime::now_utc() + LIFETIME);
    cookie
}

/// Cookie that overwrites and expires the admin flag
pub fn cleared(security: &SecurityConfig) -> Cookie<'static> {
    let mut cookie = builder("", security);
    cookie.set_expires(OffsetDateTime::UNIX_EPOCH);
    cookie
}

/// True only for the exact value `"true"`
pub fn is_authenticated(ctx: &RequestContext) -> bool {
    ctx.cookie(ADMIN_COOKIE) == Some(AUTHENTICATED_VALUE)
}
