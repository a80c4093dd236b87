use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
    response::{IntoResponseParts, ResponseParts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

/// Per-request cookie scope handed explicitly to handlers and backends.
///
/// Holds the cookies sent by the client and the cookie mutations the
/// handler wants written back. Returning the context from a handler emits
/// one `Set-Cookie` header per outbound cookie.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    inbound: CookieJar,
    outbound: Vec<Cookie<'static>>,
}

impl RequestContext {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            inbound: CookieJar::from_headers(headers),
            outbound: Vec::new(),
        }
    }

    /// Value of an inbound cookie
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.inbound.get(name).map(|c| c.value())
    }

    /// Queue a cookie to be written on the response
    pub fn set_cookie(&mut self, cookie: impl Into<Cookie<'static>>) {
        self.outbound.push(cookie.into());
    }

    pub fn outbound(&self) -> &[Cookie<'static>] {
        &self.outbound
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

impl IntoResponseParts for RequestContext {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        let jar = self
            .outbound
            .into_iter()
            .fold(CookieJar::new(), |jar, cookie| jar.add(cookie));
        jar.into_response_parts(res)
    }
}
