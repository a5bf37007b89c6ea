//! Bearer-token extractor for protected routes.
//!
//! Handlers that take an [`AuthenticatedUser`] argument only run once the
//! `Authorization: Bearer <token>` header has been verified through the
//! [`AccessTokens`](crate::domain::ports::AccessTokens) port held in
//! [`HttpState`].

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{BEARER_TOKEN_TYPE, Email, Error};
use crate::inbound::http::state::HttpState;

/// Message returned when no `Authorization` header is sent.
pub const MISSING_TOKEN_MESSAGE: &str = "your authorization token is missing";
/// Message returned when the header is malformed or the token fails checks.
pub const UNAUTHORIZED_TOKEN_MESSAGE: &str = "your token is not authorized";

/// Account whose bearer token was accepted for this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(Email);

impl AuthenticatedUser {
    /// Token subject.
    pub fn email(&self) -> &Email {
        &self.0
    }
}

/// Split `Bearer <token>` into the token, rejecting other schemes.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case(BEARER_TOKEN_TYPE) && !token.is_empty()).then_some(token)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;

    let Some(header) = req.headers().get(AUTHORIZATION) else {
        return Err(Error::unauthorized(MISSING_TOKEN_MESSAGE));
    };
    let token = header
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or_else(|| {
            debug!("authorization header is not a bearer token");
            Error::unauthorized(UNAUTHORIZED_TOKEN_MESSAGE)
        })?;

    state
        .tokens
        .verify(token)
        .map(AuthenticatedUser)
        .map_err(|_| Error::unauthorized(UNAUTHORIZED_TOKEN_MESSAGE))
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
