/// Authorization header extractors
///
/// `Authorization: Bearer <jwt>` for user endpoints and
/// `Authorization: ApiKey <key>` for the Polka webhook.

use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::error::{AppError, AuthError};

fn authorization_value(req: &HttpRequest, scheme: &str) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(scheme))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Raw bearer token; validation is up to the domain operation
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl FromRequest for BearerToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = authorization_value(req, "Bearer ").map(BearerToken);
        if token.is_none() {
            tracing::warn!(path = %req.path(), "Missing or invalid Authorization header");
        }
        ready(token.ok_or(AppError::Auth(AuthError::MissingToken)))
    }
}

/// Optional API key; a missing key is rejected by the webhook handler itself
#[derive(Debug, Clone)]
pub struct ApiKey(pub Option<String>);

impl FromRequest for ApiKey {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(ApiKey(authorization_value(req, "ApiKey "))))
    }
}
