/// Token Routes
///
/// Both endpoints take the refresh token in the Authorization header.

use actix_web::{web, HttpResponse};

use crate::domain::Chirpy;
use crate::error::AppError;
use crate::routes::extract::BearerToken;

/// POST /api/refresh
///
/// Rotates the refresh token: the presented one is revoked and the
/// response carries a new access token and a new refresh token.
///
/// # Errors
/// - 400: an access token was sent
/// - 401: invalid, expired or revoked refresh token
pub async fn refresh(
    token: BearerToken,
    chirpy: web::Data<Chirpy>,
) -> Result<HttpResponse, AppError> {
    let session = web::block(move || chirpy.refresh_session(&token.0)).await??;

    Ok(HttpResponse::Ok().json(session))
}

/// POST /api/revoke
pub async fn revoke(
    token: BearerToken,
    chirpy: web::Data<Chirpy>,
) -> Result<HttpResponse, AppError> {
    web::block(move || chirpy.revoke_session(&token.0)).await??;

    Ok(HttpResponse::Ok().finish())
}
