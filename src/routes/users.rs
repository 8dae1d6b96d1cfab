/// User Routes
///
/// Signup, login and profile updates.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::domain::Chirpy;
use crate::error::AppError;
use crate::routes::extract::BearerToken;

#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/users
///
/// # Errors
/// - 400: invalid email or empty password
/// - 409: email already registered
pub async fn create_user(
    form: web::Json<CredentialsRequest>,
    chirpy: web::Data<Chirpy>,
) -> Result<HttpResponse, AppError> {
    let CredentialsRequest { email, password } = form.into_inner();
    let user = web::block(move || chirpy.signup(&email, &password)).await??;

    Ok(HttpResponse::Created().json(user))
}

/// POST /api/login
///
/// Returns the user with an access token (`token`) and a refresh token.
/// Unknown email and wrong password both answer 401 with the same body.
pub async fn login(
    form: web::Json<CredentialsRequest>,
    chirpy: web::Data<Chirpy>,
) -> Result<HttpResponse, AppError> {
    let CredentialsRequest { email, password } = form.into_inner();
    let response = web::block(move || chirpy.login(&email, &password)).await??;

    Ok(HttpResponse::Ok().json(response))
}

/// PUT /api/users
///
/// **Requires an access token.**
pub async fn update_user(
    token: BearerToken,
    form: web::Json<UpdateRequest>,
    chirpy: web::Data<Chirpy>,
) -> Result<HttpResponse, AppError> {
    let UpdateRequest { email, password } = form.into_inner();
    let user = web::block(move || {
        chirpy.update_profile(&token.0, email.as_deref(), password.as_deref())
    })
    .await??;

    Ok(HttpResponse::Ok().json(user))
}
