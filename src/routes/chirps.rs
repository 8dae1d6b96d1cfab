/// Chirp Routes

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::database::SortOrder;
use crate::domain::Chirpy;
use crate::error::AppError;
use crate::routes::extract::BearerToken;

#[derive(Deserialize)]
pub struct ChirpRequest {
    pub body: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub author_id: Option<u64>,
    #[serde(default)]
    pub sort: SortOrder,
}

/// POST /api/chirps
///
/// # Errors
/// - 400: body too long or malformed
/// - 401: missing, invalid, expired or refresh-kind token
pub async fn create_chirp(
    token: BearerToken,
    form: web::Json<ChirpRequest>,
    chirpy: web::Data<Chirpy>,
) -> Result<HttpResponse, AppError> {
    let ChirpRequest { body } = form.into_inner();
    let chirp = web::block(move || chirpy.post_chirp(&token.0, &body)).await??;

    Ok(HttpResponse::Created().json(chirp))
}

/// GET /api/chirps?author_id=<id>&sort=asc|desc
pub async fn list_chirps(
    query: web::Query<ListQuery>,
    chirpy: web::Data<Chirpy>,
) -> Result<HttpResponse, AppError> {
    let ListQuery { author_id, sort } = query.into_inner();
    let chirps = web::block(move || chirpy.list_chirps(author_id, sort)).await??;

    Ok(HttpResponse::Ok().json(chirps))
}

/// GET /api/chirps/{chirp_id}
pub async fn get_chirp(
    path: web::Path<u64>,
    chirpy: web::Data<Chirpy>,
) -> Result<HttpResponse, AppError> {
    let chirp_id = path.into_inner();
    let chirp = web::block(move || chirpy.get_chirp(chirp_id)).await??;

    Ok(HttpResponse::Ok().json(chirp))
}

/// DELETE /api/chirps/{chirp_id}
///
/// # Errors
/// - 401: missing or invalid token
/// - 403: caller is not the author
/// - 404: no such chirp
pub async fn delete_chirp(
    token: BearerToken,
    path: web::Path<u64>,
    chirpy: web::Data<Chirpy>,
) -> Result<HttpResponse, AppError> {
    let chirp_id = path.into_inner();
    web::block(move || chirpy.delete_chirp(&token.0, chirp_id)).await??;

    Ok(HttpResponse::Ok().finish())
}
