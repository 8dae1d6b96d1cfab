use actix_web::{web, HttpResponse};

use crate::domain::{Chirpy, PolkaEvent};
use crate::error::AppError;
use crate::routes::extract::ApiKey;

/// POST /api/polka/webhooks
pub async fn polka_webhook(
    api_key: ApiKey,
    event: web::Json<PolkaEvent>,
    chirpy: web::Data<Chirpy>,
) -> Result<HttpResponse, AppError> {
    let event = event.into_inner();
    web::block(move || chirpy.handle_polka_event(api_key.0.as_deref(), &event)).await??;

    Ok(HttpResponse::Ok().finish())
}
