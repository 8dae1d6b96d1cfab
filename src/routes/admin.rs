use actix_web::{web, HttpResponse};

use crate::metrics::Metrics;

/// GET /admin/metrics
pub async fn metrics_page(metrics: web::Data<Metrics>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(format!(
            "<html><body><h1>Welcome, Chirpy Admin</h1><p>Chirpy has been visited {} times!</p></body></html>",
            metrics.hits()
        ))
}

/// POST /api/reset
pub async fn reset_metrics(metrics: web::Data<Metrics>) -> HttpResponse {
    metrics.reset();
    tracing::info!("File server hit counter reset");
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("OK")
}
