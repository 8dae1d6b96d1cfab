use actix_files as fs;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use std::path::PathBuf;

use crate::domain::Chirpy;
use crate::error::{AppError, ValidationError};
use crate::logger::LoggerMiddleware;
use crate::metrics::{HitCounter, Metrics};
use crate::routes::{
    create_chirp, create_user, delete_chirp, get_chirp, health_check, list_chirps, login,
    metrics_page, polka_webhook, refresh, reset_metrics, revoke, update_user,
};

/// Extraction failures answer with the same `{"error": ...}` body as everything else
fn malformed(err: impl std::fmt::Display) -> actix_web::Error {
    AppError::Validation(ValidationError::MalformedBody(err.to_string())).into()
}

pub fn run(
    listener: TcpListener,
    chirpy: Chirpy,
    filepath_root: PathBuf,
) -> Result<Server, std::io::Error> {
    let chirpy = web::Data::new(chirpy);
    let metrics = web::Data::new(Metrics::default());

    let server = HttpServer::new(move || {
        App::new()
            .wrap(LoggerMiddleware)

            // Shared state
            .app_data(chirpy.clone())
            .app_data(metrics.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _| malformed(err)))
            .app_data(web::QueryConfig::default().error_handler(|err, _| malformed(err)))
            .app_data(web::PathConfig::default().error_handler(|err, _| malformed(err)))

            .service(
                web::scope("/api")
                    .route("/healthz", web::get().to(health_check))
                    .route("/reset", web::post().to(reset_metrics))
                    .route("/chirps", web::get().to(list_chirps))
                    .route("/chirps", web::post().to(create_chirp))
                    .route("/chirps/{chirp_id}", web::get().to(get_chirp))
                    .route("/chirps/{chirp_id}", web::delete().to(delete_chirp))
                    .route("/users", web::post().to(create_user))
                    .route("/users", web::put().to(update_user))
                    .route("/login", web::post().to(login))
                    .route("/refresh", web::post().to(refresh))
                    .route("/revoke", web::post().to(revoke))
                    .route("/polka/webhooks", web::post().to(polka_webhook)),
            )
            .route("/admin/metrics", web::get().to(metrics_page))

            // Static files, counted
            .service(
                web::scope("/app")
                    .wrap(HitCounter)
                    .service(fs::Files::new("", filepath_root.clone()).index_file("index.html")),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
