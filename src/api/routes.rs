// API routes configuration
// Author: Gabriel Demetrios Lafis

use actix_web::web;

use super::{handlers, ApiError};

/// Configure the UI and API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default().error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    )
    .app_data(web::JsonConfig::default().error_handler(|err, _req| ApiError::Validation(err.to_string()).into()))
    .route("/", web::get().to(handlers::index))
    .service(
        web::scope("/api/v1")
            // Health check
            .route("/health", web::get().to(handlers::health_check))
            .route("/uploads", web::post().to(handlers::upload))
            // Sessions
            .service(
                web::scope("/sessions/{id}")
                    .route("", web::get().to(handlers::get_session))
                    .route("", web::delete().to(handlers::delete_session))
                    .route("/columns", web::put().to(handlers::select_columns))
                    .route("/clean/duplicates", web::post().to(handlers::remove_duplicates))
                    .route("/clean/fill-mean", web::post().to(handlers::fill_missing_mean))
                    .route("/summary", web::get().to(handlers::summary))
                    .route("/correlation", web::get().to(handlers::correlation))
                    .route("/histograms", web::get().to(handlers::histograms))
                    .route("/export", web::get().to(handlers::export_table)),
            ),
    );
}
