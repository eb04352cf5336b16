// API server implementation
// Author: Gabriel Demetrios Lafis

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};

use crate::storage::SessionStorage;
use super::routes;

/// API server configuration
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub enable_cors: bool,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: num_cpus::get(),
            enable_cors: false,
            max_upload_bytes: 200 * 1024 * 1024,
        }
    }
}

/// State shared by every request handler
pub struct AppState {
    pub storage: Arc<dyn SessionStorage + Send + Sync>,
    pub max_upload_bytes: usize,
}

/// API server
pub struct Server {
    config: ServerConfig,
    state: web::Data<AppState>,
}

impl Server {
    /// Create a new API server
    pub fn new<S>(storage: S, config: ServerConfig) -> Self
    where
        S: SessionStorage + Send + Sync + 'static,
    {
        let state = web::Data::new(AppState {
            storage: Arc::new(storage),
            max_upload_bytes: config.max_upload_bytes,
        });

        Server { config, state }
    }

    /// Run the API server
    pub async fn run(&self) -> std::io::Result<()> {
        let state = self.state.clone();
        let enable_cors = self.config.enable_cors;

        log::info!(
            "Starting server at http://{}:{} with {} workers",
            self.config.host,
            self.config.port,
            self.config.workers
        );

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .app_data(state.clone())
                .wrap(middleware::Condition::new(enable_cors, cors))
                .wrap(middleware::Logger::default())
                .configure(routes::configure)
        })
        .workers(self.config.workers)
        .bind((self.config.host.as_str(), self.config.port))?
        .run()
        .await
    }
}
