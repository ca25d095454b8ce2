//! # Scribe API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_cors::Cors;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_telemetry(&TelemetryConfig::from_env());

    // Load configuration
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    middleware::error::expose_internal_errors(!config.environment.is_production());

    tracing::info!(
        environment = %config.environment,
        "Starting Scribe API Server on {}:{}",
        config.host,
        config.port
    );

    // Build application state
    let state = AppState::new(&config);
    let origins = config.cors_origins.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&origins))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
            .default_service(web::to(handlers::not_found))
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;

    let base = format!("http://{}:{}{}", config.host, config.port, handlers::API_PREFIX);
    tracing::info!("API documentation available at {base}/docs/");
    tracing::info!("OpenAPI document available at {base}/openapi.json");

    server.run().await.context("server terminated abnormally")
}

/// CORS policy from `CORS_ORIGIN`; `*` allows any origin.
fn cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }

    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
