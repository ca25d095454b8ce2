//! HTTP handlers and route configuration.

#[cfg(test)]
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .configure($crate::handlers::configure_routes),
        )
        .await
    };
}

mod auth;
mod docs;
mod health;
mod posts;
mod users;

use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use scribe_shared::ErrorResponse;

use crate::middleware::error::{json_error_handler, path_error_handler, query_error_handler};

pub use docs::ApiDoc;

/// Base path every route lives under.
pub const API_PREFIX: &str = "/v1";

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        // Registered ahead of the /v1 scope, which would otherwise claim these paths
        .service(web::redirect("/v1/docs", "/v1/docs/"))
        .service(
            SwaggerUi::new("/v1/docs/{_:.*}").url("/v1/openapi.json", ApiDoc::openapi()),
        )
        .service(
            web::scope(API_PREFIX)
                .route("", web::get().to(api_info))
                .route("/", web::get().to(api_info))
                .route("/_health", web::get().to(health::health_check))
                .service(
                    web::scope("/users")
                        .route("/auth/login", web::post().to(auth::login))
                        .route("", web::get().to(users::list_users))
                        .route("", web::post().to(users::create_user))
                        .route("/{id}", web::get().to(users::get_user))
                        .route("/{id}", web::put().to(users::update_user))
                        .route("/{id}", web::delete().to(users::delete_user)),
                )
                .service(
                    web::scope("/posts")
                        .route("", web::get().to(posts::list_posts))
                        .route("", web::post().to(posts::create_post))
                        .route("/{id}", web::get().to(posts::get_post))
                        .route("/{id}", web::put().to(posts::update_post))
                        .route("/{id}", web::delete().to(posts::delete_post)),
                )
                .default_service(web::to(not_found)),
        );
}

/// GET /v1 - API information.
pub async fn api_info(req: HttpRequest) -> HttpResponse {
    let base = {
        let info = req.connection_info();
        format!("{}://{}{}", info.scheme(), info.host(), API_PREFIX)
    };

    HttpResponse::Ok().json(json!({
        "message": "Scribe API",
        "documentation": format!("{base}/docs/"),
        "openapi": format!("{base}/openapi.json"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/_health",
            "users": "/users",
            "posts": "/posts",
        },
    }))
}

/// Fallback for unmatched routes - echoes the requested path.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    tracing::debug!(path = %req.path(), "No route matched");
    HttpResponse::NotFound().json(
        ErrorResponse::not_found("The requested resource was not found").with_path(req.path()),
    )
}
