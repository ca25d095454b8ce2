//! OpenAPI document served at `/v1/openapi.json` and rendered at `/v1/docs/`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use scribe_core::domain::{Post, User};
use scribe_shared::dto::{
    CreatePostRequest, CreateUserRequest, LoginRequest, TokenResponse, UpdatePostRequest,
    UpdateUserRequest,
};
use scribe_shared::{ErrorResponse, FieldError, PageMeta};

use super::health::HealthResponse;
use super::{auth, health, posts, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Scribe API",
        description = "Users and posts over REST with JWT authentication."
    ),
    paths(
        health::health_check,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        auth::login,
        posts::list_posts,
        posts::get_post,
        posts::create_post,
        posts::update_post,
        posts::delete_post,
    ),
    components(schemas(
        User,
        Post,
        CreateUserRequest,
        UpdateUserRequest,
        LoginRequest,
        TokenResponse,
        CreatePostRequest,
        UpdatePostRequest,
        ErrorResponse,
        FieldError,
        PageMeta,
        HealthResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Users", description = "User management"),
        (name = "Auth", description = "Token issuance"),
        (name = "Posts", description = "Post management")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
