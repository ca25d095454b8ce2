//! Authentication handlers.

use actix_web::{HttpResponse, web};
use subtle::ConstantTimeEq;
use validator::Validate;

use scribe_core::ports::{AuthError, UserRepository};
use scribe_shared::ErrorResponse;
use scribe_shared::dto::{LoginRequest, TokenResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /v1/users/auth/login
///
/// Unknown email and wrong password both answer 403 with the same message.
#[utoipa::path(
    post,
    path = "/v1/users/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authentication successful", body = TokenResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 403, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    // Find user by email
    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    // Passwords are stored as plain text
    let matches: bool = user
        .password
        .as_bytes()
        .ct_eq(req.password.as_bytes())
        .into();
    if !matches {
        tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    // Generate token
    let token = state.tokens.generate_token(user.id, &user.email)?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::test;
    use serde_json::{Value, json};

    use scribe_core::domain::User;
    use scribe_core::ports::{Repository, TokenService};

    use crate::state::AppState;

    async fn seeded_state() -> (AppState, User) {
        let state = AppState::with_secret("test-secret");
        let user = state
            .users
            .insert(User::new(
                "a@b.com".to_string(),
                "secret1".to_string(),
                "A".to_string(),
                None,
            ))
            .await
            .unwrap();
        (state, user)
    }

    #[actix_web::test]
    async fn test_login_issues_verifiable_token() {
        let (state, user) = seeded_state().await;
        let app = init_app!(state.clone());

        let req = test::TestRequest::post()
            .uri("/v1/users/auth/login")
            .set_json(json!({"email": "a@b.com", "password": "secret1"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        let token = body["token"].as_str().unwrap();

        let claims = state.tokens.validate_token(token).unwrap();
        assert_eq!(claims.subject, user.id.to_string());
        assert_eq!(claims.email, "a@b.com");

        // The token opens the caller's own record
        let req = test::TestRequest::get()
            .uri(&format!("/v1/users/{}", user.id))
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_login_bad_credentials_are_forbidden() {
        let (state, _) = seeded_state().await;
        let app = init_app!(state);

        for payload in [
            json!({"email": "a@b.com", "password": "wrong-password"}),
            json!({"email": "nobody@b.com", "password": "secret1"}),
        ] {
            let req = test::TestRequest::post()
                .uri("/v1/users/auth/login")
                .set_json(&payload)
                .to_request();
            let resp = test::call_service(&app, req).await;

            assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{payload}");
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], "Invalid email or password");
        }
    }

    #[actix_web::test]
    async fn test_login_validates_body() {
        let (state, _) = seeded_state().await;
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/v1/users/auth/login")
            .set_json(json!({"email": "not-an-email", "password": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["details"].as_array().unwrap().len(), 2);
    }
}
