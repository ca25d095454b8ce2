//! User handlers.
//!
//! Only `GET /users/{id}` is gated: the caller's token subject must equal the
//! requested id. Update and delete are open to anyone.

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use scribe_core::{DomainError, RepoError};
use scribe_core::domain::{Entity, User, UserPatch, paginate};
use scribe_core::ports::Repository;
use scribe_shared::dto::{CreateUserRequest, UpdateUserRequest, UserQuery};
use scribe_shared::{ErrorResponse, Paginated};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity_type: User::KIND,
        id,
    }
}

/// GET /v1/users
#[utoipa::path(
    get,
    path = "/v1/users",
    params(UserQuery),
    responses(
        (status = 200, description = "Paginated list of users", body = Paginated<User>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn list_users(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    query.validate()?;

    let users = match query.search.as_deref() {
        Some(term) => state.users.filter(&|u: &User| u.matches_search(term)).await?,
        None => state.users.find_all().await?,
    };

    let page = paginate(users, query.page_request());
    Ok(HttpResponse::Ok().json(Paginated::from(page)))
}

/// GET /v1/users/{id} - Protected route
#[utoipa::path(
    get,
    path = "/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 401, description = "Missing or invalid authorization header", body = ErrorResponse),
        (status = 403, description = "Token rejected or belongs to another user", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    if !identity.is_user(id) {
        tracing::warn!(subject = %identity.subject, requested = %id, "Cross-user read denied");
        return Err(DomainError::Forbidden(
            "You are not allowed to access this user's data".to_string(),
        )
        .into());
    }

    let user = state.users.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    tracing::debug!(user_id = %id, email = %identity.email, "User fetched by owner");

    Ok(HttpResponse::Ok().json(user))
}

/// POST /v1/users
#[utoipa::path(
    post,
    path = "/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 409, description = "User with email already exists", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let user = User::new(req.email, req.password, req.name, req.age);
    let saved = state.users.insert(user).await?;

    tracing::info!(user_id = %saved.id, "User created");
    Ok(HttpResponse::Created().json(saved))
}

/// PUT /v1/users/{id}
#[utoipa::path(
    put,
    path = "/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email taken by another user", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let patch: UserPatch = req.into();
    let saved = match state
        .users
        .update(id, Box::new(move |u: &User| u.merged(patch)))
        .await
    {
        Err(RepoError::NotFound) => return Err(not_found(id).into()),
        result => result?,
    };

    tracing::info!(user_id = %id, "User updated");
    Ok(HttpResponse::Ok().json(saved))
}

/// DELETE /v1/users/{id}
#[utoipa::path(
    delete,
    path = "/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn delete_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    if !state.users.remove(id).await? {
        return Err(not_found(id).into());
    }

    tracing::info!(user_id = %id, "User deleted");
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::test;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use scribe_core::domain::User;
    use scribe_core::ports::{Repository, TokenService};

    use crate::state::AppState;

    async fn seed(state: &AppState, email: &str, name: &str) -> User {
        state
            .users
            .insert(User::new(
                email.to_string(),
                "secret1".to_string(),
                name.to_string(),
                None,
            ))
            .await
            .unwrap()
    }

    fn bearer(state: &AppState, user: &User) -> String {
        let token = state.tokens.generate_token(user.id, &user.email).unwrap();
        format!("Bearer {token}")
    }

    #[actix_web::test]
    async fn test_create_user_then_duplicate_conflicts() {
        let state = AppState::with_secret("test-secret");
        let app = init_app!(state.clone());
        let payload = json!({"email": "a@b.com", "password": "secret1", "name": "A"});

        let req = test::TestRequest::post()
            .uri("/v1/users")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
        assert_eq!(body["email"], "a@b.com");
        assert_eq!(body["name"], "A");
        assert_eq!(body["createdAt"], body["updatedAt"]);
        assert!(body.get("age").is_none());

        let req = test::TestRequest::post()
            .uri("/v1/users")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Conflict");
        assert_eq!(state.users.count().await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_create_user_validation_lists_fields() {
        let state = AppState::with_secret("test-secret");
        let app = init_app!(state.clone());

        let req = test::TestRequest::post()
            .uri("/v1/users")
            .set_json(json!({"email": "nope", "password": "123", "name": "", "age": 150}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Validation Error");
        let paths: Vec<&str> = body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["path"].as_str().unwrap())
            .collect();
        assert_eq!(paths, vec!["age", "email", "name", "password"]);
        assert_eq!(state.users.count().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_create_user_large_age_keeps_field_details() {
        let app = init_app!(AppState::with_secret("test-secret"));

        let req = test::TestRequest::post()
            .uri("/v1/users")
            .set_json(json!({"email": "nope", "password": "123", "name": "A", "age": 300}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        let paths: Vec<&str> = body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["path"].as_str().unwrap())
            .collect();
        assert_eq!(paths, vec!["age", "email", "password"]);
    }

    #[actix_web::test]
    async fn test_create_user_missing_field_is_bad_request() {
        let app = init_app!(AppState::with_secret("test-secret"));

        let req = test::TestRequest::post()
            .uri("/v1/users")
            .set_json(json!({"email": "a@b.com", "name": "A"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["details"][0]["path"], "body");
    }

    #[actix_web::test]
    async fn test_get_own_user_round_trip() {
        let state = AppState::with_secret("test-secret");
        let app = init_app!(state.clone());

        let req = test::TestRequest::post()
            .uri("/v1/users")
            .set_json(json!({"email": "me@b.com", "password": "secret1", "name": "Me", "age": 30}))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = Uuid::parse_str(created["id"].as_str().unwrap()).unwrap();
        let user = state.users.find_by_id(id).await.unwrap().unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/v1/users/{id}"))
            .insert_header((header::AUTHORIZATION, bearer(&state, &user)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let fetched: Value = test::read_body_json(resp).await;
        assert_eq!(fetched, created);
        assert_eq!(fetched["age"], 30);
    }

    #[actix_web::test]
    async fn test_get_user_requires_bearer_header() {
        let state = AppState::with_secret("test-secret");
        let user = seed(&state, "a@b.com", "A").await;
        let app = init_app!(state.clone());

        let req = test::TestRequest::get()
            .uri(&format!("/v1/users/{}", user.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri(&format!("/v1/users/{}", user.id))
            .insert_header((header::AUTHORIZATION, "Token abc"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_get_user_rejects_bad_or_foreign_tokens() {
        let state = AppState::with_secret("test-secret");
        let alice = seed(&state, "alice@b.com", "Alice").await;
        let bob = seed(&state, "bob@b.com", "Bob").await;
        let app = init_app!(state.clone());

        let forged = AppState::with_secret("other-secret");
        let cases = [
            "Bearer garbage".to_string(),
            bearer(&forged, &alice),
            bearer(&state, &bob),
        ];

        for auth in cases {
            let req = test::TestRequest::get()
                .uri(&format!("/v1/users/{}", alice.id))
                .insert_header((header::AUTHORIZATION, auth.clone()))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{auth}");
        }
    }

    #[actix_web::test]
    async fn test_get_deleted_user_is_not_found() {
        let state = AppState::with_secret("test-secret");
        let user = seed(&state, "a@b.com", "A").await;
        let auth = bearer(&state, &user);
        state.users.remove(user.id).await.unwrap();
        let app = init_app!(state.clone());

        let req = test::TestRequest::get()
            .uri(&format!("/v1/users/{}", user.id))
            .insert_header((header::AUTHORIZATION, auth))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_non_uuid_id_is_bad_request() {
        let app = init_app!(AppState::with_secret("test-secret"));

        let req = test::TestRequest::delete().uri("/v1/users/42").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["details"][0]["path"], "id");
    }

    #[actix_web::test]
    async fn test_update_user_merges_fields() {
        let state = AppState::with_secret("test-secret");
        let user = seed(&state, "a@b.com", "A").await;
        let app = init_app!(state.clone());

        let req = test::TestRequest::put()
            .uri(&format!("/v1/users/{}", user.id))
            .set_json(json!({"name": "Renamed", "age": 40}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["name"], "Renamed");
        assert_eq!(body["age"], 40);
        assert_eq!(body["email"], "a@b.com");
        assert_eq!(body["password"], "secret1");
    }

    #[actix_web::test]
    async fn test_partial_updates_build_on_stored_user() {
        let state = AppState::with_secret("test-secret");
        let user = seed(&state, "a@b.com", "A").await;
        let app = init_app!(state.clone());

        for payload in [json!({"name": "Renamed"}), json!({"age": 40})] {
            let req = test::TestRequest::put()
                .uri(&format!("/v1/users/{}", user.id))
                .set_json(&payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{payload}");
        }

        let stored = state.users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.age, Some(40));
        assert_eq!(stored.created_at, user.created_at);
    }

    #[actix_web::test]
    async fn test_update_user_email_collision_and_missing() {
        let state = AppState::with_secret("test-secret");
        seed(&state, "taken@b.com", "Taken").await;
        let user = seed(&state, "mine@b.com", "Mine").await;
        let app = init_app!(state.clone());

        let req = test::TestRequest::put()
            .uri(&format!("/v1/users/{}", user.id))
            .set_json(json!({"email": "taken@b.com"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::put()
            .uri(&format!("/v1/users/{}", user.id))
            .set_json(json!({"email": "mine@b.com"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::put()
            .uri(&format!("/v1/users/{}", Uuid::new_v4()))
            .set_json(json!({"name": "Ghost"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_delete_user() {
        let state = AppState::with_secret("test-secret");
        let user = seed(&state, "a@b.com", "A").await;
        seed(&state, "b@b.com", "B").await;
        let app = init_app!(state.clone());

        let req = test::TestRequest::delete()
            .uri(&format!("/v1/users/{}", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(state.users.count().await.unwrap(), 2);

        let req = test::TestRequest::delete()
            .uri(&format!("/v1/users/{}", user.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(test::read_body(resp).await.is_empty());
        assert_eq!(state.users.count().await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_list_users_search_and_paginate() {
        let state = AppState::with_secret("test-secret");
        for i in 0..12 {
            seed(&state, &format!("user{i}@example.com"), &format!("User {i}")).await;
        }
        seed(&state, "zed@other.org", "Zed").await;
        let app = init_app!(state.clone());

        let req = test::TestRequest::get()
            .uri("/v1/users?page=2&limit=5&search=EXAMPLE")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"].as_array().unwrap().len(), 5);
        assert_eq!(body["data"][0]["name"], "User 5");
        assert_eq!(body["meta"], json!({"page": 2, "limit": 5, "total": 12, "totalPages": 3}));

        let req = test::TestRequest::get().uri("/v1/users").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 10);
        assert_eq!(body["meta"]["total"], 13);
        assert_eq!(body["meta"]["page"], 1);
        assert_eq!(body["meta"]["limit"], 10);
    }

    #[actix_web::test]
    async fn test_list_users_rejects_bad_paging() {
        let app = init_app!(AppState::with_secret("test-secret"));

        for uri in ["/v1/users?page=0", "/v1/users?limit=abc"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }
}
