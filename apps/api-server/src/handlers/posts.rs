//! Post handlers. None of these routes require a token.

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use scribe_core::{DomainError, RepoError};
use scribe_core::domain::{Entity, Post, PostPatch, paginate};
use scribe_core::ports::Repository;
use scribe_shared::dto::{CreatePostRequest, PostQuery, UpdatePostRequest};
use scribe_shared::{ErrorResponse, Paginated};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity_type: Post::KIND,
        id,
    }
}

/// GET /v1/posts
#[utoipa::path(
    get,
    path = "/v1/posts",
    params(PostQuery),
    responses(
        (status = 200, description = "Paginated list of posts", body = Paginated<Post>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PostQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    query.validate()?;

    let filter = query.filter();
    let posts = state.posts.filter(&|p: &Post| filter.matches(p)).await?;

    let page = paginate(posts, query.page_request());
    Ok(HttpResponse::Ok().json(Paginated::from(page)))
}

/// GET /v1/posts/{id}
#[utoipa::path(
    get,
    path = "/v1/posts/{id}",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post found", body = Post),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state.posts.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /v1/posts
///
/// `authorId` is stored as given; it is not checked against the user store.
#[utoipa::path(
    post,
    path = "/v1/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 400, description = "Invalid request data", body = ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let post = Post::new(req.author_id, req.title, req.content, req.published, req.tags);
    let saved = state.posts.insert(post).await?;

    tracing::info!(post_id = %saved.id, author_id = %saved.author_id, "Post created");
    Ok(HttpResponse::Created().json(saved))
}

/// PUT /v1/posts/{id}
#[utoipa::path(
    put,
    path = "/v1/posts/{id}",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = Post),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let patch: PostPatch = req.into();
    let saved = match state
        .posts
        .update(id, Box::new(move |p: &Post| p.merged(patch)))
        .await
    {
        Err(RepoError::NotFound) => return Err(not_found(id).into()),
        result => result?,
    };

    tracing::info!(post_id = %id, "Post updated");
    Ok(HttpResponse::Ok().json(saved))
}

/// DELETE /v1/posts/{id}
#[utoipa::path(
    delete,
    path = "/v1/posts/{id}",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    if !state.posts.remove(id).await? {
        return Err(not_found(id).into());
    }

    tracing::info!(post_id = %id, "Post deleted");
    Ok(HttpResponse::NoContent().finish())
}
