use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};

use inkpress_core::PostId;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::AuthenticatedUser;
use crate::middleware::{self, AuthState};

/// Posts routes. Listing is public; all mutations sit behind the
/// basic-auth guard.
pub fn router(auth: AuthState) -> Router {
    let guard = axum::middleware::from_fn_with_state(auth, middleware::basic_auth_middleware);

    Router::new()
        .route(
            "/",
            get(list_posts).merge(post(create_post).route_layer(guard.clone())),
        )
        .route(
            "/:id",
            put(update_post).delete(delete_post).route_layer(guard),
        )
}

pub async fn list_posts(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let posts = match services.posts_list() {
        Ok(posts) => posts,
        Err(e) => return errors::store_error_to_response(e),
    };

    let body: Vec<_> = posts.iter().map(dto::post_to_json).collect();
    (StatusCode::OK, Json(body)).into_response()
}

pub async fn create_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<AuthenticatedUser>,
    Json(body): Json<dto::CreatePostRequest>,
) -> axum::response::Response {
    let new_post = match body.into_new_post() {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let created = match services.posts_create(new_post) {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };

    tracing::info!(user = principal.username(), id = %created.id, "post created");

    (StatusCode::CREATED, Json(dto::post_to_json(&created))).into_response()
}

pub async fn update_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdatePostRequest>,
) -> axum::response::Response {
    let id: PostId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let patch = match body.into_patch() {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let updated = match services.posts_update(id, patch) {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };

    tracing::info!(user = principal.username(), id = %updated.id, "post updated");

    // Existing clients expect 201 from updates, not 200/204.
    (StatusCode::CREATED, Json(dto::post_to_json(&updated))).into_response()
}

pub async fn delete_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PostId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.posts_delete(id) {
        return errors::store_error_to_response(e);
    }

    tracing::info!(user = principal.username(), %id, "post deleted");

    StatusCode::NO_CONTENT.into_response()
}
