use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};

use inkpress_auth::{BasicCredentials, User};
use inkpress_store::UserStore;

use crate::app::errors;
use crate::context::AuthenticatedUser;

#[derive(Clone)]
pub struct AuthState {
    pub users: Arc<dyn UserStore>,
}

/// Basic-auth guard for write routes.
///
/// Rejects the request before any handler (and therefore any post mutation)
/// runs. On success the authenticated principal is made available to
/// handlers via request extensions.
pub async fn basic_auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let user = authenticate(&state, req.headers())?;

    req.extensions_mut()
        .insert(AuthenticatedUser::new(user.username));

    Ok(next.run(req).await)
}

fn authenticate(state: &AuthState, headers: &HeaderMap) -> Result<User, Response> {
    let header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("missing credentials"))?;
    let header = header
        .to_str()
        .map_err(|_| unauthorized("malformed authorization header"))?;

    let creds =
        BasicCredentials::parse(header).map_err(|e| unauthorized(e.to_string()))?;

    let user = state
        .users
        .find_by_username(&creds.username)
        .map_err(errors::store_error_to_response)?
        .ok_or_else(|| unauthorized("unknown user or wrong password"))?;

    if !user.verify_password(&creds.password) {
        return Err(unauthorized("unknown user or wrong password"));
    }

    Ok(user)
}

fn unauthorized(message: impl Into<String>) -> Response {
    let mut res = errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", message);
    res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"posts\""),
    );
    res
}
