//! Bearer token authentication and realm-role authorization middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::domain::entities::AuthenticatedUser;
use crate::{error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Validate token hash against database
/// 3. Resolve the owning user's realm membership and role
/// 4. Insert [`AuthenticatedUser`] into request extensions
/// 5. Continue to next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Token is not found or revoked
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/realm/playgrounds", get(list_playgrounds_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| AppError::unauthorized("Invalid API key"))?;

    let mut req = Request::from_parts(parts, body);

    let user = st.auth_service.authenticate(&token).await?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Requires the authenticated user to be a realm administrator or owner.
///
/// Applied as a `route_layer` on mutating playground routes so the role check
/// runs before the request body is even parsed; a non-admin caller with a
/// missing or malformed body still receives the role error and causes no
/// side effects.
///
/// # Errors
///
/// Returns the "Must be an organization administrator" error (400) for
/// non-admin callers.
pub async fn require_realm_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let actor = req
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::unauthorized("Invalid API key"))?;

    if !actor.role.is_admin() {
        return Err(AppError::permission(
            "Must be an organization administrator",
        ));
    }

    Ok(next.run(req).await)
}
