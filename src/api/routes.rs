//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`]; the mutating playground routes
//! additionally require the realm administrator role.

use crate::api::handlers::{
    add_playground_handler, list_playgrounds_handler, remove_playground_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /realm/playgrounds`                  - List the realm's playgrounds
/// - `POST   /realm/playgrounds`                  - Configure a playground (admin)
/// - `DELETE /realm/playgrounds/{playground_id}`  - Remove a playground (admin)
///
/// The admin gate is a `route_layer` so it runs before body parsing:
/// a non-admin caller is rejected with the role error even when the
/// request body is missing or malformed.
pub fn protected_routes() -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/realm/playgrounds", post(add_playground_handler))
        .route(
            "/realm/playgrounds/{playground_id}",
            delete(remove_playground_handler),
        )
        .route_layer(middleware::from_fn(auth::require_realm_admin));

    Router::new()
        .route("/realm/playgrounds", get(list_playgrounds_handler))
        .merge(admin_routes)
}
