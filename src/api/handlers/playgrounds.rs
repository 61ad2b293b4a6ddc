//! Handlers for realm playground endpoints.

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use validator::Validate;

use crate::api::dto::playgrounds::{
    AddPlaygroundRequest, AddPlaygroundResponse, PlaygroundItem, PlaygroundListResponse,
    RemovePlaygroundResponse,
};
use crate::domain::entities::AuthenticatedUser;
use crate::error::AppError;
use crate::state::AppState;

/// Configures a new playground for the caller's realm.
///
/// # Endpoint
///
/// `POST /api/v1/realm/playgrounds`
///
/// The admin-role gate runs as route middleware before this handler, so the
/// body is only parsed for authorized callers.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Python playground",
///   "pygments_language": "Python",
///   "url_prefix": "https://python.example.com?code={code}"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {"result": "success", "id": 1}
/// ```
///
/// # Errors
///
/// Returns 400 with the specific validation message if a field is rejected,
/// or the uniqueness message if the (realm, language, name) triple exists.
pub async fn add_playground_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Json(payload): Json<AddPlaygroundRequest>,
) -> Result<Json<AddPlaygroundResponse>, AppError> {
    payload.validate()?;

    let id = state
        .playground_service
        .add_playground(
            &actor,
            payload.name,
            payload.pygments_language,
            payload.url_prefix,
        )
        .await?;

    Ok(Json(AddPlaygroundResponse {
        result: "success",
        id,
    }))
}

/// Removes a playground from the caller's realm.
///
/// # Endpoint
///
/// `DELETE /api/v1/realm/playgrounds/{playground_id}`
///
/// # Errors
///
/// Returns 400 "Invalid playground" if the id does not exist in the caller's
/// realm — including ids that exist in another realm.
pub async fn remove_playground_handler(
    Path(playground_id): Path<i64>,
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
) -> Result<Json<RemovePlaygroundResponse>, AppError> {
    state
        .playground_service
        .remove_playground(&actor, playground_id)
        .await?;

    Ok(Json(RemovePlaygroundResponse { result: "success" }))
}

/// Lists the playgrounds configured for the caller's realm.
///
/// # Endpoint
///
/// `GET /api/v1/realm/playgrounds`
///
/// Available to any authenticated member; playground configurations are
/// realm-visible data, only their mutation is admin-scoped.
pub async fn list_playgrounds_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
) -> Result<Json<PlaygroundListResponse>, AppError> {
    let playgrounds = state
        .playground_service
        .list_playgrounds(actor.realm_id)
        .await?;

    Ok(Json(PlaygroundListResponse {
        result: "success",
        playgrounds: playgrounds.into_iter().map(PlaygroundItem::from).collect(),
    }))
}
