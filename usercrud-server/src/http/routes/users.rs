//! User endpoints
//!
//! ```text
//! GET    /api/users       list
//! POST   /api/users       create  {"name": "...", "email": "..."}
//! GET    /api/users/{id}  read
//! PUT    /api/users/{id}  update  {"name": "...", "email": "..."}
//! DELETE /api/users/{id}  delete
//! ```

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, UserId};
use crate::http::server::AppState;
use crate::models::{User, UserInput};

/// Delete confirmation
#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// GET /api/users - list all users
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

/// POST /api/users - create a user
async fn create_user(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<UserInput>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.users.create(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users/{id} - get a single user
async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Json<User>, ApiError> {
    let user = state.users.get(id).await?;
    Ok(Json(user))
}

/// PUT /api/users/{id} - replace name and email
async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    JsonBody(input): JsonBody<UserInput>,
) -> Result<Json<User>, ApiError> {
    let user = state.users.update(id, input).await?;
    Ok(Json(user))
}

/// DELETE /api/users/{id}
async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.users.delete(id).await?;
    Ok(Json(DeleteResponse {
        message: "User deleted successfully",
    }))
}

/// User routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
