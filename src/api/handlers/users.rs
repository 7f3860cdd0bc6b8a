//! User CRUD request handlers.
//!
//! Provides HTTP handlers for user management operations.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_TAG;
use crate::api::dto::{ApiErrors, PageResponse, UserDto, UserSearchParams};
use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::state::AppState;
use crate::utils::validate::{PathParam, ValidatedJson, ValidatedQuery};

/// Creates user-related routes.
///
/// Routes:
/// - GET /        - Search users by example, paged
/// - POST /       - Create a new user
/// - GET /{id}    - Get user by ID
/// - PUT /{id}    - Update user by ID
/// - DELETE /{id} - Delete user by ID
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_user, find_users))
        .routes(routes!(get_user, update_user, delete_user))
}

async fn existing_user(state: &AppState, id: i64) -> AppResult<User> {
    state
        .services
        .users
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::user_not_found(id))
}

/// POST /api/users - Create new user
///
/// Returns 201 Created with the stored user, including its generated id.
#[utoipa::path(
    post,
    path = "/",
    tag = USER_TAG,
    request_body = UserDto,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Invalid body or e-mail already registered", body = ApiErrors)
    )
)]
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserDto>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    let mut user = payload.into_user();
    user.id = None;

    let created = state.services.users.create(user).await?;
    Ok((StatusCode::CREATED, Json(UserDto::from(created))))
}

/// GET /api/users/{id} - Get user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "User not found")
    )
)]
async fn get_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<UserDto>> {
    let user = existing_user(&state, id).await?;
    Ok(Json(UserDto::from(user)))
}

/// PUT /api/users/{id} - Update user
///
/// Copies every field but the id from the body onto the stored user.
/// The body is not validated.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = i64, Path, description = "User id")),
    request_body = UserDto,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Malformed body", body = ApiErrors),
        (status = 404, description = "User not found")
    )
)]
async fn update_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    payload: Result<Json<UserDto>, JsonRejection>,
) -> AppResult<Json<UserDto>> {
    let mut user = existing_user(&state, id).await?;
    let Json(changes) = payload?;

    changes.apply_to(&mut user);
    let updated = state.services.users.update(user).await?;
    Ok(Json(UserDto::from(updated)))
}

/// DELETE /api/users/{id} - Delete user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
async fn delete_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> AppResult<StatusCode> {
    let user = existing_user(&state, id).await?;
    state.services.users.delete(&user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users - Search users
///
/// Every supplied user field narrows the result: strings by
/// case-insensitive substring, numbers by equality.
#[utoipa::path(
    get,
    path = "/",
    tag = USER_TAG,
    params(UserSearchParams),
    responses(
        (status = 200, description = "Page of matching users", body = PageResponse<UserDto>),
        (status = 400, description = "Invalid query parameters", body = ApiErrors)
    )
)]
async fn find_users(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<UserSearchParams>,
) -> AppResult<Json<PageResponse<UserDto>>> {
    let page = state
        .services
        .users
        .find(&params.filter(), params.page_request())
        .await?;

    Ok(Json(PageResponse::from(page)))
}
