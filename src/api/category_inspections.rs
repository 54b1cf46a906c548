//! Category inspection endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        inspection::{
            CategoryInspection, CategoryInspectionCompletion, CompleteInspection,
            CreateCategoryInspection, UpdateCategoryInspection,
        },
        user::Permission,
    },
    AppState,
};

use super::{AuthenticatedUser, OptionalJson};

/// List category inspections
#[utoipa::path(
    get,
    path = "/category-inspections",
    tag = "category-inspections",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category inspection list", body = Vec<CategoryInspection>)
    )
)]
pub async fn list_category_inspections(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<CategoryInspection>>> {
    claims.require(Permission::View)?;
    let rules = state.services.inspections.list_category().await?;
    Ok(Json(rules))
}

/// Get category inspection by ID
#[utoipa::path(
    get,
    path = "/category-inspections/{id}",
    tag = "category-inspections",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category inspection ID")),
    responses(
        (status = 200, description = "Category inspection details", body = CategoryInspection),
        (status = 404, description = "Category inspection not found")
    )
)]
pub async fn get_category_inspection(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<CategoryInspection>> {
    claims.require(Permission::View)?;
    let rule = state.services.inspections.get_category(id).await?;
    Ok(Json(rule))
}

/// Create a category inspection
#[utoipa::path(
    post,
    path = "/category-inspections",
    tag = "category-inspections",
    security(("bearer_auth" = [])),
    request_body = CreateCategoryInspection,
    responses(
        (status = 201, description = "Category inspection created", body = CategoryInspection),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_category_inspection(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateCategoryInspection>,
) -> AppResult<(StatusCode, Json<CategoryInspection>)> {
    claims.require(Permission::ManageInspections)?;
    let rule = state.services.inspections.create_category(data).await?;
    Ok((StatusCode::CREATED, Json(rule)))
}

/// Update a category inspection
#[utoipa::path(
    put,
    path = "/category-inspections/{id}",
    tag = "category-inspections",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category inspection ID")),
    request_body = UpdateCategoryInspection,
    responses(
        (status = 200, description = "Category inspection updated", body = CategoryInspection),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Category inspection not found")
    )
)]
pub async fn update_category_inspection(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateCategoryInspection>,
) -> AppResult<Json<CategoryInspection>> {
    claims.require(Permission::ManageInspections)?;
    let rule = state.services.inspections.update_category(id, data).await?;
    Ok(Json(rule))
}

/// Delete a category inspection
#[utoipa::path(
    delete,
    path = "/category-inspections/{id}",
    tag = "category-inspections",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category inspection ID")),
    responses(
        (status = 204, description = "Category inspection deleted"),
        (status = 404, description = "Category inspection not found")
    )
)]
pub async fn delete_category_inspection(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require(Permission::ManageInspections)?;
    state.services.inspections.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Complete a category inspection and record it on every covered item
#[utoipa::path(
    post,
    path = "/category-inspections/{id}/complete",
    tag = "category-inspections",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category inspection ID")),
    request_body = CompleteInspection,
    responses(
        (status = 200, description = "Category inspection completed", body = CategoryInspectionCompletion),
        (status = 400, description = "Already completed", body = crate::error::ErrorResponse),
        (status = 404, description = "Category inspection not found")
    )
)]
pub async fn complete_category_inspection(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    OptionalJson(data): OptionalJson<CompleteInspection>,
) -> AppResult<Json<CategoryInspectionCompletion>> {
    claims.require(Permission::CompleteInspections)?;
    let completion = state
        .services
        .inspections
        .complete_category(id, data.notes.as_deref(), &claims)
        .await?;
    Ok(Json(completion))
}
