//! Individual inspection endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        inspection::{CompleteInspection, CreateInspection, Inspection, InspectionQuery, UpdateInspection},
        user::Permission,
        InspectionStatus,
    },
    AppState,
};

use super::{AuthenticatedUser, OptionalJson};

/// List inspections
#[utoipa::path(
    get,
    path = "/inspections",
    tag = "inspections",
    security(("bearer_auth" = [])),
    params(InspectionQuery),
    responses(
        (status = 200, description = "Inspection list", body = Vec<Inspection>)
    )
)]
pub async fn list_inspections(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<InspectionQuery>,
) -> AppResult<Json<Vec<Inspection>>> {
    claims.require(Permission::View)?;
    let inspections = state.services.inspections.list(&query).await?;
    Ok(Json(inspections))
}

/// Get inspection by ID
#[utoipa::path(
    get,
    path = "/inspections/{id}",
    tag = "inspections",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Inspection ID")),
    responses(
        (status = 200, description = "Inspection details", body = Inspection),
        (status = 404, description = "Inspection not found")
    )
)]
pub async fn get_inspection(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Inspection>> {
    claims.require(Permission::View)?;
    let inspection = state.services.inspections.get_by_id(id).await?;
    Ok(Json(inspection))
}

/// Schedule an inspection for one equipment item
#[utoipa::path(
    post,
    path = "/inspections",
    tag = "inspections",
    security(("bearer_auth" = [])),
    request_body = CreateInspection,
    responses(
        (status = 201, description = "Inspection created", body = Inspection),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_inspection(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateInspection>,
) -> AppResult<(StatusCode, Json<Inspection>)> {
    claims.require(Permission::ManageInspections)?;
    let inspection = state.services.inspections.create(data, &claims).await?;
    Ok((StatusCode::CREATED, Json(inspection)))
}

/// Update an inspection; setting status to completed completes it
#[utoipa::path(
    put,
    path = "/inspections/{id}",
    tag = "inspections",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Inspection ID")),
    request_body = UpdateInspection,
    responses(
        (status = 200, description = "Inspection updated", body = Inspection),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Inspection not found")
    )
)]
pub async fn update_inspection(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateInspection>,
) -> AppResult<Json<Inspection>> {
    claims.require(Permission::ManageInspections)?;
    if data.status == Some(InspectionStatus::Completed) {
        claims.require(Permission::CompleteInspections)?;
    }
    let inspection = state.services.inspections.update(id, data, &claims).await?;
    Ok(Json(inspection))
}

/// Delete an inspection
#[utoipa::path(
    delete,
    path = "/inspections/{id}",
    tag = "inspections",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Inspection ID")),
    responses(
        (status = 204, description = "Inspection deleted"),
        (status = 404, description = "Inspection not found")
    )
)]
pub async fn delete_inspection(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require(Permission::ManageInspections)?;
    state.services.inspections.delete(id, &claims).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Complete an inspection and advance its schedule
#[utoipa::path(
    post,
    path = "/inspections/{id}/complete",
    tag = "inspections",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Inspection ID")),
    request_body = CompleteInspection,
    responses(
        (status = 200, description = "Inspection completed", body = Inspection),
        (status = 400, description = "Already completed", body = crate::error::ErrorResponse),
        (status = 404, description = "Inspection not found")
    )
)]
pub async fn complete_inspection(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    OptionalJson(data): OptionalJson<CompleteInspection>,
) -> AppResult<Json<Inspection>> {
    claims.require(Permission::CompleteInspections)?;
    let inspection = state
        .services
        .inspections
        .complete(id, data.notes.as_deref(), &claims)
        .await?;
    Ok(Json(inspection))
}
