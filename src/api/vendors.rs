//! Vendor endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        user::Permission,
        vendor::{CreateVendor, UpdateVendor, Vendor},
    },
    AppState,
};

use super::AuthenticatedUser;

/// List vendors
#[utoipa::path(
    get,
    path = "/vendors",
    tag = "vendors",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Vendor list", body = Vec<Vendor>)
    )
)]
pub async fn list_vendors(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Vendor>>> {
    claims.require(Permission::View)?;
    let vendors = state.services.vendors.list().await?;
    Ok(Json(vendors))
}

/// Get vendor by ID
#[utoipa::path(
    get,
    path = "/vendors/{id}",
    tag = "vendors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vendor ID")),
    responses(
        (status = 200, description = "Vendor details", body = Vendor),
        (status = 404, description = "Vendor not found")
    )
)]
pub async fn get_vendor(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vendor>> {
    claims.require(Permission::View)?;
    let vendor = state.services.vendors.get_by_id(id).await?;
    Ok(Json(vendor))
}

/// Create vendor
#[utoipa::path(
    post,
    path = "/vendors",
    tag = "vendors",
    security(("bearer_auth" = [])),
    request_body = CreateVendor,
    responses(
        (status = 201, description = "Vendor created", body = Vendor),
        (status = 409, description = "Vendor name already used", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_vendor(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateVendor>,
) -> AppResult<(StatusCode, Json<Vendor>)> {
    claims.require(Permission::ManageVendors)?;
    let vendor = state.services.vendors.create(data).await?;
    Ok((StatusCode::CREATED, Json(vendor)))
}

/// Update vendor
#[utoipa::path(
    put,
    path = "/vendors/{id}",
    tag = "vendors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vendor ID")),
    request_body = UpdateVendor,
    responses(
        (status = 200, description = "Vendor updated", body = Vendor),
        (status = 404, description = "Vendor not found")
    )
)]
pub async fn update_vendor(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateVendor>,
) -> AppResult<Json<Vendor>> {
    claims.require(Permission::ManageVendors)?;
    let vendor = state.services.vendors.update(id, data).await?;
    Ok(Json(vendor))
}

/// Delete vendor
#[utoipa::path(
    delete,
    path = "/vendors/{id}",
    tag = "vendors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vendor ID")),
    responses(
        (status = 204, description = "Vendor deleted"),
        (status = 404, description = "Vendor not found")
    )
)]
pub async fn delete_vendor(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require(Permission::ManageVendors)?;
    state.services.vendors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
