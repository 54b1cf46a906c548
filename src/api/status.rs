//! Inspection status endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    inspection::{ResolvedStatus, StatusSummary},
    models::{user::Permission, EquipmentCategory},
    AppState,
};

use super::AuthenticatedUser;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Restrict to one station
    pub station_id: Option<i32>,
}

/// Status of one equipment item
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentStatusResponse {
    pub equipment_id: i32,
    /// `null` when no inspection applies
    pub status: Option<ResolvedStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentStatusEntry {
    pub equipment_id: i32,
    pub name: String,
    pub serial_number: String,
    pub category: EquipmentCategory,
    pub station_id: i32,
    pub status: Option<ResolvedStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Date the statuses were computed for
    pub today: NaiveDate,
    pub station_id: Option<i32>,
    pub summary: StatusSummary,
    /// Most urgent first; items with no inspection last
    pub items: Vec<EquipmentStatusEntry>,
}

/// Resolved inspection status of one equipment item
#[utoipa::path(
    get,
    path = "/equipment/{id}/inspection-status",
    tag = "status",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Resolved status", body = EquipmentStatusResponse),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn equipment_status(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentStatusResponse>> {
    claims.require(Permission::View)?;
    let status = state.services.status.equipment_status(id).await?;
    Ok(Json(EquipmentStatusResponse {
        equipment_id: id,
        status,
    }))
}

/// Status dashboard: counts per severity and every item's status
#[utoipa::path(
    get,
    path = "/inspection-status",
    tag = "status",
    security(("bearer_auth" = [])),
    params(DashboardQuery),
    responses(
        (status = 200, description = "Status dashboard", body = DashboardResponse)
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DashboardResponse>> {
    claims.require(Permission::View)?;
    let dashboard = state.services.status.dashboard(query.station_id).await?;
    Ok(Json(dashboard))
}
