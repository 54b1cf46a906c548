//! Station endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        station::{CreateStation, Station, UpdateStation},
        user::Permission,
    },
    AppState,
};

use super::AuthenticatedUser;

/// List all stations
#[utoipa::path(
    get,
    path = "/stations",
    tag = "stations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Station list", body = Vec<Station>)
    )
)]
pub async fn list_stations(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Station>>> {
    claims.require(Permission::View)?;
    let stations = state.services.stations.list().await?;
    Ok(Json(stations))
}

/// Get station by ID
#[utoipa::path(
    get,
    path = "/stations/{id}",
    tag = "stations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Station details", body = Station),
        (status = 404, description = "Station not found")
    )
)]
pub async fn get_station(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Station>> {
    claims.require(Permission::View)?;
    let station = state.services.stations.get_by_id(id).await?;
    Ok(Json(station))
}

/// Create station
#[utoipa::path(
    post,
    path = "/stations",
    tag = "stations",
    security(("bearer_auth" = [])),
    request_body = CreateStation,
    responses(
        (status = 201, description = "Station created", body = Station),
        (status = 409, description = "Station name already used", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_station(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateStation>,
) -> AppResult<(StatusCode, Json<Station>)> {
    claims.require(Permission::ManageStations)?;
    let station = state.services.stations.create(data).await?;
    Ok((StatusCode::CREATED, Json(station)))
}

/// Update station
#[utoipa::path(
    put,
    path = "/stations/{id}",
    tag = "stations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Station ID")),
    request_body = UpdateStation,
    responses(
        (status = 200, description = "Station updated", body = Station),
        (status = 404, description = "Station not found")
    )
)]
pub async fn update_station(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateStation>,
) -> AppResult<Json<Station>> {
    claims.require(Permission::ManageStations)?;
    let station = state.services.stations.update(id, data).await?;
    Ok(Json(station))
}

/// Delete station, its equipment and their inspections
#[utoipa::path(
    delete,
    path = "/stations/{id}",
    tag = "stations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Station ID")),
    responses(
        (status = 204, description = "Station deleted"),
        (status = 404, description = "Station not found")
    )
)]
pub async fn delete_station(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require(Permission::ManageStations)?;
    state.services.stations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
