//! Inspection template endpoints (static reference data)

use axum::{
    extract::{Path, Query},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    inspection::templates::{self, InspectionTemplate, TEMPLATES},
    models::{user::Permission, EquipmentCategory},
};

use super::AuthenticatedUser;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TemplateQuery {
    /// Only templates for this equipment category
    pub category: Option<EquipmentCategory>,
}

/// List inspection templates
#[utoipa::path(
    get,
    path = "/templates",
    tag = "templates",
    security(("bearer_auth" = [])),
    params(TemplateQuery),
    responses(
        (status = 200, description = "Template list", body = Vec<InspectionTemplate>)
    )
)]
pub async fn list_templates(
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<TemplateQuery>,
) -> AppResult<Json<Vec<&'static InspectionTemplate>>> {
    claims.require(Permission::View)?;
    let list = match query.category {
        Some(category) => templates::for_category(category).collect(),
        None => TEMPLATES.iter().collect(),
    };
    Ok(Json(list))
}

/// Get one inspection template
#[utoipa::path(
    get,
    path = "/templates/{id}",
    tag = "templates",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Template ID")),
    responses(
        (status = 200, description = "Template details", body = InspectionTemplate),
        (status = 404, description = "Template not found")
    )
)]
pub async fn get_template(
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<&'static InspectionTemplate>> {
    claims.require(Permission::View)?;
    templates::find(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Template '{}' not found", id)))
}
