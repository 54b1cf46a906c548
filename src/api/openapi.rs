//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    auth, category_inspections, equipment, health, inspections, stations, status, templates, users,
    vendors,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fire Gear Tracker API",
        version = "1.0.0",
        description = "Fire department equipment and inspection tracking REST API"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    modifiers(&BearerAuth),
    paths(
        // Health
        health::health_check,
        health::database_check,
        // Auth
        auth::login,
        auth::me,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Stations
        stations::list_stations,
        stations::get_station,
        stations::create_station,
        stations::update_station,
        stations::delete_station,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment::get_history,
        // Inspections
        inspections::list_inspections,
        inspections::get_inspection,
        inspections::create_inspection,
        inspections::update_inspection,
        inspections::delete_inspection,
        inspections::complete_inspection,
        // Category inspections
        category_inspections::list_category_inspections,
        category_inspections::get_category_inspection,
        category_inspections::create_category_inspection,
        category_inspections::update_category_inspection,
        category_inspections::delete_category_inspection,
        category_inspections::complete_category_inspection,
        // Status
        status::equipment_status,
        status::dashboard,
        // Templates
        templates::list_templates,
        templates::get_template,
        // Vendors
        vendors::list_vendors,
        vendors::get_vendor,
        vendors::create_vendor,
        vendors::update_vendor,
        vendors::delete_vendor,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            crate::models::enums::UserRole,
            // Stations
            crate::models::station::Station,
            crate::models::station::CreateStation,
            crate::models::station::UpdateStation,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::HistoryEntry,
            crate::models::equipment::HistoryAction,
            crate::models::enums::EquipmentCategory,
            crate::models::enums::EquipmentStatus,
            // Inspections
            crate::models::inspection::Inspection,
            crate::models::inspection::CreateInspection,
            crate::models::inspection::UpdateInspection,
            crate::models::inspection::CompleteInspection,
            crate::models::inspection::CategoryInspection,
            crate::models::inspection::CreateCategoryInspection,
            crate::models::inspection::UpdateCategoryInspection,
            crate::models::inspection::CategoryInspectionCompletion,
            crate::models::enums::InspectionStatus,
            // Status
            crate::inspection::ResolvedStatus,
            crate::inspection::status::InspectionRef,
            crate::inspection::InspectionKind,
            crate::inspection::Severity,
            crate::inspection::StatusSummary,
            status::EquipmentStatusResponse,
            status::EquipmentStatusEntry,
            status::DashboardResponse,
            // Templates
            crate::inspection::InspectionTemplate,
            crate::inspection::templates::IntervalType,
            // Vendors
            crate::models::vendor::Vendor,
            crate::models::vendor::CreateVendor,
            crate::models::vendor::UpdateVendor,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
            crate::error::ErrorCode,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User management"),
        (name = "stations", description = "Fire stations"),
        (name = "equipment", description = "Equipment inventory and history"),
        (name = "inspections", description = "Individual inspections"),
        (name = "category-inspections", description = "Inspections applied to a whole equipment category"),
        (name = "status", description = "Derived inspection status"),
        (name = "templates", description = "Inspection templates"),
        (name = "vendors", description = "Outside vendors")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
