//! API handlers for the Fire Gear Tracker REST endpoints

pub mod auth;
pub mod category_inspections;
pub mod equipment;
pub mod health;
pub mod inspections;
pub mod openapi;
pub mod stations;
pub mod status;
pub mod templates;
pub mod users;
pub mod vendors;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post},
    Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// JSON body that may be left out. An empty body gives `T::default()`;
/// anything else must deserialize as `T`.
pub struct OptionalJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalJson(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(OptionalJson)
            .map_err(|e| AppError::Validation(format!("Invalid request body: {}", e)))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health
        .route("/health", get(health::health_check))
        .route("/health/database", get(health::database_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
        // Stations
        .route("/stations", get(stations::list_stations).post(stations::create_station))
        .route(
            "/stations/:id",
            get(stations::get_station)
                .put(stations::update_station)
                .delete(stations::delete_station),
        )
        // Equipment
        .route("/equipment", get(equipment::list_equipment).post(equipment::create_equipment))
        .route(
            "/equipment/:id",
            get(equipment::get_equipment)
                .put(equipment::update_equipment)
                .delete(equipment::delete_equipment),
        )
        .route("/equipment/:id/history", get(equipment::get_history))
        .route("/equipment/:id/inspection-status", get(status::equipment_status))
        // Individual inspections
        .route(
            "/inspections",
            get(inspections::list_inspections).post(inspections::create_inspection),
        )
        .route(
            "/inspections/:id",
            get(inspections::get_inspection)
                .put(inspections::update_inspection)
                .delete(inspections::delete_inspection),
        )
        .route("/inspections/:id/complete", post(inspections::complete_inspection))
        // Category inspections
        .route(
            "/category-inspections",
            get(category_inspections::list_category_inspections)
                .post(category_inspections::create_category_inspection),
        )
        .route(
            "/category-inspections/:id",
            get(category_inspections::get_category_inspection)
                .put(category_inspections::update_category_inspection)
                .delete(category_inspections::delete_category_inspection),
        )
        .route(
            "/category-inspections/:id/complete",
            post(category_inspections::complete_category_inspection),
        )
        // Status dashboard
        .route("/inspection-status", get(status::dashboard))
        // Templates
        .route("/templates", get(templates::list_templates))
        .route("/templates/:id", get(templates::get_template))
        // Vendors
        .route("/vendors", get(vendors::list_vendors).post(vendors::create_vendor))
        .route(
            "/vendors/:id",
            get(vendors::get_vendor)
                .put(vendors::update_vendor)
                .delete(vendors::delete_vendor),
        )
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inspection::CompleteInspection;
    use axum::body::Body;

    async fn extract(body: &'static str) -> Result<CompleteInspection, AppError> {
        let req = Request::new(Body::from(body));
        OptionalJson::<CompleteInspection>::from_request(req, &())
            .await
            .map(|OptionalJson(data)| data)
    }

    #[tokio::test]
    async fn test_empty_body_means_no_notes() {
        assert_eq!(extract("").await.unwrap().notes, None);
        assert_eq!(extract(" \n").await.unwrap().notes, None);
    }

    #[tokio::test]
    async fn test_body_with_notes() {
        let data = extract(r#"{"notes": "Hydro test passed"}"#).await.unwrap();
        assert_eq!(data.notes.as_deref(), Some("Hydro test passed"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        assert!(matches!(extract(r#"{"notes": "#).await, Err(AppError::Validation(_))));
        assert!(matches!(extract(r#"{"notes": 5}"#).await, Err(AppError::Validation(_))));
    }
}
