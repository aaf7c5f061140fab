//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Constructs an Axum router with the worker, license, license type, settings, alert, and
/// authentication endpoints registered. Each endpoint is annotated with OpenAPI specifications
/// via utoipa, which are collected into a unified OpenAPI document served alongside Swagger UI
/// at `/api/docs`.
///
/// # Returns
/// An Axum `Router<AppState>` configured with all routes, ready to be served once state and
/// the session layer are attached.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Heimdall", description = "Heimdall API"), tags(
        (name = controller::worker::WORKER_TAG, description = "Worker management API routes"),
        (name = controller::license::LICENSE_TAG, description = "License management API routes"),
        (name = controller::license_type::LICENSE_TYPE_TAG, description = "License type API routes"),
        (name = controller::setting::SETTING_TAG, description = "Alert settings API routes"),
        (name = controller::alert::ALERT_TAG, description = "Alert sweep and history API routes"),
        (name = controller::dashboard::DASHBOARD_TAG, description = "Dashboard API routes"),
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(
            controller::worker::list_workers,
            controller::worker::create_worker
        ))
        .routes(routes!(
            controller::worker::get_worker,
            controller::worker::update_worker,
            controller::worker::delete_worker
        ))
        .routes(routes!(
            controller::worker::get_required_license_types,
            controller::worker::set_required_license_types
        ))
        .routes(routes!(controller::license::create_license))
        .routes(routes!(controller::license::list_missing_licenses))
        .routes(routes!(
            controller::license::get_license,
            controller::license::update_license,
            controller::license::delete_license
        ))
        .routes(routes!(
            controller::license_type::list_license_types,
            controller::license_type::create_license_type
        ))
        .routes(routes!(
            controller::license_type::update_license_type,
            controller::license_type::delete_license_type
        ))
        .routes(routes!(
            controller::setting::get_settings,
            controller::setting::update_settings
        ))
        .routes(routes!(controller::alert::check_alerts))
        .routes(routes!(controller::alert::list_alert_logs))
        .routes(routes!(controller::dashboard::get_stats))
        .routes(routes!(controller::auth::send_code))
        .routes(routes!(controller::auth::verify_code))
        .split_for_parts();

    let routes = routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api));

    routes
}
