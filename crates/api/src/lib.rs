pub mod config;
pub mod error;
pub mod state;
pub mod telemetry;
pub mod routes {
    pub mod audit;
    pub mod balance;
    pub mod health;
    pub mod jobs;
    pub mod reports;
    pub mod templates;
    pub mod upload;
    pub mod validate;
}

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            routes::health::health,
            routes::validate::validate_handler,
            routes::balance::balance,
            routes::upload::upload,
            routes::jobs::status,
            routes::jobs::result,
            routes::reports::download,
            routes::templates::template,
            routes::audit::audit,
        ),
        components(schemas(
            types::BalanceEnvelope, types::Room, types::Student, types::BalanceParams,
            types::BalanceResult, types::RoomAllocation, types::Counts, types::BalanceStats,
            types::Improvement, types::StudentId, types::ClassLabel, types::RoomId,
            jobs::JobId, jobs::JobStatus,
            seat_core::audit::AuditReport, seat_core::audit::RoomOverflow,
            seat_core::audit::ClassOverflow,
            routes::validate::ValidationReport,
            routes::balance::JobCreated,
            routes::balance::BalanceIn,
            routes::upload::UploadForm,
            routes::audit::AuditIn,
        )),
        tags(
            (name = "seatplan", description = "Exam room seating API")
        )
    )]
pub struct ApiDoc;

pub fn app(app_state: state::AppState) -> Router {
    let layers = telemetry::stack(&app_state.settings);
    Router::new()
        .route("/v1/health", get(routes::health::health))
        .route("/v1/validate", post(routes::validate::validate_handler))
        .route("/v1/balance", post(routes::balance::balance))
        .route("/v1/balance/upload", post(routes::upload::upload))
        .route("/v1/templates/:kind", get(routes::templates::template))
        .route("/v1/audit", post(routes::audit::audit))
        .route("/v1/jobs/:id", get(routes::jobs::status))
        .route("/v1/jobs/:id/result", get(routes::jobs::result))
        .route("/v1/jobs/:id/reports/:kind", get(routes::reports::download))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(layers)
        .with_state(app_state)
}
