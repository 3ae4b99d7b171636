use axum::Json;
use seat_core::audit::{audit as run_audit, AuditReport};
use serde::Deserialize;
use types::{BalanceParams, BalanceResult};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct AuditIn {
    pub result: BalanceResult,
    pub params: BalanceParams,
}

#[utoipa::path(
    post,
    path = "/v1/audit",
    request_body = AuditIn,
    responses(
    (status = 200, description = "Capacity and class-cap check of a result", body = AuditReport)
    )
)]
pub async fn audit(Json(input): Json<AuditIn>) -> Json<AuditReport> {
    Json(run_audit(&input.result, &input.params))
}
