/// Liveness probe; answers as long as the router is up.
#[utoipa::path(
    get,
    path = "/v1/health",
    tag = "seatplan",
    responses((status = 200, description = "Service is up", body = String))
)]
pub async fn health() -> &'static str {
    "ok"
}
