use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use types::{BalanceEnvelope, BalanceParams, Room, Student};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct BalanceIn {
    pub rooms: Vec<Room>,
    pub students: Vec<Student>,
    /// Server defaults apply when omitted.
    #[serde(default)]
    pub params: Option<BalanceParams>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobCreated {
    pub job_id: String,
    pub status: &'static str,
}

#[utoipa::path(
        post,
        path = "/v1/balance",
        request_body = BalanceIn,
        responses(
            (status = 200, description = "Job enqueued", body = JobCreated),
            (status = 400, description = "Input rejected before balancing")
        )
    )]
pub async fn balance(
    State(state): State<AppState>,
    Json(input): Json<BalanceIn>,
) -> Result<Json<JobCreated>, ApiError> {
    let env = BalanceEnvelope {
        rooms: input.rooms,
        students: input.students,
        params: input
            .params
            .unwrap_or_else(|| state.settings.defaults.clone()),
    };
    submit(&state, env).map(Json)
}

/// Normalizes and validates `env`, then queues it.
pub(crate) fn submit(state: &AppState, env: BalanceEnvelope) -> Result<JobCreated, ApiError> {
    let env = seat_core::normalize(env);
    seat_core::validate(&env).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let id = state.jobs.enqueue(env);
    Ok(JobCreated {
        job_id: id.0,
        status: "queued",
    })
}
