use crate::error::ApiError;
use crate::routes::balance::{submit, JobCreated};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart, State},
    Json,
};
use seat_core::table::{rooms_from_table, students_from_table};
use types::{BalanceEnvelope, BalanceParams};
use utoipa::ToSchema;

/// Multipart form of `POST /v1/balance/upload`.
#[derive(ToSchema)]
pub struct UploadForm {
    /// Rooms workbook (.xlsx) with a room column.
    #[schema(value_type = String, format = Binary)]
    pub rooms: Vec<u8>,
    /// Students workbook (.xlsx) with identifier, class and name columns.
    #[schema(value_type = String, format = Binary)]
    pub students: Vec<u8>,
    /// JSON balance parameters. Server defaults apply when omitted.
    pub params: Option<String>,
}

fn multipart_error(e: MultipartError) -> ApiError {
    ApiError::bad_request(e.body_text())
}

fn read(field: &str, bytes: Option<Bytes>) -> Result<seat_core::table::RawTable, ApiError> {
    let bytes = bytes.ok_or_else(|| ApiError::bad_request(format!("missing file field: {field}")))?;
    sheets::read_table(&bytes).map_err(|e| ApiError::bad_request(format!("{field}: {e}")))
}

#[utoipa::path(
        post,
        path = "/v1/balance/upload",
        request_body(content = UploadForm, content_type = "multipart/form-data"),
        responses(
            (status = 200, description = "Job enqueued", body = JobCreated),
            (status = 400, description = "Unreadable workbook, missing columns or invalid input")
        )
    )]
pub async fn upload(
    State(state): State<AppState>,
    mut form: Multipart,
) -> Result<Json<JobCreated>, ApiError> {
    let (mut rooms, mut students, mut params) = (None, None, None);
    while let Some(field) = form.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(multipart_error)?;
        match name.as_str() {
            "rooms" => rooms = Some(data),
            "students" => students = Some(data),
            "params" => {
                let p: BalanceParams = serde_json::from_slice(&data)
                    .map_err(|e| ApiError::bad_request(format!("params: {e}")))?;
                params = Some(p);
            }
            _ => {}
        }
    }

    let rooms = read("rooms", rooms)?;
    let students = read("students", students)?;

    // Both tables are checked so that one answer names every missing column.
    let cols = &state.settings.columns;
    let (rooms, students) = match (
        rooms_from_table(&rooms, cols),
        students_from_table(&students, cols),
    ) {
        (Ok(r), Ok(s)) => (r, s),
        (r, s) => {
            let msg = [r.err(), s.err()]
                .into_iter()
                .flatten()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ApiError::bad_request(msg));
        }
    };

    let env = BalanceEnvelope {
        rooms,
        students,
        params: params.unwrap_or_else(|| state.settings.defaults.clone()),
    };
    submit(&state, env).map(Json)
}
