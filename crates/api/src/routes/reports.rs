use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use jobs::JobStatus;
use sheets::ReportKind;
use std::fmt::Write;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// RFC 6266 header with an ASCII fallback and the UTF-8 name percent-encoded.
pub fn content_disposition(fallback: &str, file_name: &str) -> String {
    let mut encoded = String::with_capacity(file_name.len() * 3);
    for b in file_name.bytes() {
        if b.is_ascii_alphanumeric() || b"-_.~".contains(&b) {
            encoded.push(b as char);
        } else {
            let _ = write!(encoded, "%{b:02X}");
        }
    }
    format!(
        "attachment; filename=\"{fallback}.xlsx\"; filename*=UTF-8''{encoded}"
    )
}

/// Workbook bytes as an attachment named `file_name`.
pub fn xlsx_attachment(fallback: &str, file_name: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(fallback, file_name)),
        ],
        bytes,
    )
        .into_response()
}

#[utoipa::path(
        get,
        path = "/v1/jobs/{id}/reports/{kind}",
        params(
            ("id" = String, Path, description = "Job ID"),
            ("kind" = String, Path, description = "ready | reference | unassigned")
        ),
        responses(
            (status = 200, description = "xlsx workbook", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
            (status = 404, description = "Unknown job, or nobody left unassigned"),
            (status = 409, description = "Job not finished or failed")
        )
    )]
pub async fn download(
    State(state): State<AppState>,
    Path((id, kind)): Path<(String, ReportKind)>,
) -> Result<Response, ApiError> {
    let result = match state.jobs.get(&id) {
        Some(JobStatus::Done { result }) => result,
        Some(_) => return Err(ApiError::conflict("not ready")),
        None => return Err(ApiError::not_found(format!("job {id} not found"))),
    };

    let bytes = sheets::build_report(&result, &state.settings.columns, kind)?
        .ok_or_else(|| ApiError::not_found("every student was seated"))?;
    let name = state
        .settings
        .names
        .file_name(kind, chrono::Local::now().naive_local());

    Ok(xlsx_attachment(kind.as_str(), &name, bytes))
}
