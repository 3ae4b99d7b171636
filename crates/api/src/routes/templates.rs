use crate::error::ApiError;
use crate::routes::reports::xlsx_attachment;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
};
use sheets::templates::TemplateKind;

#[utoipa::path(
        get,
        path = "/v1/templates/{kind}",
        params(("kind" = String, Path, description = "rooms | students")),
        responses(
            (status = 200, description = "Sample input workbook", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
            (status = 400, description = "Unknown template")
        )
    )]
pub async fn template(
    State(state): State<AppState>,
    Path(kind): Path<TemplateKind>,
) -> Result<Response, ApiError> {
    let bytes = kind.render(&state.settings.columns)?;
    Ok(xlsx_attachment(kind.as_str(), kind.file_name(), bytes))
}
