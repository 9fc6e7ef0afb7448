//! Template routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

use crate::routes::service_error_to_status;
use crate::services::template::{self, NewTemplate, TemplateRow};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResponse {
    pub id: Uuid,
    pub name: String,
    pub background_image_url: Option<String>,
    pub page_images: Value,
    pub style_config: Value,
    pub cover_page_config: Value,
    pub created_at: String,
    pub updated_at: String,
}

pub(crate) fn to_response(row: TemplateRow) -> TemplateResponse {
    TemplateResponse {
        id: row.id,
        name: row.name,
        background_image_url: row.background_image_url,
        page_images: row.page_images,
        style_config: row.style_config,
        cover_page_config: row.cover_page_config,
        created_at: rfc3339(row.created_at),
        updated_at: rfc3339(row.updated_at),
    }
}

/// RFC 3339 text for a stored timestamp. Years outside 0..=9999 cannot be
/// represented; those are logged and returned as an empty string.
pub(crate) fn rfc3339(ts: OffsetDateTime) -> String {
    match ts.format(&Rfc3339) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, year = ts.year(), "timestamp not representable as RFC 3339");
            String::new()
        }
    }
}

/// `GET /api/templates`: list templates, newest first.
pub async fn list_templates(State(state): State<AppState>) -> Result<Json<Vec<TemplateResponse>>, StatusCode> {
    let rows = template::list_templates(&state.pool)
        .await
        .map_err(service_error_to_status)?;
    Ok(Json(rows.into_iter().map(to_response).collect()))
}

/// `POST /api/templates`: create a template.
pub async fn create_template(
    State(state): State<AppState>,
    Json(body): Json<NewTemplate>,
) -> Result<(StatusCode, Json<TemplateResponse>), StatusCode> {
    let valid = template::validate_new_template(body).map_err(service_error_to_status)?;
    let row = template::create_template(&state.pool, valid)
        .await
        .map_err(service_error_to_status)?;
    Ok((StatusCode::CREATED, Json(to_response(row))))
}

/// `GET /api/templates/:id`: fetch one template.
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TemplateResponse>, StatusCode> {
    let row = template::get_template(&state.pool, id)
        .await
        .map_err(service_error_to_status)?;
    Ok(Json(to_response(row)))
}

/// `PUT /api/templates/:id/cover-page`: replace the cover page document.
pub async fn save_cover_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(document): Json<Value>,
) -> Result<Json<TemplateResponse>, StatusCode> {
    let row = template::save_cover_page(&state.pool, id, &document)
        .await
        .map_err(service_error_to_status)?;
    Ok(Json(to_response(row)))
}

#[cfg(test)]
#[path = "templates_test.rs"]
mod tests;
