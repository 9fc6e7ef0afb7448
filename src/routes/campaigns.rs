//! Campaign routes, including the public view and thumbnail renders.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use canvas::render::{self, Scene};
use canvas::svg::scene_to_svg;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::routes::service_error_to_status;
use crate::routes::templates::rfc3339;
use crate::services::campaign::{self, CampaignRow, NewCampaign};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResponse {
    pub id: Uuid,
    pub template_id: Uuid,
    pub name: String,
    pub campaign_date: Option<String>,
    pub products_per_page: i32,
    pub canvas_data: Value,
    pub created_at: String,
    pub updated_at: String,
}

pub(crate) fn to_response(row: CampaignRow) -> CampaignResponse {
    CampaignResponse {
        id: row.id,
        template_id: row.template_id,
        name: row.name,
        campaign_date: row.campaign_date,
        products_per_page: row.products_per_page,
        canvas_data: row.canvas_data,
        created_at: rfc3339(row.created_at),
        updated_at: rfc3339(row.updated_at),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCampaignsQuery {
    pub template_id: Option<Uuid>,
}

/// `?page=N`, 1-based. Missing or zero means the first page; values past the
/// end are clamped by the renderer.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

impl PageQuery {
    pub(crate) fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}

pub(crate) fn svg_response(svg: String) -> Response {
    (
        [(CONTENT_TYPE, "image/svg+xml; charset=utf-8"), (CACHE_CONTROL, "no-cache")],
        svg,
    )
        .into_response()
}

/// `GET /api/campaigns`: list campaigns, optionally `?templateId=`.
pub async fn list_campaigns(
    State(state): State<AppState>,
    Query(query): Query<ListCampaignsQuery>,
) -> Result<Json<Vec<CampaignResponse>>, StatusCode> {
    let rows = campaign::list_campaigns(&state.pool, query.template_id)
        .await
        .map_err(service_error_to_status)?;
    Ok(Json(rows.into_iter().map(to_response).collect()))
}

/// `POST /api/campaigns`: create a campaign and auto-layout its products.
pub async fn create_campaign(
    State(state): State<AppState>,
    Json(body): Json<NewCampaign>,
) -> Result<(StatusCode, Json<CampaignResponse>), StatusCode> {
    let valid = campaign::validate_new_campaign(body, state.config.default_products_per_page)
        .map_err(service_error_to_status)?;
    let row = campaign::create_campaign(&state.pool, valid)
        .await
        .map_err(service_error_to_status)?;
    Ok((StatusCode::CREATED, Json(to_response(row))))
}

/// `GET /api/campaigns/:id`: fetch one campaign.
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CampaignResponse>, StatusCode> {
    let row = campaign::get_campaign(&state.pool, id)
        .await
        .map_err(service_error_to_status)?;
    Ok(Json(to_response(row)))
}

/// `PUT /api/campaigns/:id/canvas`: replace the canvas document.
pub async fn save_canvas(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(document): Json<Value>,
) -> Result<Json<CampaignResponse>, StatusCode> {
    let row = campaign::save_canvas(&state.pool, id, &document)
        .await
        .map_err(service_error_to_status)?;
    Ok(Json(to_response(row)))
}

/// `GET /api/campaigns/:id/view?page=N`: public page as a scene.
pub async fn view_scene(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Scene>, StatusCode> {
    let (row, ctx) = campaign::load_for_render(&state.pool, id)
        .await
        .map_err(service_error_to_status)?;
    Ok(Json(render::view_scene(&row.document(), query.page(), &ctx)))
}

/// `GET /api/campaigns/:id/view.svg?page=N`: public page as SVG.
pub async fn view_svg(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Response, StatusCode> {
    let (row, ctx) = campaign::load_for_render(&state.pool, id)
        .await
        .map_err(service_error_to_status)?;
    let scene = render::view_scene(&row.document(), query.page(), &ctx);
    Ok(svg_response(scene_to_svg(&scene)))
}

/// `GET /api/campaigns/:id/thumbnail.svg`: page-1 preview for list views.
pub async fn thumbnail_svg(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, StatusCode> {
    let (row, ctx) = campaign::load_for_render(&state.pool, id)
        .await
        .map_err(service_error_to_status)?;
    let scene = render::thumbnail_scene(
        &row.document(),
        state.config.thumbnail_width,
        state.config.thumbnail_height,
        &ctx,
    );
    Ok(svg_response(scene_to_svg(&scene)))
}

#[cfg(test)]
#[path = "campaigns_test.rs"]
mod tests;
