//! Campaign service: creation with auto-layout, CRUD, and render context.
//!
//! DESIGN
//! ======
//! A campaign is created from a template. Its document starts as a copy of
//! the template's cover page with every product element removed, keeping
//! text, shapes, images, dates and the header/footer zones. The requested
//! products are then packed onto pages by `canvas::layout`. The packer runs
//! exactly once, at creation; later edits are saved verbatim and never
//! re-flowed.
//!
//! ERROR HANDLING
//! ==============
//! Unknown templates and campaigns surface as `NotFound`. Bad request fields
//! (blank name, per-page outside 1–8, unparseable date, product without id)
//! surface as `Invalid` before any query runs.

use canvas::consts::MAX_PRODUCTS_PER_PAGE;
use canvas::date::{format_campaign_date, parse_date};
use canvas::doc::CanvasDocument;
use canvas::element::{ElementKind, ProductRef, new_element_id};
use canvas::layout::place_products;
use canvas::render::RenderContext;
use serde::Deserialize;
use serde_json::Value;
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::template::{self, TemplateRow};
use super::{ServiceError, require_object, validate_name};

// =============================================================================
// TYPES
// =============================================================================

/// Row returned from campaign queries.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignRow {
    pub id: Uuid,
    pub template_id: Uuid,
    pub name: String,
    /// `YYYY-MM-DD`, or `None` when the campaign has no date.
    pub campaign_date: Option<String>,
    pub products_per_page: i32,
    pub canvas_data: Value,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl CampaignRow {
    /// The stored document, normalized for rendering.
    #[must_use]
    pub fn document(&self) -> CanvasDocument {
        CanvasDocument::from_json(&self.canvas_data)
    }
}

type CampaignTuple = (Uuid, Uuid, String, Option<String>, i32, Value, OffsetDateTime, OffsetDateTime);

impl From<CampaignTuple> for CampaignRow {
    fn from(row: CampaignTuple) -> Self {
        let (id, template_id, name, campaign_date, products_per_page, canvas_data, created_at, updated_at) = row;
        Self { id, template_id, name, campaign_date, products_per_page, canvas_data, created_at, updated_at }
    }
}

const CAMPAIGN_COLUMNS: &str = "id, template_id, name, campaign_date, products_per_page, canvas_data, \
                                created_at, updated_at";

/// Fields accepted when creating a campaign.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    pub template_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub campaign_date: Option<String>,
    #[serde(default)]
    pub products_per_page: Option<i64>,
    #[serde(default)]
    pub products: Vec<ProductRef>,
}

/// A `NewCampaign` after validation, ready to seed and insert.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCampaign {
    pub template_id: Uuid,
    pub name: String,
    pub campaign_date: Option<String>,
    pub products_per_page: usize,
    pub products: Vec<ProductRef>,
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Normalize and check a create request.
///
/// `default_per_page` applies when the request omits `productsPerPage`.
/// Dates are accepted as `YYYY-MM-DD` or an RFC 3339 timestamp and stored as
/// `YYYY-MM-DD`; a blank date means no date.
///
/// # Errors
///
/// Returns [`ServiceError::Invalid`] describing the first bad field.
pub fn validate_new_campaign(input: NewCampaign, default_per_page: usize) -> Result<ValidCampaign, ServiceError> {
    let name = validate_name(&input.name)?;

    let products_per_page = match input.products_per_page {
        None => default_per_page.clamp(1, MAX_PRODUCTS_PER_PAGE),
        Some(n) => match usize::try_from(n) {
            Ok(n) if (1..=MAX_PRODUCTS_PER_PAGE).contains(&n) => n,
            _ => {
                return Err(ServiceError::Invalid(format!(
                    "productsPerPage must be between 1 and {MAX_PRODUCTS_PER_PAGE}"
                )));
            }
        },
    };

    let campaign_date = match input.campaign_date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match parse_date(raw) {
            Some(date) => Some(format_campaign_date(Some(date), "YYYY-MM-DD")),
            None => return Err(ServiceError::Invalid(format!("unrecognized campaignDate {raw:?}"))),
        },
    };

    if input.products.iter().any(|p| p.id.trim().is_empty()) {
        return Err(ServiceError::Invalid("every product needs an id".into()));
    }

    Ok(ValidCampaign {
        template_id: input.template_id,
        name,
        campaign_date,
        products_per_page,
        products: input.products,
    })
}

// =============================================================================
// SEEDING
// =============================================================================

/// Build a campaign's initial document from a template cover page.
///
/// Non-product elements keep their position and page but get fresh ids.
/// Products are packed from page 1, growing the page count as needed.
#[must_use]
pub fn seed_document(template_doc: &Value, products: &[ProductRef], per_page: usize) -> CanvasDocument {
    let mut doc = CanvasDocument::from_json(template_doc);
    doc.elements.retain(|el| el.kind != ElementKind::Product);
    for el in &mut doc.elements {
        el.id = new_element_id();
    }
    place_products(&mut doc, products, per_page);
    doc
}

/// Everything the renderer needs besides the document itself.
#[must_use]
pub fn render_context(template: &TemplateRow, campaign: &CampaignRow) -> RenderContext {
    RenderContext {
        campaign_date: campaign.campaign_date.clone(),
        background_image_url: template.background_image_url.clone(),
        page_backgrounds: template::page_backgrounds(&template.page_images),
        currency_symbol: template::currency_symbol(&template.style_config),
    }
}

// =============================================================================
// CRUD
// =============================================================================

/// Seed and insert a validated campaign.
///
/// # Errors
///
/// Returns `NotFound` if the template does not exist, or a database error.
pub async fn create_campaign(pool: &PgPool, input: ValidCampaign) -> Result<CampaignRow, ServiceError> {
    let template = template::get_template(pool, input.template_id).await?;
    let doc = seed_document(&template.cover_page_config, &input.products, input.products_per_page);
    let per_page = i32::try_from(input.products_per_page)
        .map_err(|_| ServiceError::Invalid("productsPerPage out of range".into()))?;

    let id = Uuid::new_v4();
    let row = sqlx::query_as::<_, CampaignTuple>(&format!(
        "INSERT INTO campaigns (id, template_id, name, campaign_date, products_per_page, canvas_data)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {CAMPAIGN_COLUMNS}"
    ))
    .bind(id)
    .bind(input.template_id)
    .bind(&input.name)
    .bind(&input.campaign_date)
    .bind(per_page)
    .bind(doc.to_json())
    .fetch_one(pool)
    .await?;

    info!(
        %id,
        template_id = %input.template_id,
        products = input.products.len(),
        pages = doc.total_pages,
        "campaign created"
    );
    Ok(row.into())
}

/// Fetch one campaign.
///
/// # Errors
///
/// Returns `NotFound` if no campaign has this id, or a database error.
pub async fn get_campaign(pool: &PgPool, id: Uuid) -> Result<CampaignRow, ServiceError> {
    sqlx::query_as::<_, CampaignTuple>(&format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(CampaignRow::from)
        .ok_or(ServiceError::NotFound(id))
}

/// List campaigns newest first, optionally only those of one template.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_campaigns(pool: &PgPool, template_id: Option<Uuid>) -> Result<Vec<CampaignRow>, ServiceError> {
    let rows = sqlx::query_as::<_, CampaignTuple>(&format!(
        "SELECT {CAMPAIGN_COLUMNS} FROM campaigns
         WHERE $1::uuid IS NULL OR template_id = $1
         ORDER BY created_at DESC"
    ))
    .bind(template_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(CampaignRow::from).collect())
}

/// Replace the canvas document. Last writer wins.
///
/// # Errors
///
/// Returns `Invalid` for a non-object document, `NotFound` for an unknown
/// campaign, or a database error.
pub async fn save_canvas(pool: &PgPool, id: Uuid, document: &Value) -> Result<CampaignRow, ServiceError> {
    require_object(document, "canvasData")?;

    let row = sqlx::query_as::<_, CampaignTuple>(&format!(
        "UPDATE campaigns SET canvas_data = $2, updated_at = now()
         WHERE id = $1
         RETURNING {CAMPAIGN_COLUMNS}"
    ))
    .bind(id)
    .bind(document)
    .fetch_optional(pool)
    .await?
    .ok_or(ServiceError::NotFound(id))?;

    info!(%id, "campaign canvas saved");
    Ok(row.into())
}

/// Load a campaign together with the render context of its template.
///
/// # Errors
///
/// Returns `NotFound` for an unknown campaign, or a database error.
pub async fn load_for_render(pool: &PgPool, id: Uuid) -> Result<(CampaignRow, RenderContext), ServiceError> {
    let campaign = get_campaign(pool, id).await?;
    let template = template::get_template(pool, campaign.template_id).await?;
    let ctx = render_context(&template, &campaign);
    Ok((campaign, ctx))
}

#[cfg(test)]
#[path = "campaign_test.rs"]
mod tests;
