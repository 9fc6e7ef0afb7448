//! Template service: CRUD for templates and their cover page documents.
//!
//! DESIGN
//! ======
//! A template carries a shared background, optional per-page background
//! images, a free-form style object, and the cover page canvas document.
//! Campaigns are seeded from the cover page document (see
//! `services::campaign`). Documents are stored verbatim; the only check on
//! save is that the value is a JSON object.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::{ServiceError, require_object, validate_name};

// =============================================================================
// TYPES
// =============================================================================

/// Row returned from template queries.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateRow {
    pub id: Uuid,
    pub name: String,
    pub background_image_url: Option<String>,
    pub page_images: Value,
    pub style_config: Value,
    pub cover_page_config: Value,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

type TemplateTuple = (Uuid, String, Option<String>, Value, Value, Value, OffsetDateTime, OffsetDateTime);

impl From<TemplateTuple> for TemplateRow {
    fn from(row: TemplateTuple) -> Self {
        let (id, name, background_image_url, page_images, style_config, cover_page_config, created_at, updated_at) =
            row;
        Self { id, name, background_image_url, page_images, style_config, cover_page_config, created_at, updated_at }
    }
}

const TEMPLATE_COLUMNS: &str = "id, name, background_image_url, page_images, style_config, cover_page_config, \
                                created_at, updated_at";

/// Fields accepted when creating a template.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub name: String,
    #[serde(default)]
    pub background_image_url: Option<String>,
    #[serde(default)]
    pub page_images: Option<Value>,
    #[serde(default)]
    pub style_config: Option<Value>,
    #[serde(default)]
    pub cover_page_config: Option<Value>,
}

/// A `NewTemplate` after validation, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTemplate {
    pub name: String,
    pub background_image_url: Option<String>,
    pub page_images: Value,
    pub style_config: Value,
    pub cover_page_config: Value,
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Normalize and check a create request.
///
/// Blank background URLs are dropped. `pageImages` may be an array or an
/// object keyed by page number; `styleConfig` and `coverPageConfig` must be
/// objects when present.
///
/// # Errors
///
/// Returns [`ServiceError::Invalid`] describing the first bad field.
pub fn validate_new_template(input: NewTemplate) -> Result<ValidTemplate, ServiceError> {
    let name = validate_name(&input.name)?;

    let page_images = input.page_images.unwrap_or_else(|| Value::Array(Vec::new()));
    if !(page_images.is_array() || page_images.is_object()) {
        return Err(ServiceError::Invalid("pageImages must be an array or object".into()));
    }

    let style_config = input.style_config.unwrap_or_else(|| serde_json::json!({}));
    require_object(&style_config, "styleConfig")?;

    let cover_page_config = input.cover_page_config.unwrap_or_else(|| serde_json::json!({}));
    require_object(&cover_page_config, "coverPageConfig")?;

    Ok(ValidTemplate {
        name,
        background_image_url: input.background_image_url.filter(|url| !url.trim().is_empty()),
        page_images,
        style_config,
        cover_page_config,
    })
}

// =============================================================================
// BACKGROUNDS & STYLE
// =============================================================================

/// Per-page background images keyed by 1-based page number.
///
/// Arrays map index `i` to page `i + 1`; objects map numeric keys directly.
/// Entries that are not non-empty strings, and keys that are not positive
/// integers, are skipped.
#[must_use]
pub fn page_backgrounds(page_images: &Value) -> BTreeMap<u32, String> {
    let mut out = BTreeMap::new();
    match page_images {
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                let (Ok(page), Some(url)) = (u32::try_from(idx + 1), non_empty_str(item)) else {
                    continue;
                };
                out.insert(page, url.to_owned());
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                let (Ok(page), Some(url)) = (key.trim().parse::<u32>(), non_empty_str(item)) else {
                    continue;
                };
                if page >= 1 {
                    out.insert(page, url.to_owned());
                }
            }
        }
        _ => {}
    }
    out
}

/// Currency prefix for price labels, read from `styleConfig.currencySymbol`.
#[must_use]
pub fn currency_symbol(style_config: &Value) -> Option<String> {
    style_config.get("currencySymbol").and_then(non_empty_str).map(str::to_owned)
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}

// =============================================================================
// CRUD
// =============================================================================

/// Insert a validated template.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_template(pool: &PgPool, input: ValidTemplate) -> Result<TemplateRow, ServiceError> {
    let id = Uuid::new_v4();
    let row = sqlx::query_as::<_, TemplateTuple>(&format!(
        "INSERT INTO templates (id, name, background_image_url, page_images, style_config, cover_page_config)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {TEMPLATE_COLUMNS}"
    ))
    .bind(id)
    .bind(&input.name)
    .bind(&input.background_image_url)
    .bind(&input.page_images)
    .bind(&input.style_config)
    .bind(&input.cover_page_config)
    .fetch_one(pool)
    .await?;

    info!(%id, name = %input.name, "template created");
    Ok(row.into())
}

/// Fetch one template.
///
/// # Errors
///
/// Returns `NotFound` if no template has this id, or a database error.
pub async fn get_template(pool: &PgPool, id: Uuid) -> Result<TemplateRow, ServiceError> {
    sqlx::query_as::<_, TemplateTuple>(&format!("SELECT {TEMPLATE_COLUMNS} FROM templates WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(TemplateRow::from)
        .ok_or(ServiceError::NotFound(id))
}

/// List all templates, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_templates(pool: &PgPool) -> Result<Vec<TemplateRow>, ServiceError> {
    let rows = sqlx::query_as::<_, TemplateTuple>(&format!(
        "SELECT {TEMPLATE_COLUMNS} FROM templates ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(TemplateRow::from).collect())
}

/// Replace the cover page document. Last writer wins.
///
/// # Errors
///
/// Returns `Invalid` for a non-object document, `NotFound` for an unknown
/// template, or a database error.
pub async fn save_cover_page(pool: &PgPool, id: Uuid, document: &Value) -> Result<TemplateRow, ServiceError> {
    require_object(document, "coverPageConfig")?;

    let row = sqlx::query_as::<_, TemplateTuple>(&format!(
        "UPDATE templates SET cover_page_config = $2, updated_at = now()
         WHERE id = $1
         RETURNING {TEMPLATE_COLUMNS}"
    ))
    .bind(id)
    .bind(document)
    .fetch_optional(pool)
    .await?
    .ok_or(ServiceError::NotFound(id))?;

    info!(%id, "template cover page saved");
    Ok(row.into())
}

#[cfg(test)]
#[path = "template_test.rs"]
mod tests;
