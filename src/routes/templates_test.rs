use super::*;
use serde_json::json;

use crate::state::test_helpers::test_app_state;

fn row() -> TemplateRow {
    TemplateRow {
        id: Uuid::nil(),
        name: "Weekly".into(),
        background_image_url: None,
        page_images: json!([]),
        style_config: json!({}),
        cover_page_config: json!({"elements": []}),
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    }
}

#[test]
fn rfc3339_formats_epoch() {
    assert_eq!(rfc3339(OffsetDateTime::UNIX_EPOCH), "1970-01-01T00:00:00Z");
}

#[test]
fn response_serializes_camel_case() {
    let value = serde_json::to_value(to_response(row())).unwrap();
    assert_eq!(value["name"], "Weekly");
    assert_eq!(value["coverPageConfig"], json!({"elements": []}));
    assert_eq!(value["createdAt"], "1970-01-01T00:00:00Z");
    assert!(value["backgroundImageUrl"].is_null());
    assert!(value.get("cover_page_config").is_none());
}

#[tokio::test]
async fn create_template_rejects_blank_name_before_db() {
    let state = test_app_state();
    let body = NewTemplate { name: "  ".into(), ..NewTemplate::default() };
    let result = create_template(State(state), Json(body)).await;
    assert_eq!(result.err(), Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn save_cover_page_rejects_non_object_before_db() {
    let state = test_app_state();
    let result = save_cover_page(State(state), Path(Uuid::nil()), Json(json!([1, 2, 3]))).await;
    assert_eq!(result.err(), Some(StatusCode::BAD_REQUEST));
}

#[test]
fn rfc3339_out_of_range_year_is_empty() {
    let ts = OffsetDateTime::UNIX_EPOCH.replace_year(-1).unwrap();
    assert_eq!(rfc3339(ts), "");
}
