#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use serde_json::json;

use super::*;
use crate::camera::Point;
use crate::geometry::Rect;

// =============================================================
// Helpers
// =============================================================

fn element(kind: ElementKind, data: serde_json::Value) -> CanvasElement {
    let mut el = CanvasElement::new(kind, Rect::new(100.0, 200.0, 200.0, 300.0), 1).with_data(data);
    el.id = "el".to_owned();
    el
}

fn render(el: &CanvasElement, scale: f64) -> RenderNode {
    render_element(el, scale, RenderMode::View, &RenderContext::default()).unwrap()
}

fn product(data: serde_json::Value) -> CanvasElement {
    element(ElementKind::Product, data)
}

// =============================================================
// Geometry and state
// =============================================================

#[test]
fn node_geometry_is_scaled() {
    let node = render(&element(ElementKind::Image, json!({})), 0.5);
    assert_eq!((node.x, node.y, node.width, node.height), (50.0, 100.0, 100.0, 150.0));
}

#[test]
fn opacity_and_rotation_carry_over() {
    let mut el = element(ElementKind::Text, json!({ "text": "hi" }));
    el.opacity = 40;
    el.rotation = 30.0;
    let node = render(&el, 1.0);
    assert_eq!(node.opacity, 0.4);
    assert_eq!(node.rotation, 30.0);
}

#[test]
fn unknown_kind_renders_nothing() {
    let el = element(ElementKind::Other("sticker".to_owned()), json!({}));
    assert!(render_element(&el, 1.0, RenderMode::View, &RenderContext::default()).is_none());
}

#[test]
fn selection_only_in_editor() {
    let el = element(ElementKind::Image, json!({}));
    let ctx = RenderContext::default();

    let node = render_element(&el, 1.0, RenderMode::Editor { selected: Some("el") }, &ctx).unwrap();
    assert!(node.selected && node.interactive);
    assert_eq!(node.handles.len(), 4);
    assert_eq!(node.handles[2].anchor, ResizeAnchor::Se);
    assert_eq!(node.handles[2].x, 200.0 - HANDLE_SIZE_PX / 2.0);

    let node = render_element(&el, 1.0, RenderMode::Editor { selected: Some("other") }, &ctx).unwrap();
    assert!(!node.selected && node.interactive);
    assert!(node.handles.is_empty());

    let node = render_element(&el, 1.0, RenderMode::Thumbnail, &ctx).unwrap();
    assert!(!node.interactive);
}

// =============================================================
// Per-kind content
// =============================================================

#[test]
fn text_font_size_scales() {
    let node = render(&element(ElementKind::Text, json!({ "text": "Sale", "fontSize": 40 })), 0.5);
    let NodeContent::Text { span } = node.content else {
        panic!("expected text content");
    };
    assert_eq!(span.text, "Sale");
    assert_eq!(span.font_size, 20.0);
}

#[test]
fn date_uses_campaign_date() {
    let ctx = RenderContext { campaign_date: Some("2025-12-21".to_owned()), ..RenderContext::default() };
    let el = element(ElementKind::Date, json!({ "dateFormat": "DD/MM/YYYY" }));
    let node = render_element(&el, 1.0, RenderMode::View, &ctx).unwrap();
    let NodeContent::Date { span } = node.content else {
        panic!("expected date content");
    };
    assert_eq!(span.text, "21/12/2025");
}

#[test]
fn date_without_campaign_date_shows_pattern() {
    let node = render(&element(ElementKind::Date, json!({ "dateFormat": "DD/MM/YYYY" })), 1.0);
    let NodeContent::Date { span } = node.content else {
        panic!("expected date content");
    };
    assert_eq!(span.text, "DD/MM/YYYY");
}

#[test]
fn date_override_beats_campaign_date() {
    let ctx = RenderContext { campaign_date: Some("2025-12-21".to_owned()), ..RenderContext::default() };
    let el = element(ElementKind::Date, json!({ "date": "2026-01-02", "dateFormat": "YYYY-MM-DD" }));
    let node = render_element(&el, 1.0, RenderMode::View, &ctx).unwrap();
    let NodeContent::Date { span } = node.content else {
        panic!("expected date content");
    };
    assert_eq!(span.text, "2026-01-02");
}

#[test]
fn image_without_url_is_placeholder() {
    let node = render(&element(ElementKind::Image, json!({})), 1.0);
    assert_eq!(node.content, NodeContent::Image { image: ImageSource::Placeholder });
}

#[test]
fn shapes_map_to_nodes() {
    let node = render(&element(ElementKind::Shape, json!({ "shapeType": "triangle", "strokeWidth": 4 })), 0.5);
    let NodeContent::Shape { shape: ShapeNode::Triangle { points, stroke_width, .. } } = node.content else {
        panic!("expected triangle");
    };
    assert_eq!(points, TRIANGLE_POINTS);
    assert_eq!(stroke_width, 2.0);

    let node = render(&element(ElementKind::Shape, json!({ "shapeType": "line", "strokeWidth": 4 })), 1.0);
    let NodeContent::Shape { shape: ShapeNode::Line { thickness, y, .. } } = node.content else {
        panic!("expected line");
    };
    assert_eq!(thickness, 4.0);
    assert_eq!(y, 148.0);
}

#[test]
fn freehand_path_is_scaled() {
    let el = CanvasElement::freehand(&[Point::new(0.0, 0.0), Point::new(100.0, 40.0)], "#000", 2.0, 1).unwrap();
    let node = render(&el, 0.5);
    let NodeContent::Shape { shape: ShapeNode::Freehand { d, .. } } = node.content else {
        panic!("expected freehand");
    };
    assert_eq!(d, "M 0 0 L 50 20");
}

// =============================================================
// Products
// =============================================================

#[test]
fn product_badge_covers_one_sixth() {
    let node = render(&product(json!({ "product": { "id": "p", "name": "Tea", "price": 4.5 } })), 1.0);
    let NodeContent::Product { badge: Some(badge), name, .. } = node.content else {
        panic!("expected product with badge");
    };
    assert_eq!(name, "Tea");
    let area = badge.width * badge.height;
    assert!((area - 200.0 * 300.0 / 6.0).abs() < 1e-6);
    assert!((badge.x + badge.width - 200.0).abs() < 1e-9);
    assert!((badge.y + badge.height - 300.0).abs() < 1e-9);
    assert_eq!(badge.current, "4.50");
    assert!(badge.original.is_none());
}

#[test]
fn product_badge_shows_discount_with_currency() {
    let ctx = RenderContext { currency_symbol: Some("$".to_owned()), ..RenderContext::default() };
    let el = product(json!({ "product": { "id": "p", "price": 10, "discountPrice": 8 } }));
    let node = render_element(&el, 1.0, RenderMode::View, &ctx).unwrap();
    let NodeContent::Product { badge: Some(badge), .. } = node.content else {
        panic!("expected badge");
    };
    assert_eq!(badge.original.as_deref(), Some("$10.00"));
    assert_eq!(badge.current, "$8.00");
}

#[test]
fn product_without_price_or_image() {
    let node = render(&product(json!({ "product": { "id": "p", "name": "Mystery" } })), 1.0);
    let NodeContent::Product { badge, image, .. } = node.content else {
        panic!("expected product");
    };
    assert!(badge.is_none());
    assert_eq!(image, ImageSource::Placeholder);
}

// =============================================================
// Scenes
// =============================================================

fn doc() -> CanvasDocument {
    let mut doc = CanvasDocument::default();
    doc.total_pages = 3;
    doc.insert(element(ElementKind::Image, json!({})));
    let mut second = element(ElementKind::Text, json!({ "text": "p2" }));
    second.id = "p2".to_owned();
    second.page = 2;
    doc.insert(second);
    doc
}

#[test]
fn editor_scene_zoom_changes_scale_not_layout() {
    let doc = doc();
    let ctx = RenderContext::default();
    let at_100 = editor_scene(&doc, &Camera::default(), 1, None, &ctx);
    let at_200 = editor_scene(&doc, &Camera { zoom_percent: 200.0, ..Camera::default() }, 1, None, &ctx);
    assert_eq!(at_100.scale, 0.5);
    assert_eq!(at_200.scale, 1.0);
    assert_eq!(at_200.nodes[0].x / at_200.scale, at_100.nodes[0].x / at_100.scale);
    assert_eq!(doc.elements[0].x, 100.0);
}

#[test]
fn editor_scene_adds_zone_guides() {
    let mut doc = doc();
    doc.show_header_zone = true;
    doc.show_footer_zone = true;
    let scene = editor_scene(&doc, &Camera::default(), 1, None, &RenderContext::default());
    assert_eq!(scene.guides.len(), 2);
    assert_eq!(scene.guides[0].height, 50.0);
    assert_eq!(scene.guides[1].y, (1123.0 - 80.0) * 0.5);
}

#[test]
fn view_scene_clamps_page_and_paginates() {
    let doc = doc();
    let scene = view_scene(&doc, 9, &RenderContext::default());
    assert_eq!(scene.page, 3);
    assert_eq!(scene.scale, VIEW_SCALE);
    assert_eq!(scene.pagination, Some(Pagination { page: 3, total_pages: 3, has_prev: true, has_next: false }));

    let scene = view_scene(&doc, 2, &RenderContext::default());
    assert_eq!(scene.nodes.len(), 1);
    assert_eq!(scene.nodes[0].id, "p2");
    assert!(scene.guides.is_empty());
}

#[test]
fn thumbnail_fits_container_and_shows_page_one() {
    let doc = doc();
    let scene = default_thumbnail_scene(&doc, &RenderContext::default());
    assert_eq!(scene.page, 1);
    assert!(scene.width <= THUMBNAIL_WIDTH + 1e-9);
    assert!(scene.height <= THUMBNAIL_HEIGHT + 1e-9);
    assert_eq!(scene.nodes.len(), 1);
    assert!(!scene.nodes[0].interactive);
}

#[test]
fn background_prefers_page_override() {
    let mut ctx = RenderContext { background_image_url: Some("bg.png".to_owned()), ..RenderContext::default() };
    ctx.page_backgrounds.insert(2, "page2.png".to_owned());
    assert_eq!(ctx.background_for(1).as_deref(), Some("bg.png"));
    assert_eq!(ctx.background_for(2).as_deref(), Some("page2.png"));
}

#[test]
fn fit_scale_picks_limiting_axis() {
    assert_eq!(fit_scale(800.0, 400.0, 200.0, 160.0), 0.25);
    assert_eq!(fit_scale(0.0, 400.0, 200.0, 160.0), 1.0);
}
