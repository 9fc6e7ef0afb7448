use serde_json::json;

use super::*;
use crate::camera::Camera;
use crate::doc::CanvasDocument;
use crate::element::{CanvasElement, ElementKind};
use crate::geometry::Rect;
use crate::render::{RenderContext, editor_scene, view_scene};

fn doc_with(el: CanvasElement) -> CanvasDocument {
    let mut doc = CanvasDocument::default();
    doc.insert(el);
    doc
}

fn view_svg(doc: &CanvasDocument, ctx: &RenderContext) -> String {
    scene_to_svg(&view_scene(doc, 1, ctx))
}

#[test]
fn empty_page_is_well_formed() {
    let svg = view_svg(&CanvasDocument::default(), &RenderContext::default());
    assert!(svg.starts_with("<svg "));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains(r#"width="397" height="561.5""#));
}

#[test]
fn background_image_is_drawn_first() {
    let ctx = RenderContext { background_image_url: Some("https://cdn/bg.png".to_owned()), ..RenderContext::default() };
    let svg = view_svg(&doc_with(CanvasElement::new(ElementKind::Image, Rect::new(0.0, 0.0, 50.0, 50.0), 1)), &ctx);
    let bg = svg.find("https://cdn/bg.png").unwrap();
    let node = svg.find("<g ").unwrap();
    assert!(bg < node);
}

#[test]
fn text_is_escaped() {
    let el = CanvasElement::new(ElementKind::Text, Rect::new(0.0, 0.0, 100.0, 40.0), 1)
        .with_data(json!({ "text": "Fish & <Chips>" }));
    let svg = view_svg(&doc_with(el), &RenderContext::default());
    assert!(svg.contains("Fish &amp; &lt;Chips&gt;"));
    assert!(!svg.contains("<Chips>"));
}

#[test]
fn rotation_and_opacity_on_group() {
    let mut el = CanvasElement::new(ElementKind::Image, Rect::new(0.0, 0.0, 100.0, 100.0), 1);
    el.rotation = 45.0;
    el.opacity = 50;
    let svg = view_svg(&doc_with(el), &RenderContext::default());
    assert!(svg.contains("rotate(45 25 25)"));
    assert!(svg.contains(r#"opacity="0.5""#));
}

#[test]
fn discounted_product_strikes_original_price() {
    let el = CanvasElement::new(ElementKind::Product, Rect::new(0.0, 0.0, 200.0, 250.0), 1)
        .with_data(json!({ "product": { "id": "p", "price": 10, "discountPrice": 8 } }));
    let svg = view_svg(&doc_with(el), &RenderContext::default());
    assert!(svg.contains("line-through"));
    assert!(svg.contains(">10.00</text>"));
    assert!(svg.contains(">8.00</text>"));
}

#[test]
fn placeholder_image_draws_frame() {
    let el = CanvasElement::new(ElementKind::Image, Rect::new(0.0, 0.0, 100.0, 100.0), 1);
    let svg = view_svg(&doc_with(el), &RenderContext::default());
    assert!(svg.contains(PLACEHOLDER_FILL));
    assert!(!svg.contains("<image"));
}

#[test]
fn selected_element_draws_handles() {
    let mut el = CanvasElement::new(ElementKind::Image, Rect::new(0.0, 0.0, 100.0, 100.0), 1);
    el.id = "sel".to_owned();
    let doc = doc_with(el);
    let svg = scene_to_svg(&editor_scene(&doc, &Camera::default(), 1, Some("sel"), &RenderContext::default()));
    assert_eq!(svg.matches(SELECTION_STROKE).count(), 5);
}

#[test]
fn escape_all_xml_specials() {
    assert_eq!(escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&apos;&amp;&apos;&lt;/a&gt;");
}
