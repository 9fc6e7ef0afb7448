//! SVG serialization of a rendered [`Scene`].
//!
//! Produces a standalone document for thumbnails and the static public view.
//! Nodes are written in scene order (the document's paint order). Text is
//! single-line; wrapping is left to DOM hosts.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use std::fmt::{self, Write};

use crate::geometry::fmt_num as n;
use crate::render::{ImageSource, NodeContent, PriceBadge, RenderNode, Scene, ShapeNode, TextSpan};

const PLACEHOLDER_FILL: &str = "#e5e7eb";
const PLACEHOLDER_STROKE: &str = "#9ca3af";
const SELECTION_STROKE: &str = "#2563eb";

/// Serialize `scene` as an SVG document.
#[must_use]
pub fn scene_to_svg(scene: &Scene) -> String {
    let mut out = String::with_capacity(1024 + scene.nodes.len() * 256);
    match write_scene(&mut out, scene) {
        Ok(()) => out,
        Err(e) => {
            tracing::warn!(error = %e, page = scene.page, "svg serialization failed");
            String::new()
        }
    }
}

fn write_scene(out: &mut String, scene: &Scene) -> fmt::Result {
    let (w, h) = (n(scene.width), n(scene.height));
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;
    writeln!(out, r##"<rect x="0" y="0" width="{w}" height="{h}" fill="#ffffff"/>"##)?;
    if let Some(bg) = &scene.background {
        writeln!(
            out,
            r#"<image href="{}" x="0" y="0" width="{w}" height="{h}" preserveAspectRatio="xMidYMid slice"/>"#,
            escape(bg)
        )?;
    }
    for node in &scene.nodes {
        write_node(out, node)?;
    }
    for guide in &scene.guides {
        writeln!(
            out,
            r##"<rect x="0" y="{}" width="{w}" height="{}" fill="none" stroke="#94a3b8" stroke-dasharray="4 4"/>"##,
            n(guide.y),
            n(guide.height)
        )?;
    }
    writeln!(out, "</svg>")
}

fn write_node(out: &mut String, node: &RenderNode) -> fmt::Result {
    let cx = node.x + node.width / 2.0;
    let cy = node.y + node.height / 2.0;
    write!(out, r#"<g data-id="{}" transform="translate({} {})"#, escape(&node.id), n(node.x), n(node.y))?;
    if node.rotation.abs() > f64::EPSILON {
        write!(out, " rotate({} {} {})", n(node.rotation), n(cx - node.x), n(cy - node.y))?;
    }
    write!(out, "\"")?;
    if node.opacity < 1.0 {
        write!(out, r#" opacity="{}""#, n(node.opacity))?;
    }
    writeln!(out, ">")?;

    let (w, h) = (node.width, node.height);
    match &node.content {
        NodeContent::Product { image, name, badge } => {
            write_image(out, image, w, h, name)?;
            if let Some(badge) = badge {
                write_badge(out, badge)?;
            }
        }
        NodeContent::Text { span } | NodeContent::Date { span } => write_text(out, span, w, h)?,
        NodeContent::Shape { shape } => write_shape(out, shape, w, h)?,
        NodeContent::Image { image } => write_image(out, image, w, h, "")?,
        NodeContent::Zone { fill, image } => {
            writeln!(out, r#"<rect width="{}" height="{}" fill="{}"/>"#, n(w), n(h), escape(fill))?;
            if let Some(src) = image {
                write_image(out, &ImageSource::Url { src: src.clone() }, w, h, "")?;
            }
        }
    }

    if node.selected {
        writeln!(
            out,
            r#"<rect width="{}" height="{}" fill="none" stroke="{SELECTION_STROKE}" stroke-width="1"/>"#,
            n(w),
            n(h)
        )?;
        for handle in &node.handles {
            writeln!(
                out,
                r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#ffffff" stroke="{SELECTION_STROKE}"/>"##,
                n(handle.x),
                n(handle.y),
                n(handle.size),
                n(handle.size)
            )?;
        }
    }
    writeln!(out, "</g>")
}

fn write_image(out: &mut String, image: &ImageSource, w: f64, h: f64, alt: &str) -> fmt::Result {
    match image {
        ImageSource::Url { src } => {
            write!(
                out,
                r#"<image href="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid meet">"#,
                escape(src),
                n(w),
                n(h)
            )?;
            if !alt.is_empty() {
                write!(out, "<title>{}</title>", escape(alt))?;
            }
            writeln!(out, "</image>")
        }
        ImageSource::Placeholder => {
            // Framed box with a crossed-out picture glyph.
            writeln!(
                out,
                r#"<rect width="{}" height="{}" fill="{PLACEHOLDER_FILL}" stroke="{PLACEHOLDER_STROKE}"/>"#,
                n(w),
                n(h)
            )?;
            let s = (w.min(h) * 0.3).max(4.0);
            let (x0, y0) = ((w - s) / 2.0, (h - s) / 2.0);
            writeln!(
                out,
                r#"<path d="M {} {} L {} {} M {} {} L {} {}" stroke="{PLACEHOLDER_STROKE}" stroke-width="2"/>"#,
                n(x0),
                n(y0),
                n(x0 + s),
                n(y0 + s),
                n(x0 + s),
                n(y0),
                n(x0),
                n(y0 + s)
            )
        }
    }
}

fn write_badge(out: &mut String, badge: &PriceBadge) -> fmt::Result {
    writeln!(
        out,
        r##"<rect x="{}" y="{}" width="{}" height="{}" rx="4" fill="#dc2626"/>"##,
        n(badge.x),
        n(badge.y),
        n(badge.width),
        n(badge.height)
    )?;
    let cx = badge.x + badge.width / 2.0;
    let fs = badge.font_size;
    let mut baseline = badge.y + badge.height / 2.0 + fs * 0.35;
    if let Some(original) = &badge.original {
        let line_y = badge.y + badge.height / 3.0 + fs * 0.2;
        writeln!(
            out,
            r##"<text x="{}" y="{}" font-size="{}" fill="#fee2e2" text-anchor="middle" text-decoration="line-through">{}</text>"##,
            n(cx),
            n(line_y),
            n(fs * 0.8),
            escape(original)
        )?;
        baseline = badge.y + badge.height * 2.0 / 3.0 + fs * 0.35;
    }
    writeln!(
        out,
        r##"<text x="{}" y="{}" font-size="{}" font-weight="bold" fill="#ffffff" text-anchor="middle">{}</text>"##,
        n(cx),
        n(baseline),
        n(fs),
        escape(&badge.current)
    )
}

fn write_text(out: &mut String, span: &TextSpan, w: f64, h: f64) -> fmt::Result {
    if let Some(bg) = &span.background {
        writeln!(out, r#"<rect width="{}" height="{}" fill="{}"/>"#, n(w), n(h), escape(bg))?;
    }
    let (x, anchor) = match span.text_align.as_str() {
        "center" => (w / 2.0, "middle"),
        "right" => (w, "end"),
        _ => (0.0, "start"),
    };
    write!(
        out,
        r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" font-style="{}" fill="{}" text-anchor="{anchor}""#,
        n(x),
        n(span.font_size),
        escape(&span.font_family),
        n(span.font_size),
        escape(&span.font_weight),
        escape(&span.font_style),
        escape(&span.color)
    )?;
    if span.text_decoration != "none" {
        write!(out, r#" text-decoration="{}""#, escape(&span.text_decoration))?;
    }
    writeln!(out, ">{}</text>", escape(&span.text))
}

fn write_shape(out: &mut String, shape: &ShapeNode, w: f64, h: f64) -> fmt::Result {
    match shape {
        ShapeNode::Rectangle { fill, stroke, stroke_width } => writeln!(
            out,
            r#"<rect width="{}" height="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            n(w),
            n(h),
            escape(fill),
            escape(stroke),
            n(*stroke_width)
        ),
        ShapeNode::Circle { fill, stroke, stroke_width } => writeln!(
            out,
            r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            n(w / 2.0),
            n(h / 2.0),
            n(w / 2.0),
            n(h / 2.0),
            escape(fill),
            escape(stroke),
            n(*stroke_width)
        ),
        ShapeNode::Triangle { points, fill, stroke, stroke_width } => writeln!(
            out,
            r#"<svg width="{}" height="{}" viewBox="0 0 100 100" preserveAspectRatio="none"><polygon points="{}" fill="{}" stroke="{}" stroke-width="{}" vector-effect="non-scaling-stroke"/></svg>"#,
            n(w),
            n(h),
            escape(points),
            escape(fill),
            escape(stroke),
            n(*stroke_width)
        ),
        ShapeNode::Line { color, thickness, y } => writeln!(
            out,
            r#"<rect x="0" y="{}" width="{}" height="{}" fill="{}"/>"#,
            n(*y),
            n(w),
            n(*thickness),
            escape(color)
        ),
        ShapeNode::Freehand { d, stroke, stroke_width } => writeln!(
            out,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            escape(d),
            escape(stroke),
            n(*stroke_width)
        ),
    }
}

/// Escape text for XML attribute and element content.
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
