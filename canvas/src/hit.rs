#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::CanvasDocument;
use crate::element::ElementId;
use crate::geometry::{Rect, ResizeAnchor};

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Test which element (if any) is under `logical_pt` on `page`.
///
/// Handles of the selected element are checked first: corners, then edges
/// (edge handles are not drawn, but the whole edge is grabbable within the
/// slop). Bodies are checked topmost-first. Rotation is ignored.
#[must_use]
pub fn hit_test(
    logical_pt: Point,
    doc: &CanvasDocument,
    page: u32,
    camera: &Camera,
    selected_id: Option<&str>,
) -> Option<Hit> {
    let slop = camera.screen_dist_to_logical(HANDLE_RADIUS_PX);

    if let Some(sel) = selected_id.and_then(|id| doc.get(id)).filter(|el| el.page == page) {
        let rect = sel.rect();
        for anchor in ResizeAnchor::CORNERS {
            let p = anchor.position(&rect);
            if (logical_pt.x - p.x).abs() <= slop && (logical_pt.y - p.y).abs() <= slop {
                return Some(Hit { element_id: sel.id.clone(), part: HitPart::ResizeHandle(anchor) });
            }
        }
        if let Some(anchor) = edge_under(logical_pt, &rect, slop) {
            return Some(Hit { element_id: sel.id.clone(), part: HitPart::ResizeHandle(anchor) });
        }
    }

    let elements: Vec<_> = doc.elements_on_page(page).collect();
    elements
        .into_iter()
        .rev()
        .find(|el| el.rect().contains(logical_pt))
        .map(|el| Hit { element_id: el.id.clone(), part: HitPart::Body })
}

fn edge_under(p: Point, rect: &Rect, slop: f64) -> Option<ResizeAnchor> {
    let within_x = p.x >= rect.x && p.x <= rect.right();
    let within_y = p.y >= rect.y && p.y <= rect.bottom();
    if within_x && (p.y - rect.y).abs() <= slop {
        Some(ResizeAnchor::N)
    } else if within_x && (p.y - rect.bottom()).abs() <= slop {
        Some(ResizeAnchor::S)
    } else if within_y && (p.x - rect.x).abs() <= slop {
        Some(ResizeAnchor::W)
    } else if within_y && (p.x - rect.right()).abs() <= slop {
        Some(ResizeAnchor::E)
    } else {
        None
    }
}
