//! Auto-layout packer: places N products on pages of up to 8 products each.
//!
//! The packer is a pure function of its inputs. It runs once when a campaign
//! is created and the result is persisted; it is never re-run to reflow an
//! edited layout.
//!
//! Grid shapes by products on the page:
//!
//! | n | grid | rows |
//! |---|------|------|
//! | 1 | 1×1 | 1 |
//! | 2 | 2×1 | 2 |
//! | 3 | 3×1 | 3 |
//! | 4 | 2×2 | 2 / 2 |
//! | 5 | 3×2 | 3 / 2 |
//! | 6 | 3×2 | 3 / 3 |
//! | 7 | 4×2 | 4 / 3 |
//! | 8 | 4×2 | 4 / 4 |

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    LAYOUT_FILL, LAYOUT_GAP, LAYOUT_MARGIN, MAX_PRODUCTS_PER_PAGE, MIN_PRODUCT_HEIGHT, MIN_PRODUCT_WIDTH,
    PRODUCT_ASPECT,
};
use crate::doc::{CanvasDocument, PageSize};
use crate::element::{CanvasElement, ElementId, ProductRef};
use crate::geometry::Rect;

/// Where one product lands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub page: u32,
}

impl Placement {
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Columns × rows for a page holding `n` products.
#[must_use]
pub fn grid_shape(n: usize) -> (usize, usize) {
    match n {
        0 | 1 => (1, 1),
        2 => (2, 1),
        3 => (3, 1),
        4 => (2, 2),
        5 | 6 => (3, 2),
        _ => (4, 2),
    }
}

/// Items per row for a page holding `n` products, top row first.
#[must_use]
pub fn row_counts(n: usize) -> Vec<usize> {
    let (cols, rows) = grid_shape(n);
    if rows == 1 {
        return vec![n.max(1)];
    }
    vec![cols, n.saturating_sub(cols)]
}

/// Number of pages needed for `product_count` products.
#[must_use]
pub fn page_count(product_count: usize, per_page: usize) -> usize {
    product_count.div_ceil(clamp_per_page(per_page))
}

fn clamp_per_page(per_page: usize) -> usize {
    per_page.clamp(1, MAX_PRODUCTS_PER_PAGE)
}

/// Place `product_count` products, `per_page` (clamped to 1–8) per page.
///
/// The content band is the page minus `header_height` at the top and
/// `footer_height` at the bottom; pass zero for hidden zones. Output is in
/// product order: row-major within each page, pages in order.
#[must_use]
pub fn pack(
    product_count: usize,
    per_page: usize,
    page: PageSize,
    header_height: f64,
    footer_height: f64,
) -> Vec<Placement> {
    let per_page = clamp_per_page(per_page);
    let mut out = Vec::with_capacity(product_count);
    let mut remaining = product_count;
    let mut page_no: u32 = 1;

    while remaining > 0 {
        let on_page = per_page.min(remaining);
        out.extend(pack_page(on_page, page_no, page, header_height, footer_height));
        remaining -= on_page;
        page_no += 1;
    }
    out
}

fn pack_page(n: usize, page_no: u32, page: PageSize, header_height: f64, footer_height: f64) -> Vec<Placement> {
    let (cols, rows) = grid_shape(n);
    #[allow(clippy::cast_precision_loss)]
    let (cols_f, rows_f) = (cols as f64, rows as f64);

    let available_w = (page.width - 2.0 * LAYOUT_MARGIN).max(0.0);
    let content_top = header_height;
    let content_h = (page.height - header_height - footer_height).max(0.0);
    let available_h = (content_h - 2.0 * LAYOUT_MARGIN).max(0.0);

    let cell_w = (available_w - (cols_f - 1.0) * LAYOUT_GAP) / cols_f;
    let cell_h = (available_h - (rows_f - 1.0) * LAYOUT_GAP) / rows_f;
    let (item_w, item_h) = fit_item(cell_w, cell_h);

    let grid_h = rows_f * item_h + (rows_f - 1.0) * LAYOUT_GAP;
    let start_y = content_top + LAYOUT_MARGIN + (available_h - grid_h) / 2.0;

    let mut out = Vec::with_capacity(n);
    for (row, count) in row_counts(n).into_iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let (row_f, count_f) = (row as f64, count as f64);
        let row_w = count_f * item_w + (count_f - 1.0) * LAYOUT_GAP;
        let start_x = LAYOUT_MARGIN + (available_w - row_w) / 2.0;
        let y = start_y + row_f * (item_h + LAYOUT_GAP);
        for col in 0..count {
            #[allow(clippy::cast_precision_loss)]
            let x = start_x + col as f64 * (item_w + LAYOUT_GAP);
            out.push(Placement { x: x.round(), y: y.round(), width: item_w.round(), height: item_h.round(), page: page_no });
        }
    }
    out
}

/// Largest 4:5 box inside 90% of the cell, but never below the minimum tile.
fn fit_item(cell_w: f64, cell_h: f64) -> (f64, f64) {
    let max_w = cell_w.max(0.0) * LAYOUT_FILL;
    let max_h = cell_h.max(0.0) * LAYOUT_FILL;
    let (w, h) = if max_h <= 0.0 || max_w / max_h > PRODUCT_ASPECT {
        (max_h * PRODUCT_ASPECT, max_h)
    } else {
        (max_w, max_w / PRODUCT_ASPECT)
    };
    (w.max(MIN_PRODUCT_WIDTH), h.max(MIN_PRODUCT_HEIGHT))
}

/// Pack `products` into `doc`, growing the page count to fit.
///
/// Products are laid out from page 1 using the document's reserved header
/// and footer bands. Returns the ids of the new elements in product order.
pub fn place_products(doc: &mut CanvasDocument, products: &[ProductRef], per_page: usize) -> Vec<ElementId> {
    let placements = pack(products.len(), per_page, doc.dimensions(), doc.reserved_header(), doc.reserved_footer());
    let needed = placements.iter().map(|p| p.page).max().unwrap_or(1);
    doc.total_pages = doc.total_pages.max(needed);

    products
        .iter()
        .zip(placements)
        .map(|(product, placement)| doc.insert(CanvasElement::product(product, placement.rect(), placement.page)))
        .collect()
}
