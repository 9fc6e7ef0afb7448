#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;
use crate::doc::CanvasSize;
use crate::element::ElementKind;

fn a4() -> PageSize {
    CanvasSize::A4Portrait.dimensions()
}

fn products(n: usize) -> Vec<ProductRef> {
    (0..n)
        .map(|i| ProductRef {
            id: format!("p{i}"),
            name: format!("Product {i}"),
            price: Some(9.99),
            discount_price: None,
            image_url: None,
            sku: None,
        })
        .collect()
}

fn rows_of(placements: &[Placement]) -> Vec<usize> {
    let mut rows: Vec<(f64, usize)> = Vec::new();
    for p in placements {
        match rows.iter_mut().find(|(y, _)| *y == p.y) {
            Some((_, count)) => *count += 1,
            None => rows.push((p.y, 1)),
        }
    }
    rows.into_iter().map(|(_, count)| count).collect()
}

// =============================================================
// Grid shapes
// =============================================================

#[test]
fn grid_shape_table() {
    assert_eq!(grid_shape(1), (1, 1));
    assert_eq!(grid_shape(2), (2, 1));
    assert_eq!(grid_shape(3), (3, 1));
    assert_eq!(grid_shape(4), (2, 2));
    assert_eq!(grid_shape(5), (3, 2));
    assert_eq!(grid_shape(6), (3, 2));
    assert_eq!(grid_shape(7), (4, 2));
    assert_eq!(grid_shape(8), (4, 2));
}

#[test]
fn row_counts_split_top_heavy() {
    assert_eq!(row_counts(3), vec![3]);
    assert_eq!(row_counts(5), vec![3, 2]);
    assert_eq!(row_counts(7), vec![4, 3]);
    assert_eq!(row_counts(8), vec![4, 4]);
}

#[test]
fn page_count_rounds_up() {
    assert_eq!(page_count(0, 4), 0);
    assert_eq!(page_count(9, 4), 3);
    assert_eq!(page_count(9, 20), 2);
    assert_eq!(page_count(3, 0), 3);
}

// =============================================================
// Packing
// =============================================================

#[test]
fn pack_is_deterministic() {
    let a = pack(11, 4, a4(), 100.0, 80.0);
    let b = pack(11, 4, a4(), 100.0, 80.0);
    assert_eq!(a, b);
    assert_eq!(a.len(), 11);
}

#[test]
fn pack_four_items_centered() {
    let page = a4();
    let placements = pack(4, 4, page, 0.0, 0.0);
    assert_eq!(rows_of(&placements), vec![2, 2]);

    let left = placements.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let right = placements.iter().map(|p| p.x + p.width).fold(f64::NEG_INFINITY, f64::max);
    let top = placements.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let bottom = placements.iter().map(|p| p.y + p.height).fold(f64::NEG_INFINITY, f64::max);

    assert!((left - (page.width - right)).abs() <= 1.0, "left {left} right {right}");
    assert!((top - (page.height - bottom)).abs() <= 1.0, "top {top} bottom {bottom}");
}

#[test]
fn pack_five_and_seven_split_rows() {
    assert_eq!(rows_of(&pack(5, 8, a4(), 0.0, 0.0)), vec![3, 2]);
    assert_eq!(rows_of(&pack(7, 8, a4(), 0.0, 0.0)), vec![4, 3]);
}

#[test]
fn pack_short_row_is_centered() {
    let page = a4();
    let placements = pack(5, 8, page, 0.0, 0.0);
    let bottom_row: Vec<_> = placements.iter().skip(3).collect();
    let left = bottom_row[0].x;
    let right = bottom_row[1].x + bottom_row[1].width;
    assert!((left - (page.width - right)).abs() <= 1.0);
}

#[test]
fn pack_keeps_four_by_five_aspect_and_minimum() {
    for n in 1..=8 {
        for p in pack(n, 8, a4(), 100.0, 80.0) {
            assert!(p.width >= 120.0 && p.height >= 150.0, "n = {n}: {p:?}");
            let ratio = p.width / p.height;
            assert!((ratio - 0.8).abs() < 0.02, "n = {n}: ratio {ratio}");
        }
    }
}

#[test]
fn pack_respects_header_and_footer_bands() {
    let page = a4();
    for p in pack(8, 8, page, 100.0, 80.0) {
        assert!(p.y >= 100.0, "{p:?}");
        assert!(p.y + p.height <= page.height - 80.0, "{p:?}");
    }
}

#[test]
fn pack_spills_onto_following_pages() {
    let placements = pack(10, 4, a4(), 0.0, 0.0);
    let pages: Vec<u32> = placements.iter().map(|p| p.page).collect();
    assert_eq!(pages, vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3]);
}

#[test]
fn pack_clamps_per_page() {
    let placements = pack(10, 50, a4(), 0.0, 0.0);
    assert_eq!(placements.iter().filter(|p| p.page == 1).count(), 8);
    let placements = pack(2, 0, a4(), 0.0, 0.0);
    assert_eq!(placements.iter().map(|p| p.page).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn pack_nothing() {
    assert!(pack(0, 4, a4(), 0.0, 0.0).is_empty());
}

// =============================================================
// Document placement
// =============================================================

#[test]
fn place_products_grows_pages_and_inserts_products() {
    let mut doc = CanvasDocument::default();
    let ids = place_products(&mut doc, &products(6), 4);
    assert_eq!(ids.len(), 6);
    assert_eq!(doc.total_pages, 2);
    assert!(doc.elements.iter().all(|el| el.kind == ElementKind::Product));
    assert_eq!(doc.get(&ids[5]).map(|el| el.page), Some(2));
    assert_eq!(doc.get(&ids[0]).map(|el| el.data().product_name().to_owned()).as_deref(), Some("Product 0"));
}

#[test]
fn place_products_uses_reserved_zones() {
    let mut doc = CanvasDocument::default();
    doc.show_header_zone = true;
    doc.header_height = 200.0;
    let ids = place_products(&mut doc, &products(1), 4);
    let el = doc.get(&ids[0]).unwrap();
    assert!(el.y >= 200.0);
}
