//! Page canvas engine for brochure templates and campaigns.
//!
//! This crate is compiled to WebAssembly for the browser editor and linked
//! natively by the server. It owns everything about a canvas document that
//! does not need a network or a DOM: the element model, page management,
//! pointer gestures, product auto-layout, campaign date formatting, and the
//! render tree shared by the editor, thumbnails, and the public view. The
//! host JavaScript layer wires DOM events to [`engine::Engine`], draws the
//! returned [`render::Scene`], and persists the document on explicit save.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Canvas document, pages, canvas presets |
//! | [`element`] | Element record and typed accessors over its data bag |
//! | [`camera`] | Zoom and screen/logical coordinate conversions |
//! | [`geometry`] | Rects, resize anchors, drag and resize math |
//! | [`input`] | Tools, buttons, and the gesture state machine |
//! | [`hit`] | Hit-testing against elements and selection handles |
//! | [`layout`] | Product grid packing across pages |
//! | [`date`] | Campaign date patterns |
//! | [`render`] | Per-element render nodes and page scenes |
//! | [`svg`] | Standalone SVG output for scenes |
//! | [`consts`] | Shared numeric constants (zoom limits, minimum sizes, etc.) |

pub mod camera;
pub mod consts;
pub mod date;
pub mod doc;
pub mod element;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod layout;
pub mod render;
pub mod svg;
