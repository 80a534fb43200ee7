#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Font descriptors, the curated font catalog, and the preview stylesheet loader.
//!
//! Layout: `family.rs` (the `FontFamily` value stored in brand configurations),
//! `catalog.rs` (static catalog, search, and pairing suggestions), `loader.rs`
//! (idempotent stylesheet loading behind the `StylesheetHost` seam).

pub mod catalog;
pub mod error;
pub mod family;
pub mod loader;

pub use catalog::{
    FontCategory, FontDescriptor, FontPairing, catalog, find_font, fonts_by_category, pairings,
    search_fonts, stylesheet_url, to_font_family,
};
pub use error::{FontError, FontResult};
pub use family::{FontFamily, FontStyle};
pub use loader::{DEFAULT_LOAD_TIMEOUT, FontLoader, StylesheetHost};
