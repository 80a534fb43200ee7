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
#![allow(clippy::module_name_repetitions)]

//! Scoped style contract rendering for brand previews.
//!
//! Layout: `scope.rs` (preview boundary), `contract.rs` (variables grouped by
//! role), `container.rs` (write targets), `renderer.rs` (theme application and
//! font fetch requests).

pub mod container;
pub mod contract;
pub mod error;
pub mod renderer;
pub mod scope;

pub use container::{PreviewContainer, ScopedStyleSheet, StyleLayer};
pub use contract::{
    StyleContract, StyleGroup, StyleVariable, VARIABLE_PREFIX, VariableGroup, render_contract,
};
pub use error::{StyleError, StyleResult};
pub use renderer::{ApplyReport, ThemeRenderer, font_stylesheet_urls};
pub use scope::{DEFAULT_PREVIEW_ID, PREVIEW_ATTRIBUTE, PreviewScope};
