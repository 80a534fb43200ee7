//! Command handlers grouped by concern.

pub(crate) mod brand;
pub(crate) mod fonts;
pub(crate) mod theme;
