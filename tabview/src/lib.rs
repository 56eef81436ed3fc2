//! Tabular view engine
//!
//! Sorts, paginates and tracks selection over a borrowed collection of rows,
//! leaving cell rendering to the host through per-column renderers.

pub mod error;
pub mod model;
pub mod table;
