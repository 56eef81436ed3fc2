//! Sorted, paginated, selectable table views

mod column;
mod config;
mod events;
mod page;
mod render;
mod row;
mod selection;
mod sort;
mod state;

pub use column::*;
pub use config::*;
pub use events::*;
pub use page::*;
pub use render::*;
pub use row::*;
pub use selection::*;
pub use sort::*;
pub use state::*;
