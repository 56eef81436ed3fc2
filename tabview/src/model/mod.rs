//! Dynamic row model

mod key;
mod path;
mod record;
mod record_serde;
mod value;

pub use key::*;
pub use path::*;
pub use record::*;
pub use value::*;
