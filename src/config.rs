//! Configuration loader and schema types.
//!
//! Settings are built once at startup and handed by reference to every
//! component that needs them.

mod load;
mod schema;

pub use load::resolve_config_path;
pub use schema::*;
