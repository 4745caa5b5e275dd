//! Metadata inference: ordered pattern rules over file and folder names,
//! reconciliation with embedded tags, and destination paths.

mod extract;
mod model;
mod normalize;
mod path_builder;
mod reconcile;

pub use extract::{Date, InfoExtractor};
pub use model::{EmbeddedTags, Info, safe_filename};
pub use path_builder::PathBuilder;
pub use reconcile::{Reconciled, TagReconciler};

#[cfg(test)]
mod tests;
