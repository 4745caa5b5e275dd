//! Collection walking: finding audio files, describing where they live and
//! grouping them by folder.

mod bundle;
mod catalog;
mod path_info;

pub use bundle::bundle;
pub use catalog::{check_dir, files_by_extension, files_in_dir};
pub use path_info::PathInfo;
