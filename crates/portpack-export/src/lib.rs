//! On-disk export: the portfolio folder layout, metadata files, and the
//! Instagram caption pack.

pub mod captions;
pub mod error;
pub mod metadata;
pub mod paths;

pub use captions::write_caption_pack;
pub use error::ExportError;
pub use metadata::export_metadata;
pub use paths::{build_project_paths, project_folder_label, ProjectPaths};
