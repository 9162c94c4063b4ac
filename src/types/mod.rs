pub mod change;
pub mod classification;
pub mod error;
pub mod project;
pub mod snapshot;
pub mod utils;

pub use change::*;
pub use classification::*;
pub use error::{
    ErrorCategory, LensError, Result, ValidationError, ValidationErrorKind,
};
pub use project::*;
pub use snapshot::*;
pub use utils::{
    ROOT_DIR, ancestor_dirs, extension_of, file_name, file_stem, is_strict_descendant,
    is_within, log_filter_warn, parent_dir, path_depth,
};
