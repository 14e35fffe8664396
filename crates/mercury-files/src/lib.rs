//! mercury-files: File handling glue for Mercury collections.
//!
//! Resolves naming conflicts when files are uploaded, moved or copied into a
//! directory, and reads WebDAV `PROPFIND` listings of that directory.

pub mod error;
pub mod naming;
pub mod paths;
pub mod webdav;

pub use error::FilesError;
pub use naming::{unique_destination_paths, unique_file_name, unique_file_names};
pub use webdav::{FileEntry, FileKind};
