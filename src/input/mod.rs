//! Input acquisition: turning a dropped or selected file into an [`UploadedFile`].
//!
//! [`UploadedFile`]: crate::models::UploadedFile

pub mod file;
pub mod format;

pub use file::{declared_media_type, load_file, pdf_placeholder};
pub use format::format_file_size;
