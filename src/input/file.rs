use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::ValidationError;
use crate::models::{MediaType, UploadedFile};

/// Media type a file declares, judged from its extension the way a browser does.
pub fn declared_media_type(path: &Path) -> String {
    mime_guess::from_path(path).first_or_octet_stream().essence_str().to_string()
}

/// Text put in the editor in place of PDF contents, which are not extracted.
pub fn pdf_placeholder(name: &str) -> String {
    format!("[Arquivo PDF: {}]\n\nPara melhor análise, extraia o texto do PDF e cole acima.", name)
}

/// Load a dropped or selected file.
///
/// Only `text/plain` and `application/pdf` are accepted; the type is checked before the
/// file is touched. Plain text is read in full (invalid UTF-8 is replaced), PDFs yield
/// [`pdf_placeholder`].
///
/// # Errors
/// - [`ValidationError::UnsupportedFileType`] for any other declared type
/// - [`ValidationError::UnreadableFile`] when metadata or contents cannot be read
pub fn load_file(path: &Path) -> Result<UploadedFile, ValidationError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    let mime = declared_media_type(path);
    let Some(media_type) = MediaType::from_mime(&mime) else {
        return Err(ValidationError::UnsupportedFileType { name, media_type: mime });
    };

    let metadata = fs::metadata(path)
        .map_err(|source| ValidationError::UnreadableFile { name: name.clone(), source })?;
    if !metadata.is_file() {
        return Err(ValidationError::UnreadableFile {
            name,
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }

    let extracted_text = match media_type {
        MediaType::PlainText => {
            let bytes = fs::read(path)
                .map_err(|source| ValidationError::UnreadableFile { name: name.clone(), source })?;
            String::from_utf8_lossy(&bytes).into_owned()
        }
        MediaType::Pdf => pdf_placeholder(&name),
    };

    debug!(file = %name, size = metadata.len(), mime = media_type.as_mime(), "loaded input file");

    Ok(UploadedFile { name, size_bytes: metadata.len(), media_type, extracted_text })
}
