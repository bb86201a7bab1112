/// Media types a file may declare to be accepted as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    PlainText,
    Pdf,
}

impl MediaType {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "text/plain" => Some(Self::PlainText),
            "application/pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::PlainText => "text/plain",
            Self::Pdf => "application/pdf",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub size_bytes: u64,
    pub media_type: MediaType,
    pub extracted_text: String,
}

/// The single active input. Activating one variant discards the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InputSource {
    #[default]
    None,
    TypedText(String),
    UploadedFile(UploadedFile),
}

impl InputSource {
    /// Text that would be submitted (untrimmed)
    pub fn text(&self) -> &str {
        match self {
            Self::None => "",
            Self::TypedText(text) => text,
            Self::UploadedFile(file) => &file.extracted_text,
        }
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        match self {
            Self::UploadedFile(file) => Some(file),
            _ => None,
        }
    }

    /// True when the trimmed text is non-empty
    pub fn has_text(&self) -> bool {
        !self.text().trim().is_empty()
    }
}
