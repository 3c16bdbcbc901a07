//! Per-extension file-type descriptors

use crate::FileCategory;

/// Fallback MIME type for content the registry cannot classify.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Descriptor for one file type: extension, human-readable description,
/// category, and the MIME types it answers to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileTypeDefinition {
    extension: String,
    description: String,
    category: FileCategory,
    mime_types: Vec<String>,
}

impl FileTypeDefinition {
    /// Create a definition. The extension is normalized to lowercase with a
    /// leading dot so lookups are case-insensitive.
    pub fn new(
        extension: &str,
        description: &str,
        category: FileCategory,
        mime_types: &[&str],
    ) -> Self {
        Self {
            extension: normalize_extension(extension),
            description: description.to_owned(),
            category,
            mime_types: mime_types.iter().map(|m| (*m).to_owned()).collect(),
        }
    }

    /// Descriptor for an extension the registry does not know.
    pub fn unknown(extension: &str) -> Self {
        Self {
            extension: normalize_extension(extension),
            description: FileCategory::Unknown.description().to_owned(),
            category: FileCategory::Unknown,
            mime_types: vec![DEFAULT_MIME_TYPE.to_owned()],
        }
    }

    /// Normalized extension, including the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Category of this type.
    pub fn category(&self) -> FileCategory {
        self.category
    }

    /// All MIME types this definition answers to.
    pub fn mime_types(&self) -> &[String] {
        &self.mime_types
    }

    /// The preferred MIME type.
    pub fn primary_mime_type(&self) -> &str {
        self.mime_types
            .first()
            .map_or(DEFAULT_MIME_TYPE, String::as_str)
    }

    /// Whether this definition stands for an unclassified type.
    pub fn is_unknown(&self) -> bool {
        self.category == FileCategory::Unknown
    }
}

/// Lowercase, leading-dot form of an extension. Empty input stays empty.
pub(crate) fn normalize_extension(extension: &str) -> String {
    let lower = extension.trim().to_lowercase();
    if lower.is_empty() || lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}
