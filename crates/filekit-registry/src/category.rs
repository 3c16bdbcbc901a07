//! Broad file-type categories

/// Broad classification of a file type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileCategory {
    /// Plain and markup text
    Text,
    /// Raster and vector images
    Image,
    /// Audio streams
    Audio,
    /// Video streams
    Video,
    /// Office and print documents
    Document,
    /// Compressed archives
    Archive,
    /// Structured data and serialization formats
    Data,
    /// Anything the registry cannot classify
    Unknown,
}

impl FileCategory {
    /// Human-readable description of the category.
    pub fn description(self) -> &'static str {
        match self {
            Self::Text => "Text File",
            Self::Image => "Image File",
            Self::Audio => "Audio File",
            Self::Video => "Video File",
            Self::Document => "Document File",
            Self::Archive => "Archive File",
            Self::Data => "Data File",
            Self::Unknown => "Unknown File Type",
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Audio => "Audio",
            Self::Video => "Video",
            Self::Document => "Document",
            Self::Archive => "Archive",
            Self::Data => "Data",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}
