//! Extension-keyed lookup table for file types

use crate::definition::normalize_extension;
use crate::{FileCategory, FileTypeDefinition};
use std::collections::HashMap;
use std::path::Path;

/// Lookup table classifying paths by extension.
///
/// Registries are explicitly constructed and passed by reference; there is no
/// process-wide instance, so tests and embedders can hold isolated tables.
#[derive(Debug, Clone, Default)]
pub struct FileTypeRegistry {
    by_extension: HashMap<String, FileTypeDefinition>,
}

impl FileTypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with the builtin definitions.
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();
        for definition in builtin_types() {
            registry.register(definition);
        }
        registry
    }

    /// Register a definition, replacing any previous entry for the same
    /// extension.
    pub fn register(&mut self, definition: FileTypeDefinition) {
        self.by_extension
            .insert(definition.extension().to_owned(), definition);
    }

    /// Classify a path by its extension.
    ///
    /// Paths without an extension, and extensions the registry has no entry
    /// for, resolve to an Unknown-category descriptor rather than an error.
    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> FileTypeDefinition {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(normalize_extension)
            .unwrap_or_default();

        self.by_extension
            .get(&extension)
            .cloned()
            .unwrap_or_else(|| FileTypeDefinition::unknown(&extension))
    }

    /// Look up the definition registered for an extension, if any.
    pub fn get_by_extension(&self, extension: &str) -> Option<&FileTypeDefinition> {
        self.by_extension.get(&normalize_extension(extension))
    }

    /// All definitions in the given category.
    pub fn types_by_category(&self, category: FileCategory) -> Vec<&FileTypeDefinition> {
        let mut types: Vec<_> = self
            .by_extension
            .values()
            .filter(|def| def.category() == category)
            .collect();
        types.sort_by(|a, b| a.extension().cmp(b.extension()));
        types
    }

    /// All definitions answering to the given MIME type (case-insensitive).
    pub fn types_by_mime(&self, mime_type: &str) -> Vec<&FileTypeDefinition> {
        let needle = mime_type.to_lowercase();
        let mut types: Vec<_> = self
            .by_extension
            .values()
            .filter(|def| def.mime_types().iter().any(|m| m.to_lowercase() == needle))
            .collect();
        types.sort_by(|a, b| a.extension().cmp(b.extension()));
        types
    }

    /// Whether the path's extension classifies into the given category.
    pub fn is_type_of<P: AsRef<Path>>(&self, path: P, category: FileCategory) -> bool {
        self.resolve(path).category() == category
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.by_extension.len()
    }

    /// Whether the registry holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.by_extension.is_empty()
    }
}

/// The builtin definition table.
fn builtin_types() -> Vec<FileTypeDefinition> {
    use FileCategory::{Archive, Audio, Data, Document, Image, Text, Video};

    vec![
        FileTypeDefinition::new(".txt", "Text File", Text, &["text/plain"]),
        FileTypeDefinition::new(".md", "Markdown File", Text, &["text/markdown"]),
        FileTypeDefinition::new(".html", "HTML File", Text, &["text/html"]),
        FileTypeDefinition::new(".log", "Log File", Text, &["text/plain"]),
        FileTypeDefinition::new(".json", "JSON File", Data, &["application/json"]),
        FileTypeDefinition::new(".xml", "XML File", Data, &["application/xml", "text/xml"]),
        FileTypeDefinition::new(".csv", "CSV File", Data, &["text/csv"]),
        FileTypeDefinition::new(".yaml", "YAML File", Data, &["application/yaml"]),
        FileTypeDefinition::new(".jpg", "JPEG Image", Image, &["image/jpeg"]),
        FileTypeDefinition::new(".jpeg", "JPEG Image", Image, &["image/jpeg"]),
        FileTypeDefinition::new(".png", "PNG Image", Image, &["image/png"]),
        FileTypeDefinition::new(".gif", "GIF Image", Image, &["image/gif"]),
        FileTypeDefinition::new(".svg", "SVG Image", Image, &["image/svg+xml"]),
        FileTypeDefinition::new(".mp3", "MP3 Audio", Audio, &["audio/mpeg"]),
        FileTypeDefinition::new(".wav", "WAV Audio", Audio, &["audio/wav"]),
        FileTypeDefinition::new(".mp4", "MP4 Video", Video, &["video/mp4"]),
        FileTypeDefinition::new(".pdf", "PDF Document", Document, &["application/pdf"]),
        FileTypeDefinition::new(".zip", "ZIP Archive", Archive, &["application/zip"]),
        FileTypeDefinition::new(".tar", "TAR Archive", Archive, &["application/x-tar"]),
        FileTypeDefinition::new(".gz", "Gzip Archive", Archive, &["application/gzip"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("notes.txt", FileCategory::Text)]
    #[case("photo.JPG", FileCategory::Image)]
    #[case("data/config.json", FileCategory::Data)]
    #[case("/abs/path/archive.zip", FileCategory::Archive)]
    #[case("report.pdf", FileCategory::Document)]
    fn builtin_types_resolve_by_extension(#[case] path: &str, #[case] expected: FileCategory) {
        let registry = FileTypeRegistry::with_builtin_types();
        assert_eq!(registry.resolve(path).category(), expected);
    }

    #[test]
    fn unknown_extensions_resolve_to_unknown() {
        let registry = FileTypeRegistry::with_builtin_types();
        let resolved = registry.resolve("artifact.xyz");

        assert!(resolved.is_unknown());
        assert_eq!(resolved.extension(), ".xyz");
    }

    #[test]
    fn extensionless_paths_resolve_to_unknown() {
        let registry = FileTypeRegistry::with_builtin_types();
        assert!(registry.resolve("Makefile").is_unknown());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let registry = FileTypeRegistry::with_builtin_types();
        assert_eq!(
            registry.get_by_extension(".TXT").unwrap().description(),
            "Text File"
        );
        assert_eq!(registry.resolve("README.TXT").category(), FileCategory::Text);
    }

    #[test]
    fn category_queries_return_every_member() {
        let registry = FileTypeRegistry::with_builtin_types();
        let archives = registry.types_by_category(FileCategory::Archive);

        let extensions: Vec<_> = archives.iter().map(|d| d.extension()).collect();
        assert_eq!(extensions, vec![".gz", ".tar", ".zip"]);
    }

    #[test]
    fn mime_queries_cover_aliases() {
        let registry = FileTypeRegistry::with_builtin_types();

        let jpeg = registry.types_by_mime("image/jpeg");
        assert_eq!(jpeg.len(), 2);

        let xml = registry.types_by_mime("TEXT/XML");
        assert_eq!(xml.len(), 1);
        assert_eq!(xml[0].extension(), ".xml");
    }

    #[test]
    fn custom_registration_overrides_builtins() {
        let mut registry = FileTypeRegistry::with_builtin_types();
        registry.register(FileTypeDefinition::new(
            ".txt",
            "Transcript",
            FileCategory::Document,
            &["text/plain"],
        ));

        assert_eq!(
            registry.resolve("call.txt").category(),
            FileCategory::Document
        );
    }

    #[test]
    fn is_type_of_matches_resolution() {
        let registry = FileTypeRegistry::with_builtin_types();
        assert!(registry.is_type_of("clip.mp4", FileCategory::Video));
        assert!(!registry.is_type_of("clip.mp4", FileCategory::Audio));
    }

    #[test]
    fn isolated_registries_do_not_share_state() {
        let mut custom = FileTypeRegistry::new();
        custom.register(FileTypeDefinition::new(
            ".sav",
            "Save Game",
            FileCategory::Data,
            &[],
        ));

        let builtin = FileTypeRegistry::with_builtin_types();
        assert!(builtin.resolve("slot1.sav").is_unknown());
        assert!(!custom.resolve("slot1.sav").is_unknown());
        assert_eq!(custom.len(), 1);
        assert!(!custom.is_empty());
    }
}
