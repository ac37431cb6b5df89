use serde::Serialize;

/// Database entry written by current exporters.
pub const DATABASE_ENTRY: &str = "collection.anki21";
/// Database entry written by legacy exporters (a stub when `collection.anki21` exists).
pub const LEGACY_DATABASE_ENTRY: &str = "collection.anki2";
/// JSON manifest mapping numeric media names to original names.
pub const MEDIA_MANIFEST_ENTRY: &str = "media";

/// Where an archive entry is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRoot {
    Metadata,
    Media,
}

impl EntryRoot {
    pub fn for_entry(name: &str) -> Self {
        match name {
            DATABASE_ENTRY | LEGACY_DATABASE_ENTRY | MEDIA_MANIFEST_ENTRY => Self::Metadata,
            _ => Self::Media,
        }
    }
}

/// Result of an extraction operation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionSummary {
    pub files_extracted: usize,
    pub has_database: bool,
    pub has_legacy_database: bool,
    pub has_media_manifest: bool,
}

impl ExtractionSummary {
    /// Name of the database entry to open, preferring the current format.
    pub fn database_entry(&self) -> Option<&'static str> {
        if self.has_database {
            Some(DATABASE_ENTRY)
        } else if self.has_legacy_database {
            Some(LEGACY_DATABASE_ENTRY)
        } else {
            None
        }
    }
}
