use std::path::PathBuf;
use thiserror::Error;

/// Failures while unpacking the package archive.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to open archive {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid or corrupt ZIP: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Archive entry '{0}' escapes the destination directory; aborting for security reasons")]
    PathTraversal(String),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failures while reading the media manifest or renaming media files.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Failed to read media manifest {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse media manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Media file '{archive_name}' maps to unsafe path '{original}'; aborting for security reasons")]
    UnsafeTarget {
        archive_name: String,
        original: String,
    },
    #[error("Media file '{archive_name}' would overwrite existing '{original}'")]
    TargetCollision {
        archive_name: String,
        original: String,
    },
    #[error("Failed to rename media {from} -> {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

/// Failures while parsing the JSON blobs stored in the collection row.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Malformed {blob} JSON: {source}")]
    Json {
        blob: &'static str,
        source: serde_json::Error,
    },
    #[error("Invalid {blob} id '{key}': expected an integer")]
    InvalidKey { blob: &'static str, key: String },
    #[error("Failed to read options file {path}: {source}")]
    OptionsRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed options file {path}: {source}")]
    Options {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Failures while joining a card to its note, model, template and deck.
#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    #[error("Card {card_id} references missing note {note_id}")]
    MissingNote { card_id: i64, note_id: i64 },
    #[error("Note {note_id} references missing model {model_id}")]
    MissingModel { note_id: i64, model_id: i64 },
    #[error("Card {card_id} references missing template {ord} of model {model_id}")]
    MissingTemplate {
        card_id: i64,
        model_id: i64,
        ord: i64,
    },
    #[error("Note {note_id} has {available} fields but field '{field}' needs ordinal {ord}")]
    MissingField {
        note_id: i64,
        field: String,
        ord: usize,
        available: usize,
    },
    #[error("There are multiple decks in use ({previous} and {current}); set the title explicitly")]
    MultipleDecks { previous: i64, current: i64 },
    #[error("Deck {0} is not defined in the collection")]
    UnknownDeck(i64),
}

/// Top-level error for a whole package conversion.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error(transparent)]
    Archive(#[from] ExtractError),
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Expected exactly 1 collection in database, got {0}")]
    CollectionCount(usize),
    #[error("Did not find any cards in database; will not create an empty output")]
    NoCards,
    #[error("Package contains no collection database")]
    MissingDatabase,
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type PackageResult<T> = Result<T, PackageError>;

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
