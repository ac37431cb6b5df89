//! `.apkg` archive extraction with zip-slip protection.

mod extract;
mod types;

pub use extract::extract_package;
pub use types::{
    EntryRoot, ExtractionSummary, DATABASE_ENTRY, LEGACY_DATABASE_ENTRY, MEDIA_MANIFEST_ENTRY,
};

#[cfg(test)]
#[path = "tests/extract_tests.rs"]
mod tests;
