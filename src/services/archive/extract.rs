use super::types::{
    EntryRoot, ExtractionSummary, DATABASE_ENTRY, LEGACY_DATABASE_ENTRY, MEDIA_MANIFEST_ENTRY,
};
use crate::services::fs_utils::path_utils::resolve_safe_path;
use crate::types::errors::ExtractError;
use std::fs;
use std::io;
use std::path::Path;

/// Extract an `.apkg` archive.
///
/// The collection database and media manifest land in `meta_root`, every other
/// entry (the numbered media files) in `media_root`. Any entry whose name is
/// absolute or climbs out of its root aborts the whole extraction. Entries
/// already written are left in place; callers discard both roots on error.
pub fn extract_package(
    archive_path: &Path,
    meta_root: &Path,
    media_root: &Path,
) -> Result<ExtractionSummary, ExtractError> {
    let file = fs::File::open(archive_path).map_err(|source| ExtractError::Open {
        path: archive_path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file)?;

    log::info!(
        "Extracting {} entries from {}",
        archive.len(),
        archive_path.display()
    );

    let mut summary = ExtractionSummary::default();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let name = entry.name().to_string();

        let root = match EntryRoot::for_entry(&name) {
            EntryRoot::Metadata => meta_root,
            EntryRoot::Media => media_root,
        };
        let output_path = resolve_safe_path(root, &name)
            .ok_or_else(|| ExtractError::PathTraversal(name.clone()))?;

        if entry.is_dir() {
            fs::create_dir_all(&output_path).map_err(|source| ExtractError::Io {
                path: output_path.clone(),
                source,
            })?;
            continue;
        }

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|source| ExtractError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let mut outfile = fs::File::create(&output_path).map_err(|source| ExtractError::Io {
            path: output_path.clone(),
            source,
        })?;
        io::copy(&mut entry, &mut outfile).map_err(|source| ExtractError::Io {
            path: output_path.clone(),
            source,
        })?;
        log::debug!("Extracted {} -> {}", name, output_path.display());

        match name.as_str() {
            DATABASE_ENTRY => summary.has_database = true,
            LEGACY_DATABASE_ENTRY => summary.has_legacy_database = true,
            MEDIA_MANIFEST_ENTRY => summary.has_media_manifest = true,
            _ => {}
        }
        summary.files_extracted += 1;
    }

    if summary.has_database && summary.has_legacy_database {
        log::warn!("Package carries both database formats; ignoring {LEGACY_DATABASE_ENTRY}");
    }

    Ok(summary)
}
