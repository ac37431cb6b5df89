//! Media manifest handling.
//!
//! Packages store media under numeric names (`0`, `1`, ...) next to a `media`
//! JSON file mapping each numeric name to the file name the notes reference.

use crate::services::fs_utils::path_utils::resolve_safe_path;
use crate::types::errors::MediaError;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// Archive-internal name -> original file name. Sorted so renames run in a stable order.
pub type MediaManifest = BTreeMap<String, String>;

/// Read and parse the media manifest. Missing or malformed files are fatal.
pub fn read_media_manifest(manifest_path: &Path) -> Result<MediaManifest, MediaError> {
    let content = fs::read_to_string(manifest_path).map_err(|source| MediaError::Read {
        path: manifest_path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| MediaError::Parse {
        path: manifest_path.to_path_buf(),
        source,
    })
}

/// Rename every extracted media file in `media_root` to its original name.
///
/// Original names come from the package and are checked against traversal
/// before anything is moved. Every source is first moved to a staging name, so
/// an original name that matches another numeric name cannot clobber it. Two
/// entries sharing an original name, or an original name that matches a file
/// outside the manifest, fail with `TargetCollision`. Returns the number of
/// files renamed.
pub fn rename_media(manifest: &MediaManifest, media_root: &Path) -> Result<usize, MediaError> {
    let mut plan = Vec::with_capacity(manifest.len());
    let mut targets = HashSet::with_capacity(manifest.len());
    for (archive_name, original) in manifest {
        let unsafe_target = || MediaError::UnsafeTarget {
            archive_name: archive_name.clone(),
            original: original.clone(),
        };
        let from = resolve_safe_path(media_root, archive_name).ok_or_else(unsafe_target)?;
        let to = resolve_safe_path(media_root, original).ok_or_else(unsafe_target)?;
        if !targets.insert(to.clone()) {
            return Err(MediaError::TargetCollision {
                archive_name: archive_name.clone(),
                original: original.clone(),
            });
        }
        plan.push((archive_name, original, from, to));
    }

    let mut staged = Vec::with_capacity(plan.len());
    for (i, (archive_name, original, from, to)) in plan.into_iter().enumerate() {
        let pending = media_root.join(format!(".{i}.pending"));
        move_file(&from, &pending)?;
        staged.push((archive_name, original, pending, to));
    }

    let mut renamed = 0;
    for (archive_name, original, pending, to) in staged {
        if to.exists() {
            return Err(MediaError::TargetCollision {
                archive_name: archive_name.clone(),
                original: original.clone(),
            });
        }
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent).map_err(|source| MediaError::Rename {
                from: pending.clone(),
                to: to.clone(),
                source,
            })?;
        }
        move_file(&pending, &to)?;
        log::debug!("Renamed media {} -> {}", archive_name, original);
        renamed += 1;
    }

    log::info!("Restored {} media file names in {}", renamed, media_root.display());
    Ok(renamed)
}

fn move_file(from: &Path, to: &Path) -> Result<(), MediaError> {
    fs::rename(from, to).map_err(|source| MediaError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/manifest_tests.rs"]
mod tests;
