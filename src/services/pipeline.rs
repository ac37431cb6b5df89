//! End-to-end conversion of one `.apkg` file into rendered cards.
//!
//! Stages run strictly in sequence: extract, restore media names, load the
//! database, parse the collection configuration, resolve cards. The database
//! and manifest live in a temporary directory removed when the call returns;
//! media files stay in the output directory for the document writer.

use crate::database::package_repo::{load_package, open_package_db};
use crate::services::archive::{extract_package, MEDIA_MANIFEST_ENTRY};
use crate::services::config::ConvertOptions;
use crate::services::media::{read_media_manifest, rename_media};
use crate::services::render::{
    resolve_cards, resolve_cards_parallel, CardTables, RenderedCard, TitleOverrides,
};
use crate::types::errors::{PackageError, PackageResult};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Everything the document writer needs.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedPackage {
    pub title: String,
    pub description: String,
    pub source_path: PathBuf,
    pub media_dir: PathBuf,
    /// Conversion date, `YYYY/MM/DD`.
    pub generated_on: String,
    pub cards: Vec<RenderedCard>,
}

pub async fn convert_package(options: &ConvertOptions) -> PackageResult<ResolvedPackage> {
    let meta_dir = tempfile::Builder::new()
        .prefix("apkg_render")
        .tempdir()
        .map_err(|source| PackageError::Io {
            path: std::env::temp_dir(),
            source,
        })?;
    fs::create_dir_all(&options.output).map_err(|source| PackageError::Io {
        path: options.output.clone(),
        source,
    })?;

    let summary = extract_package(&options.input, meta_dir.path(), &options.output)?;

    let manifest = read_media_manifest(&meta_dir.path().join(MEDIA_MANIFEST_ENTRY))?;
    rename_media(&manifest, &options.output)?;

    let db_entry = summary
        .database_entry()
        .ok_or(PackageError::MissingDatabase)?;
    let pool = open_package_db(&meta_dir.path().join(db_entry)).await?;
    let loaded = load_package(&pool).await;
    pool.close().await;
    let package = loaded?;

    let tables = CardTables::build(&package.collection, package.notes)?;
    let overrides = TitleOverrides {
        title: options.title_override(),
        description: options.description_override(),
    };
    let resolved = if options.parallel {
        resolve_cards_parallel(&package.cards, &tables, overrides)?
    } else {
        resolve_cards(&package.cards, &tables, overrides)?
    };

    Ok(ResolvedPackage {
        title: resolved.title,
        description: resolved.description,
        source_path: options.input.clone(),
        media_dir: options.output.clone(),
        generated_on: chrono::Local::now().format("%Y/%m/%d").to_string(),
        cards: resolved.cards,
    })
}
