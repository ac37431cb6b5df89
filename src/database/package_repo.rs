use super::models::{Card, Collection, LoadedPackage, Note, RevisionLog};
use crate::types::errors::{PackageError, PackageResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;

/// Open an extracted collection database read-only.
pub async fn open_package_db(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    let opts = SqliteConnectOptions::new()
        .filename(db_path)
        .read_only(true);
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await
}

// ── Relations ───────────────────────────────────────────────

pub async fn load_collections(pool: &SqlitePool) -> Result<Vec<Collection>, sqlx::Error> {
    sqlx::query_as::<_, Collection>(
        "SELECT id, crt, mod, scm, ver, dty, usn, ls, conf, models, decks, dconf, tags FROM col",
    )
    .fetch_all(pool)
    .await
}

/// `sfld` has integer affinity, so numeric sort fields come back as INTEGER unless cast.
pub async fn load_notes(pool: &SqlitePool) -> Result<Vec<Note>, sqlx::Error> {
    sqlx::query_as::<_, Note>(
        "SELECT id, guid, mid, mod, usn, tags, flds, CAST(sfld AS TEXT) AS sfld, csum, flags, data FROM notes",
    )
    .fetch_all(pool)
    .await
}

/// Cards in table order, which is also render order.
pub async fn load_cards(pool: &SqlitePool) -> Result<Vec<Card>, sqlx::Error> {
    sqlx::query_as::<_, Card>(
        "SELECT id, nid, did, ord, mod, usn, type, queue, due, ivl, factor, reps, lapses, left, odue, odid, flags, data FROM cards",
    )
    .fetch_all(pool)
    .await
}

pub async fn load_revlog(pool: &SqlitePool) -> Result<Vec<RevisionLog>, sqlx::Error> {
    sqlx::query_as::<_, RevisionLog>(
        "SELECT id, cid, usn, ease, ivl, lastIvl, factor, time, type FROM revlog",
    )
    .fetch_all(pool)
    .await
}

pub async fn table_exists(pool: &SqlitePool, table: &str) -> Result<bool, sqlx::Error> {
    let existing: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(table)
            .fetch_optional(pool)
            .await?;
    Ok(existing.is_some())
}

/// Load every relation rendering needs and check the package is usable.
///
/// Fails unless there is exactly one collection row and at least one card.
/// The review log is optional and read only when its table exists.
pub async fn load_package(pool: &SqlitePool) -> PackageResult<LoadedPackage> {
    let mut collections = load_collections(pool).await?;
    if collections.len() != 1 {
        return Err(PackageError::CollectionCount(collections.len()));
    }
    let collection = collections.remove(0);

    let cards = load_cards(pool).await?;
    if cards.is_empty() {
        return Err(PackageError::NoCards);
    }
    let notes = load_notes(pool).await?;

    let revlog = if table_exists(pool, "revlog").await? {
        load_revlog(pool).await?
    } else {
        Vec::new()
    };

    log::info!(
        "Loaded collection {} (v{}): {} notes, {} cards, {} reviews",
        collection.id,
        collection.version,
        notes.len(),
        cards.len(),
        revlog.len()
    );

    Ok(LoadedPackage {
        collection,
        notes,
        cards,
        revlog,
    })
}

#[cfg(test)]
#[path = "tests/package_repo_tests.rs"]
mod tests;
