use super::timestamp::{EpochMillis, EpochSeconds};
use serde::Serialize;

/// Separator between the values in `notes.flds`.
pub const FIELD_SEPARATOR: char = '\x1f';

/// The single package-wide metadata row (`col` table).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Collection {
    pub id: i64,
    #[sqlx(rename = "crt")]
    pub created: EpochMillis,
    #[sqlx(rename = "mod")]
    pub modified: EpochMillis,
    #[sqlx(rename = "scm")]
    pub schema_modified: EpochMillis,
    #[sqlx(rename = "ver")]
    pub version: i64,
    #[sqlx(rename = "dty")]
    pub dirty: i64,
    pub usn: i64,
    #[sqlx(rename = "ls")]
    pub last_sync: i64,
    /// Global configuration, JSON.
    pub conf: String,
    /// Note types keyed by model id, JSON.
    pub models: String,
    /// Decks keyed by deck id, JSON.
    pub decks: String,
    /// Deck options groups, JSON.
    pub dconf: String,
    pub tags: String,
}

/// Field values shared by every card generated from them (`notes` table).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub guid: String,
    #[sqlx(rename = "mid")]
    pub model_id: i64,
    #[sqlx(rename = "mod")]
    pub modified: EpochSeconds,
    pub usn: i64,
    /// Space separated, with leading and trailing spaces.
    pub tags: String,
    #[sqlx(rename = "flds")]
    pub fields: String,
    #[sqlx(rename = "sfld")]
    pub sort_field: String,
    #[sqlx(rename = "csum")]
    pub checksum: i64,
    pub flags: i64,
    pub data: String,
}

impl Note {
    /// Field values in ordinal order.
    pub fn field_values(&self) -> Vec<&str> {
        self.fields.split(FIELD_SEPARATOR).collect()
    }

    pub fn tag_list(&self) -> Vec<&str> {
        self.tags.split_whitespace().collect()
    }
}

/// One note rendered through one template (`cards` table).
///
/// The scheduling columns are kept as opaque integers; rendering never reads them.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Card {
    pub id: i64,
    #[sqlx(rename = "nid")]
    pub note_id: i64,
    #[sqlx(rename = "did")]
    pub deck_id: i64,
    /// Template ordinal within the note's model.
    pub ord: i64,
    #[sqlx(rename = "mod")]
    pub modified: EpochSeconds,
    pub usn: i64,
    #[sqlx(rename = "type")]
    pub card_type: i64,
    pub queue: i64,
    pub due: i64,
    pub ivl: i64,
    pub factor: i64,
    pub reps: i64,
    pub lapses: i64,
    pub left: i64,
    pub odue: i64,
    pub odid: i64,
    pub flags: i64,
    pub data: String,
}

/// A single review (`revlog` table).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RevisionLog {
    pub id: i64,
    #[sqlx(rename = "cid")]
    pub card_id: i64,
    pub usn: i64,
    pub ease: i64,
    pub ivl: i64,
    #[sqlx(rename = "lastIvl")]
    pub last_ivl: i64,
    pub factor: i64,
    pub time: i64,
    #[sqlx(rename = "type")]
    pub review_type: i64,
}

impl RevisionLog {
    /// The row id doubles as the review time.
    pub fn reviewed_at(&self) -> EpochSeconds {
        EpochSeconds::from_secs(self.id)
    }
}

/// Everything rendering needs from the database, loaded in one pass.
#[derive(Debug, Clone)]
pub struct LoadedPackage {
    pub collection: Collection,
    pub notes: Vec<Note>,
    pub cards: Vec<Card>,
    pub revlog: Vec<RevisionLog>,
}
