use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::sync::Once;

static INIT: Once = Once::new();

/// Tables of a package database, as written by the desktop exporter.
pub const PACKAGE_SCHEMA: &str = r#"
CREATE TABLE col (
    id integer primary key, crt integer not null, mod integer not null,
    scm integer not null, ver integer not null, dty integer not null,
    usn integer not null, ls integer not null, conf text not null,
    models text not null, decks text not null, dconf text not null,
    tags text not null
);
CREATE TABLE notes (
    id integer primary key, guid text not null, mid integer not null,
    mod integer not null, usn integer not null, tags text not null,
    flds text not null, sfld integer not null, csum integer not null,
    flags integer not null, data text not null
);
CREATE TABLE cards (
    id integer primary key, nid integer not null, did integer not null,
    ord integer not null, mod integer not null, usn integer not null,
    type integer not null, queue integer not null, due integer not null,
    ivl integer not null, factor integer not null, reps integer not null,
    lapses integer not null, left integer not null, odue integer not null,
    odid integer not null, flags integer not null, data text not null
);
CREATE TABLE revlog (
    id integer primary key, cid integer not null, usn integer not null,
    ease integer not null, ivl integer not null, lastIvl integer not null,
    factor integer not null, time integer not null, type integer not null
);
"#;

/// Two-field "Basic" model with a single template, keyed by model id 1000.
pub const BASIC_MODELS_JSON: &str = r#"{
    "1000": {
        "id": 1000,
        "name": "Basic",
        "type": 0,
        "css": ".card { color: black; }",
        "flds": [{"name": "Front", "ord": 0}, {"name": "Back", "ord": 1}],
        "tmpls": [{"name": "Card 1", "ord": 0, "qfmt": "{{Front}}", "afmt": "{{FrontSide}}<hr id=answer>{{Back}}"}]
    }
}"#;

pub const TWO_DECKS_JSON: &str = r#"{
    "1": {"id": 1, "name": "Default", "desc": ""},
    "2": {"id": 2, "name": "Capitals", "desc": "European capitals"}
}"#;

pub struct TestContext {
    pub pool: Pool<Sqlite>,
}

pub async fn init_test_db() -> TestContext {
    INIT.call_once(|| {
        // Initialize logger only once
        let _ = env_logger::builder().is_test(true).try_init();
    });

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // Single connection so every query sees the same in-memory DB
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::raw_sql(PACKAGE_SCHEMA)
        .execute(&pool)
        .await
        .expect("Failed to create package schema");

    TestContext { pool }
}

pub async fn insert_collection(pool: &Pool<Sqlite>, models: &str, decks: &str) {
    sqlx::query(
        "INSERT INTO col (id, crt, mod, scm, ver, dty, usn, ls, conf, models, decks, dconf, tags)
         VALUES (1, 1546300800000, 1546300900000, 1546300800000, 11, 0, 0, 0, '{}', ?, ?, '{}', '{}')",
    )
    .bind(models)
    .bind(decks)
    .execute(pool)
    .await
    .expect("insert col");
}

pub async fn insert_note(pool: &Pool<Sqlite>, id: i64, model_id: i64, fields: &[&str]) {
    let flds = fields.join("\x1f");
    sqlx::query(
        "INSERT INTO notes (id, guid, mid, mod, usn, tags, flds, sfld, csum, flags, data)
         VALUES (?, ?, ?, 1546300800, -1, ' test ', ?, ?, 0, 0, '')",
    )
    .bind(id)
    .bind(format!("guid{id}"))
    .bind(model_id)
    .bind(&flds)
    .bind(fields.first().copied().unwrap_or_default())
    .execute(pool)
    .await
    .expect("insert note");
}

pub async fn insert_card(pool: &Pool<Sqlite>, id: i64, note_id: i64, deck_id: i64, ord: i64) {
    sqlx::query(
        "INSERT INTO cards (id, nid, did, ord, mod, usn, type, queue, due, ivl, factor, reps, lapses, left, odue, odid, flags, data)
         VALUES (?, ?, ?, ?, 1546300800, -1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, '')",
    )
    .bind(id)
    .bind(note_id)
    .bind(deck_id)
    .bind(ord)
    .execute(pool)
    .await
    .expect("insert card");
}
