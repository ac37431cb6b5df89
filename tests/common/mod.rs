use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;
use zip::write::SimpleFileOptions;

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

const SCHEMA: &str = r#"
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
"#;

pub const MODELS_JSON: &str = r#"{
    "1000": {
        "name": "Basic (type in the answer)",
        "type": 0,
        "css": ".card { text-align: center; }",
        "flds": [{"name": "Front", "ord": 0}, {"name": "Back", "ord": 1}],
        "tmpls": [
            {"name": "Card 1", "ord": 0, "qfmt": "{{Front}} {{type:Back}}", "afmt": "{{FrontSide}}<hr id=answer>{{Back}}"}
        ]
    }
}"#;

pub const DECKS_JSON: &str = r#"{
    "1": {"name": "Default", "desc": ""},
    "2": {"name": "Capitals", "desc": "European capitals"}
}"#;

/// Rows of a fixture package: notes are (id, fields), cards are (id, note id, deck id).
pub struct Fixture {
    pub collections: usize,
    pub notes: Vec<(i64, Vec<&'static str>)>,
    pub cards: Vec<(i64, i64, i64)>,
    pub manifest: &'static str,
    pub media: Vec<(&'static str, &'static str)>,
    pub extra_entries: Vec<(&'static str, &'static str)>,
    pub database_entry: &'static str,
}

impl Default for Fixture {
    fn default() -> Self {
        Self {
            collections: 1,
            notes: vec![(10, vec!["Paris", "[sound:paris.mp3]"])],
            cards: vec![(100, 10, 2)],
            manifest: r#"{"0": "paris.mp3"}"#,
            media: vec![("0", "ID3audio")],
            extra_entries: Vec::new(),
            database_entry: "collection.anki2",
        }
    }
}

async fn build_database(path: &Path, fixture: &Fixture) {
    let opts = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await
        .expect("fixture db");

    sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();

    for id in 0..fixture.collections {
        sqlx::query(
            "INSERT INTO col VALUES (?, 1546300800000, 1546300900000, 1546300800000, 11, 0, 0, 0, '{}', ?, ?, '{}', '{}')",
        )
        .bind(id as i64 + 1)
        .bind(MODELS_JSON)
        .bind(DECKS_JSON)
        .execute(&pool)
        .await
        .unwrap();
    }

    for (id, fields) in &fixture.notes {
        sqlx::query("INSERT INTO notes VALUES (?, ?, 1000, 1546300800, -1, '', ?, ?, 0, 0, '')")
            .bind(id)
            .bind(format!("guid{id}"))
            .bind(fields.join("\x1f"))
            .bind(fields[0])
            .execute(&pool)
            .await
            .unwrap();
    }

    for (id, note_id, deck_id) in &fixture.cards {
        sqlx::query(
            "INSERT INTO cards VALUES (?, ?, ?, 0, 1546300800, -1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, '')",
        )
        .bind(id)
        .bind(note_id)
        .bind(deck_id)
        .execute(&pool)
        .await
        .unwrap();
    }

    pool.close().await;
}

/// Write `fixture` as an `.apkg` inside `dir` and return its path.
pub async fn build_package(dir: &Path, fixture: &Fixture) -> PathBuf {
    let db_path = dir.join("fixture.db");
    build_database(&db_path, fixture).await;
    let db_bytes = fs::read(&db_path).unwrap();

    let apkg = dir.join("fixture.apkg");
    let mut zip = zip::ZipWriter::new(fs::File::create(&apkg).unwrap());
    let options = SimpleFileOptions::default();

    zip.start_file(fixture.database_entry, options).unwrap();
    zip.write_all(&db_bytes).unwrap();
    zip.start_file("media", options).unwrap();
    zip.write_all(fixture.manifest.as_bytes()).unwrap();
    for (name, data) in fixture.media.iter().chain(&fixture.extra_entries) {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data.as_bytes()).unwrap();
    }
    zip.finish().unwrap();

    apkg
}
