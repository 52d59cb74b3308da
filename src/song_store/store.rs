//! SQLite-backed song store implementation.

use super::models::{Song, SongFilter};
use super::schema::SONGS_VERSIONED_SCHEMAS;
use super::trait_def::{SongStore, StoreError};
use crate::sqlite_persistence::BASE_DB_VERSION;
use anyhow::{Context, Result};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// SQLite-backed song store.
pub struct SqliteSongStore {
    conn: Mutex<Connection>,
}

const SONG_COLUMNS: &str = "id, group_name, song_name, release_date, text, link, is_deleted";

fn migrate_if_needed(conn: &mut Connection) -> Result<()> {
    let db_version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;

    let latest_version = SONGS_VERSIONED_SCHEMAS.len() - 1;
    let latest_schema = &SONGS_VERSIONED_SCHEMAS[latest_version];

    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
            [],
            |r| r.get(0),
        )
        .unwrap_or(0);

    if table_count == 0 {
        info!("Creating songs db schema at version {}", latest_version);
        latest_schema.create(conn)?;
        return Ok(());
    }

    let mut current_version = if db_version < BASE_DB_VERSION as i64 {
        0
    } else {
        (db_version - BASE_DB_VERSION as i64) as usize
    };

    if current_version >= latest_version {
        latest_schema.validate(conn)?;
        return Ok(());
    }

    let tx = conn.transaction()?;
    for schema in SONGS_VERSIONED_SCHEMAS.iter().skip(current_version + 1) {
        if let Some(migration_fn) = schema.migration {
            info!(
                "Migrating songs db from version {} to {}",
                current_version, schema.version
            );
            migration_fn(&tx)?;
            current_version = schema.version;
        }
    }
    tx.pragma_update(None, "user_version", BASE_DB_VERSION + current_version)?;
    tx.commit()?;
    Ok(())
}

/// Builds the `fetch_all` query. Filter conjuncts are appended in a fixed
/// order (group_name, then song_name) so the generated SQL is deterministic,
/// and every appended placeholder pushes its argument in the same step to
/// keep the positional pairing exact.
fn build_fetch_all_sql(filter: &SongFilter, limit: u32, offset: u32) -> (String, Vec<Value>) {
    let mut sql = format!(
        "SELECT {} FROM songs WHERE is_deleted = 0",
        SONG_COLUMNS
    );
    let mut args: Vec<Value> = Vec::new();

    if let Some(group) = &filter.group {
        sql.push_str(" AND group_name = ?");
        args.push(Value::Text(group.clone()));
    }
    if let Some(song) = &filter.song {
        sql.push_str(" AND song_name = ?");
        args.push(Value::Text(song.clone()));
    }

    sql.push_str(" LIMIT ? OFFSET ?");
    args.push(Value::Integer(limit as i64));
    args.push(Value::Integer(offset as i64));

    (sql, args)
}

fn song_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Song> {
    Ok(Song {
        id: row.get(0)?,
        group_name: row.get(1)?,
        song_name: row.get(2)?,
        release_date: row.get(3)?,
        text: row.get(4)?,
        link: row.get(5)?,
        is_deleted: row.get::<_, i64>(6)? != 0,
    })
}

impl SqliteSongStore {
    /// Open the songs database at `db_path`, creating it and its schema
    /// when missing.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let mut conn = Connection::open_with_flags(
            db_path.as_ref(),
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .context("Failed to open songs database")?;

        migrate_if_needed(&mut conn)?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .context("Failed to set WAL mode on songs database")?;

        let song_count: usize = conn.query_row(
            "SELECT COUNT(*) FROM songs WHERE is_deleted = 0",
            [],
            |r| r.get(0),
        )?;
        info!("Song store ready: {} songs in catalog", song_count);

        Ok(SqliteSongStore {
            conn: Mutex::new(conn),
        })
    }
}

impl SongStore for SqliteSongStore {
    fn fetch_all(
        &self,
        filter: &SongFilter,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Song>, StoreError> {
        let (sql, args) = build_fetch_all_sql(filter, limit, offset);
        debug!("Executing query: {} with {} args", sql, args.len());

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(&sql)?;
        let songs = stmt
            .query_map(params_from_iter(args), song_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        debug!("Fetched {} songs", songs.len());
        Ok(songs)
    }

    fn fetch_by_id(&self, id: i64) -> Result<Song, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM songs WHERE id = ?1",
            SONG_COLUMNS
        ))?;
        stmt.query_row(params![id], song_from_row)
            .optional()?
            .ok_or(StoreError::NotFound(id))
    }

    fn store(&self, song: &Song) -> Result<i64, StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO songs (group_name, song_name, release_date, text, link)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                song.group_name,
                song.song_name,
                song.release_date,
                song.text,
                song.link
            ],
        )?;
        let id = conn.last_insert_rowid();
        info!("Stored song '{}' with id {}", song.song_name, id);
        Ok(id)
    }

    fn update(&self, song: &Song) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute(
            "UPDATE songs
             SET group_name = ?1, song_name = ?2, release_date = ?3, text = ?4, link = ?5,
                 updated_at = cast(strftime('%s','now') as int)
             WHERE id = ?6 AND is_deleted = 0",
            params![
                song.group_name,
                song.song_name,
                song.release_date,
                song.text,
                song.link,
                song.id
            ],
        )?;
        if affected == 0 {
            return Err(StoreError::NotFound(song.id));
        }
        debug!("Updated song with id {}", song.id);
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute(
            "UPDATE songs
             SET is_deleted = 1, updated_at = cast(strftime('%s','now') as int)
             WHERE id = ?1 AND is_deleted = 0",
            params![id],
        )?;
        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        info!("Marked song with id {} as deleted", id);
        Ok(())
    }
}
