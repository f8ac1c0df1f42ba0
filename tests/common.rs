/// Common test utilities for Engram integration tests
///
/// This file contains shared functions for all integration tests: test
/// database setup and helpers for creating common test objects. Unlike
/// the inline unit tests, integration tests run against an on-disk
/// SQLite database in a temporary directory, so they also cover the
/// persistence path a deployment actually uses.

use engram::db::{init_pool, DbPool};
use engram::models::{Card, Deck};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// A pooled connection to a database file in a temporary directory
///
/// The directory is removed when the value is dropped. `path` is kept
/// around so tests can reopen the same file with a fresh pool.
pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub path: PathBuf,
    _dir: TempDir,
}

/// Creates an on-disk test database with migrations applied
pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("engram.sqlite3");
    let pool = init_pool(path.to_str().unwrap()).expect("Failed to create pool");

    let conn = &mut pool.get().expect("Failed to get connection");
    engram::run_migrations(conn).expect("Failed to run migrations");

    TestDb {
        pool: Arc::new(pool),
        path,
        _dir: dir,
    }
}

/// Opens a second pool on an existing test database file
pub fn reopen_db(db: &TestDb) -> Arc<DbPool> {
    let pool = init_pool(db.path.to_str().unwrap()).expect("Failed to reopen pool");
    Arc::new(pool)
}

/// Creates a deck owned by `learner-1`
pub fn make_deck(pool: &Arc<DbPool>, title: &str) -> Deck {
    engram::repo::create_deck(
        pool,
        title.to_string(),
        None,
        Some("accounting".to_string()),
        "learner-1".to_string(),
        Utc::now(),
    )
    .expect("Failed to create deck")
}

/// Creates a card in the given deck
pub fn make_card(pool: &Arc<DbPool>, deck_id: &str, front: &str, now: DateTime<Utc>) -> Card {
    engram::session::create_card(
        pool,
        deck_id,
        front.to_string(),
        "back".to_string(),
        None,
        now,
    )
    .expect("Failed to create card")
}
