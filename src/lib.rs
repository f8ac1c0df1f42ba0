/// Engram: the spaced repetition engine of a study-assistant application
///
/// This library decides, for every learning card, when it should next be
/// shown to a learner, and classifies a deck's cards into due/new/mastered
/// buckets for review sessions. It has three layers, dependent bottom-up:
///
/// - `scheduler`: the pure SM-2-derived update rule (no I/O, no clock)
/// - `repo`: the SQLite-backed card store (decks, cards, reviews)
/// - `session`: the orchestration layer tying the two together
///
/// The session layer takes an explicit `now` on every operation so that
/// scheduling behavior is deterministically testable; nothing in the
/// engine reads the system clock.

/// Configuration management module
pub mod config;

/// Database connection module
pub mod db;

/// Error types for the engine
pub mod errors;

/// Data models module
pub mod models;

/// Repository module for database operations
pub mod repo;

/// Pure scheduling algorithm
pub mod scheduler;

/// Review session orchestration and statistics
pub mod session;

/// Database schema module
pub mod schema;

#[cfg(test)]
pub mod test_utils;

pub use errors::{EngineError, Result};
pub use session::{DeckStatistics, ReviewOutcome, ReviewRecorded};

use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

/// Embedded database migrations
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Runs all pending database migrations
///
/// ### Arguments
///
/// * `conn` - A mutable reference to a SQLite connection
///
/// ### Errors
///
/// Returns an error if any migration fails to apply
pub fn run_migrations(conn: &mut diesel::SqliteConnection) -> anyhow::Result<()> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    Ok(())
}
