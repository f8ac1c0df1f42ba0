use crate::db::DbPool;
use crate::models::Deck;
use crate::schema::decks;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::{debug, info, instrument};

/// Creates a new deck in the database
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `title` - Title of the deck
/// * `description` - Optional free-form description
/// * `subject` - Optional subject tag
/// * `owner_id` - The ID of the learner who owns the deck
/// * `now` - Creation timestamp
///
/// ### Returns
///
/// A Result containing the newly created Deck if successful
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database insert operation fails
#[instrument(skip(pool, description), fields(owner_id = %owner_id, title = %title))]
pub fn create_deck(
    pool: &DbPool,
    title: String,
    description: Option<String>,
    subject: Option<String>,
    owner_id: String,
    now: DateTime<Utc>,
) -> Result<Deck> {
    debug!("Creating new deck");

    let conn = &mut pool.get()?;

    let new_deck = Deck::new(title, description, subject, owner_id, now);
    let new_deck_id = new_deck.get_id();

    diesel::insert_into(decks::table)
        .values(new_deck.clone())
        .execute(conn)?;

    info!("Successfully created deck with id: {}", new_deck_id);

    Ok(new_deck)
}

/// Retrieves a deck from the database by its ID
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `deck_id` - The ID of the deck to retrieve
///
/// ### Returns
///
/// A Result containing an Option with the Deck if found, or None if not found
#[instrument(skip(pool), fields(deck_id = %deck_id))]
pub fn get_deck(pool: &DbPool, deck_id: &str) -> Result<Option<Deck>> {
    let conn = &mut pool.get()?;

    let result = decks::table
        .find(deck_id)
        .first::<Deck>(conn)
        .optional()?;

    Ok(result)
}

/// Lists all decks owned by a learner, newest first
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `owner_id` - The ID of the learner whose decks to list
///
/// ### Returns
///
/// A Result containing a vector of the learner's Decks
#[instrument(skip(pool), fields(owner_id = %owner_id))]
pub fn list_decks_for_owner(pool: &DbPool, owner_id: &str) -> Result<Vec<Deck>> {
    let conn = &mut pool.get()?;

    let results = decks::table
        .filter(decks::owner_id.eq(owner_id))
        .order_by(decks::created_at.desc())
        .load::<Deck>(conn)?;

    debug!("Retrieved {} decks for owner", results.len());

    Ok(results)
}

/// Deletes a deck and, through foreign-key cascades, all its cards and
/// their reviews
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `deck_id` - The ID of the deck to delete
///
/// ### Returns
///
/// A Result indicating success (Ok(())) or an error
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The deck does not exist
/// - The database delete operation fails
#[instrument(skip(pool), fields(deck_id = %deck_id))]
pub fn delete_deck(pool: &DbPool, deck_id: &str) -> Result<()> {
    debug!("Deleting deck");

    let conn = &mut pool.get()?;

    let deleted = diesel::delete(decks::table.find(deck_id)).execute(conn)?;
    if deleted == 0 {
        return Err(anyhow!("Deck not found"));
    }

    info!("Successfully deleted deck with id: {}", deck_id);

    Ok(())
}
