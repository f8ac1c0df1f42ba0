use crate::db::DbPool;
use crate::models::{Card, ImageList};
use crate::schema::cards;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::{debug, info, instrument};

/// Creates a new card in the database
///
/// The card starts with the default scheduling state (ease factor 2.5,
/// interval 0, no repetitions, immediately due). The caller is expected
/// to have verified that the deck exists.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `deck_id` - The ID of the deck this card belongs to
/// * `front` - Front (prompt) text
/// * `back` - Back (answer) text
/// * `images` - Optional image attachments
/// * `now` - Creation timestamp
///
/// ### Returns
///
/// A Result containing the newly created Card if successful
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database insert operation fails
#[instrument(skip(pool, front, back, images), fields(deck_id = %deck_id))]
pub fn create_card(
    pool: &DbPool,
    deck_id: &str,
    front: String,
    back: String,
    images: Option<ImageList>,
    now: DateTime<Utc>,
) -> Result<Card> {
    debug!("Creating new card");

    let conn = &mut pool.get()?;

    let new_card = Card::new(deck_id.to_string(), front, back, images, now);
    let new_card_id = new_card.get_id();

    diesel::insert_into(cards::table)
        .values(new_card.clone())
        .execute(conn)?;

    info!("Successfully created card with id: {}", new_card_id);

    Ok(new_card)
}

/// Retrieves a card from the database by its ID
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `card_id` - The ID of the card to retrieve
///
/// ### Returns
///
/// A Result containing an Option with the Card if found, or None if not found
#[instrument(skip(pool), fields(card_id = %card_id))]
pub fn get_card(pool: &DbPool, card_id: &str) -> Result<Option<Card>> {
    let conn = &mut pool.get()?;

    let result = cards::table
        .find(card_id)
        .first::<Card>(conn)
        .optional()?;

    Ok(result)
}

/// Gets all cards for a specific deck, in insertion order
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `deck_id` - The ID of the deck to get cards for
///
/// ### Returns
///
/// A Result containing a vector of Cards belonging to the deck
#[instrument(skip(pool), fields(deck_id = %deck_id))]
pub fn get_cards_for_deck(pool: &DbPool, deck_id: &str) -> Result<Vec<Card>> {
    let conn = &mut pool.get()?;

    let results = cards::table
        .filter(cards::deck_id.eq(deck_id))
        .order_by(cards::created_at.asc())
        .load::<Card>(conn)?;

    debug!("Fetched {} cards for deck {}", results.len(), deck_id);

    Ok(results)
}

/// Gets the due cards for a deck, ordered for a review session
///
/// Selection: `next_review_at` is null (never reviewed) or has passed.
/// Ordering: `next_review_at` ascending, then `created_at` ascending.
/// SQLite sorts NULL before every non-null value in ascending order, so
/// never-reviewed cards come first, in insertion order, followed by
/// previously seen cards from most to least overdue. This tie-break is
/// deliberate: brand-new material surfaces before stale material of
/// equal staleness.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `deck_id` - The ID of the deck to query
/// * `now` - The reference time for the due predicate
/// * `limit` - Maximum number of cards to return
///
/// ### Returns
///
/// A Result containing the ordered, truncated vector of due Cards
#[instrument(skip(pool), fields(deck_id = %deck_id, limit = %limit))]
pub fn get_due_cards_for_deck(
    pool: &DbPool,
    deck_id: &str,
    now: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<Card>> {
    let conn = &mut pool.get()?;

    let results = cards::table
        .filter(cards::deck_id.eq(deck_id))
        .filter(
            cards::next_review_at
                .is_null()
                .or(cards::next_review_at.le(now.naive_utc())),
        )
        .order_by((cards::next_review_at.asc(), cards::created_at.asc()))
        .limit(limit)
        .load::<Card>(conn)?;

    debug!("Retrieved {} due cards for deck {}", results.len(), deck_id);

    Ok(results)
}

/// Updates a card's content fields (front, back, images)
///
/// Scheduling fields are deliberately not touched here; they are only
/// ever written through `update_card_scheduling` with scheduler output.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `card_id` - The ID of the card to update
/// * `front` - New front text
/// * `back` - New back text
/// * `images` - New image attachments
///
/// ### Returns
///
/// A Result containing the updated Card
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The card does not exist
/// - The database update operation fails
#[instrument(skip(pool, front, back, images), fields(card_id = %card_id))]
pub fn update_card_content(
    pool: &DbPool,
    card_id: &str,
    front: String,
    back: String,
    images: Option<ImageList>,
) -> Result<Card> {
    debug!("Updating card content");

    let conn = &mut pool.get()?;

    let updated = diesel::update(cards::table.find(card_id))
        .set((
            cards::front.eq(front),
            cards::back.eq(back),
            cards::images.eq(images),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(anyhow!("Card not found"));
    }

    let card = cards::table.find(card_id).first::<Card>(conn)?;

    debug!("Successfully updated card content for card_id: {}", card_id);

    Ok(card)
}

/// Writes a card's scheduling fields
///
/// Takes a connection rather than the pool so the session layer can run
/// this inside the same transaction as the review insert.
///
/// ### Arguments
///
/// * `conn` - A mutable reference to a SQLite connection
/// * `card` - The card whose scheduling fields to persist
///
/// ### Returns
///
/// A Result indicating success (Ok(())) or an error
///
/// ### Errors
///
/// Returns an error if the card does not exist or the update fails
pub fn update_card_scheduling(conn: &mut SqliteConnection, card: &Card) -> Result<()> {
    let updated = diesel::update(cards::table.find(card.get_id()))
        .set((
            cards::ease_factor.eq(card.get_ease_factor()),
            cards::interval.eq(card.get_interval()),
            cards::repetitions.eq(card.get_repetitions()),
            cards::last_reviewed_at.eq(card.get_last_reviewed_at_raw()),
            cards::next_review_at.eq(card.get_next_review_at_raw()),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(anyhow!("Card not found"));
    }

    Ok(())
}

/// Deletes a card and, through foreign-key cascades, its reviews
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `card_id` - The ID of the card to delete
///
/// ### Returns
///
/// A Result indicating success (Ok(())) or an error
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The card does not exist
/// - The database delete operation fails
#[instrument(skip(pool), fields(card_id = %card_id))]
pub fn delete_card(pool: &DbPool, card_id: &str) -> Result<()> {
    debug!("Deleting card");

    let conn = &mut pool.get()?;

    let deleted = diesel::delete(cards::table.find(card_id)).execute(conn)?;
    if deleted == 0 {
        return Err(anyhow!("Card not found"));
    }

    info!("Successfully deleted card with id: {}", card_id);

    Ok(())
}

/// Counts the cards in a deck
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `deck_id` - The ID of the deck to count cards for
///
/// ### Returns
///
/// A Result containing the number of cards in the deck
#[instrument(skip(pool), fields(deck_id = %deck_id))]
pub fn count_cards_for_deck(pool: &DbPool, deck_id: &str) -> Result<i64> {
    let conn = &mut pool.get()?;

    let count = cards::table
        .filter(cards::deck_id.eq(deck_id))
        .count()
        .get_result::<i64>(conn)?;

    Ok(count)
}
