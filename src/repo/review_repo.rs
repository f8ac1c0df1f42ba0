use crate::db::DbPool;
use crate::models::Review;
use crate::schema::reviews;
use anyhow::Result;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::{debug, instrument};

/// Inserts a review row
///
/// Reviews are append-only; there is no update or delete counterpart.
/// Takes a connection rather than the pool so the session layer can run
/// this inside the same transaction as the card scheduling update.
///
/// ### Arguments
///
/// * `conn` - A mutable reference to a SQLite connection
/// * `review` - The review to insert
///
/// ### Returns
///
/// A Result indicating success (Ok(())) or an error
pub fn insert_review(conn: &mut SqliteConnection, review: &Review) -> Result<()> {
    diesel::insert_into(reviews::table)
        .values(review)
        .execute(conn)?;

    Ok(())
}

/// Gets all reviews for a card, newest first
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `card_id` - The ID of the card to get reviews for
///
/// ### Returns
///
/// A Result containing a vector of Reviews for the card
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
#[instrument(skip(pool), fields(card_id = %card_id))]
pub fn get_reviews_for_card(pool: &DbPool, card_id: &str) -> Result<Vec<Review>> {
    let conn = &mut pool.get()?;

    let results = reviews::table
        .filter(reviews::card_id.eq(card_id))
        .order_by(reviews::created_at.desc())
        .load::<Review>(conn)?;

    debug!("Retrieved {} reviews for card {}", results.len(), card_id);

    Ok(results)
}
