//! Review session management.
//!
//! The orchestration layer of the engine: it selects the due-card queue
//! for a deck, applies the scheduler to a reviewed card and persists the
//! result, records the review event, and aggregates deck statistics.
//! This is the only module that depends on both the scheduler and the
//! repository; data flows caller -> session -> scheduler -> store.

use crate::config::DEFAULT_DUE_LIMIT;
use crate::db::DbPool;
use crate::errors::{EngineError, Result};
use crate::models::{Card, ImageList, Review};
use crate::repo;
use crate::scheduler::{self, SchedulingState};
use chrono::{DateTime, Duration, Utc};
use diesel::Connection;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Repetition count at or above which a card can count as mastered
const MASTERED_MIN_REPETITIONS: i32 = 5;

/// Interval in days at or above which a card can count as mastered
const MASTERED_MIN_INTERVAL_DAYS: i32 = 30;

/// Event describing a recorded review
///
/// Cross-cutting consumers (XP, achievements, streaks) subscribe to this
/// rather than being called from inside the engine. `record_review` hands
/// the event to its caller as part of the outcome; forwarding it anywhere
/// is the embedding application's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecorded {
    /// The ID of the reviewed card
    pub card_id: String,
    /// The quality rating given in the review
    pub quality: i32,
}

/// The result of recording a review
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    /// The card with its updated scheduling state
    pub card: Card,
    /// The appended review record
    pub review: Review,
    /// Event for cross-cutting consumers
    pub event: ReviewRecorded,
}

/// Aggregated statistics for one deck
///
/// The bucket predicates are independent: a never-reviewed card is both
/// new and due, so the buckets are not a partition of the deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckStatistics {
    /// Number of cards in the deck
    pub total_cards: i64,
    /// Cards currently due for review
    pub due_cards: i64,
    /// Cards never successfully reviewed (zero repetitions)
    pub new_cards: i64,
    /// Cards with at least 5 repetitions and a 30-day interval
    pub mastered_cards: i64,
    /// Mean ease factor across the deck, rounded to 2 decimals; 0 if empty
    pub average_ease_factor: f64,
}

/// Records a review for a card and reschedules it
///
/// This is the only mutating operation in the engine. It fetches the
/// card's current scheduling state, runs the scheduler, computes the next
/// review timestamp (`now + interval` days, or none when the interval is
/// zero so the card is due again immediately), and persists the
/// scheduling update together with the appended review row in a single
/// transaction: a crash cannot leave a scheduling update without its
/// audit record or vice versa.
///
/// Concurrent calls on the same card are not serialized beyond that
/// transaction; a duplicate client retry racing itself can lose one of
/// the two updates.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `card_id` - The ID of the card being reviewed
/// * `reviewer_id` - The ID of the learner performing the review
/// * `quality` - Self-assessed recall quality (0-5)
/// * `time_spent_ms` - Optional time spent in milliseconds
/// * `now` - The review timestamp (injected clock)
///
/// ### Returns
///
/// A Result containing the updated card, the new review and a
/// `ReviewRecorded` event
///
/// ### Errors
///
/// * `InvalidInput` if `card_id` or `reviewer_id` is empty
/// * `InvalidQuality` if `quality` is outside 0-5 (rejected before any
///   store access; nothing is mutated)
/// * `CardNotFound` if the card does not exist
/// * `Store` for database failures
#[instrument(skip(pool), fields(card_id = %card_id, reviewer_id = %reviewer_id, quality = %quality))]
pub fn record_review(
    pool: &DbPool,
    card_id: &str,
    reviewer_id: &str,
    quality: i32,
    time_spent_ms: Option<i32>,
    now: DateTime<Utc>,
) -> Result<ReviewOutcome> {
    if card_id.is_empty() {
        return Err(EngineError::InvalidInput("card id must not be empty".to_string()));
    }
    if reviewer_id.is_empty() {
        return Err(EngineError::InvalidInput("reviewer id must not be empty".to_string()));
    }
    if !(0..=5).contains(&quality) {
        return Err(EngineError::InvalidQuality(quality));
    }

    let mut card = repo::get_card(pool, card_id)?
        .ok_or_else(|| EngineError::CardNotFound(card_id.to_string()))?;

    let new_state = scheduler::next_state(
        quality,
        SchedulingState {
            ease_factor: card.get_ease_factor(),
            interval: card.get_interval(),
            repetitions: card.get_repetitions(),
        },
    )?;

    // Interval 0 means the failure reset put the card straight back into
    // the queue: no next-review timestamp, immediately due.
    let next_review_at = (new_state.interval > 0)
        .then(|| now + Duration::days(new_state.interval as i64));

    card.apply_scheduling(
        new_state.ease_factor,
        new_state.interval,
        new_state.repetitions,
        next_review_at,
        now,
    );

    let review = Review::new(card_id, reviewer_id, quality, time_spent_ms, now);

    let conn = &mut pool.get().map_err(anyhow::Error::from)?;
    conn.transaction::<_, anyhow::Error, _>(|conn| {
        repo::update_card_scheduling(conn, &card)?;
        repo::insert_review(conn, &review)?;
        Ok(())
    })?;

    info!(
        "Recorded review for card {}: interval {}d, repetitions {}, ease {:.2}",
        card_id, new_state.interval, new_state.repetitions, new_state.ease_factor
    );

    let event = ReviewRecorded {
        card_id: card_id.to_string(),
        quality,
    };

    Ok(ReviewOutcome { card, review, event })
}

/// Gets the due-card queue for a deck
///
/// Cards where `next_review_at` is absent or has passed, ordered with
/// never-reviewed cards first (in insertion order) and then previously
/// seen cards by due date, truncated to `limit`.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `deck_id` - The ID of the deck to query
/// * `limit` - Maximum queue length; None uses the default of 20
/// * `now` - The reference time for the due predicate (injected clock)
///
/// ### Returns
///
/// A Result containing the ordered list of due Cards
///
/// ### Errors
///
/// * `DeckNotFound` if the deck does not exist
/// * `Store` for database failures
#[instrument(skip(pool), fields(deck_id = %deck_id))]
pub fn get_due_cards(
    pool: &DbPool,
    deck_id: &str,
    limit: Option<i64>,
    now: DateTime<Utc>,
) -> Result<Vec<Card>> {
    if deck_id.is_empty() {
        return Err(EngineError::InvalidInput("deck id must not be empty".to_string()));
    }

    repo::get_deck(pool, deck_id)?
        .ok_or_else(|| EngineError::DeckNotFound(deck_id.to_string()))?;

    let limit = limit.unwrap_or(DEFAULT_DUE_LIMIT);
    let cards = repo::get_due_cards_for_deck(pool, deck_id, now, limit)?;

    debug!("Due queue for deck {} has {} cards", deck_id, cards.len());

    Ok(cards)
}

/// Computes aggregate statistics for a deck
///
/// One pass over the deck's cards; no per-card queries. The due, new and
/// mastered predicates are evaluated independently, so a card may count
/// toward more than one bucket.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `deck_id` - The ID of the deck to aggregate
/// * `now` - The reference time for the due predicate (injected clock)
///
/// ### Returns
///
/// A Result containing the deck's statistics
///
/// ### Errors
///
/// * `DeckNotFound` if the deck does not exist
/// * `Store` for database failures
#[instrument(skip(pool), fields(deck_id = %deck_id))]
pub fn get_deck_statistics(
    pool: &DbPool,
    deck_id: &str,
    now: DateTime<Utc>,
) -> Result<DeckStatistics> {
    repo::get_deck(pool, deck_id)?
        .ok_or_else(|| EngineError::DeckNotFound(deck_id.to_string()))?;

    let cards = repo::get_cards_for_deck(pool, deck_id)?;

    let mut due_cards = 0;
    let mut new_cards = 0;
    let mut mastered_cards = 0;
    let mut ease_sum = 0.0;

    for card in &cards {
        if card.is_due(now) {
            due_cards += 1;
        }
        if card.get_repetitions() == 0 {
            new_cards += 1;
        }
        if card.get_repetitions() >= MASTERED_MIN_REPETITIONS
            && card.get_interval() >= MASTERED_MIN_INTERVAL_DAYS
        {
            mastered_cards += 1;
        }
        ease_sum += card.get_ease_factor();
    }

    let average_ease_factor = if cards.is_empty() {
        0.0
    } else {
        (ease_sum / cards.len() as f64 * 100.0).round() / 100.0
    };

    Ok(DeckStatistics {
        total_cards: cards.len() as i64,
        due_cards,
        new_cards,
        mastered_cards,
        average_ease_factor,
    })
}

/// Creates a card in a deck
///
/// ### Errors
///
/// * `InvalidInput` if the front or back text is empty
/// * `DeckNotFound` if the deck does not exist
/// * `Store` for database failures
#[instrument(skip(pool, front, back, images), fields(deck_id = %deck_id))]
pub fn create_card(
    pool: &DbPool,
    deck_id: &str,
    front: String,
    back: String,
    images: Option<ImageList>,
    now: DateTime<Utc>,
) -> Result<Card> {
    if front.trim().is_empty() || back.trim().is_empty() {
        return Err(EngineError::InvalidInput(
            "card front and back must not be empty".to_string(),
        ));
    }

    repo::get_deck(pool, deck_id)?
        .ok_or_else(|| EngineError::DeckNotFound(deck_id.to_string()))?;

    let card = repo::create_card(pool, deck_id, front, back, images, now)?;
    Ok(card)
}

/// Updates a card's content (front, back, images)
///
/// Scheduling state is never touched by this operation.
///
/// ### Errors
///
/// * `InvalidInput` if the front or back text is empty
/// * `CardNotFound` if the card does not exist
/// * `Store` for database failures
#[instrument(skip(pool, front, back, images), fields(card_id = %card_id))]
pub fn update_card(
    pool: &DbPool,
    card_id: &str,
    front: String,
    back: String,
    images: Option<ImageList>,
) -> Result<Card> {
    if front.trim().is_empty() || back.trim().is_empty() {
        return Err(EngineError::InvalidInput(
            "card front and back must not be empty".to_string(),
        ));
    }

    repo::get_card(pool, card_id)?
        .ok_or_else(|| EngineError::CardNotFound(card_id.to_string()))?;

    let card = repo::update_card_content(pool, card_id, front, back, images)?;
    Ok(card)
}

/// Deletes a card and its review history
///
/// ### Errors
///
/// * `CardNotFound` if the card does not exist
/// * `Store` for database failures
#[instrument(skip(pool), fields(card_id = %card_id))]
pub fn delete_card(pool: &DbPool, card_id: &str) -> Result<()> {
    repo::get_card(pool, card_id)?
        .ok_or_else(|| EngineError::CardNotFound(card_id.to_string()))?;

    repo::delete_card(pool, card_id)?;
    Ok(())
}
