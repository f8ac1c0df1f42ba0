use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents one review event for a card
///
/// Reviews are append-only: the engine never updates or deletes them.
/// They form the audit trail and the statistics source.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::reviews)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Review {
    /// Unique identifier for the review (UUID v4 as string)
    id: String,

    /// The ID of the card this review belongs to
    card_id: String,

    /// The ID of the learner who performed the review
    reviewer_id: String,

    /// Self-assessed recall quality, 0-5 (< 3 is a failed recall)
    quality: i32,

    /// Time spent on the review in milliseconds, if the client reported it
    time_spent_ms: Option<i32>,

    /// When this review occurred
    created_at: NaiveDateTime,
}

impl Review {
    /// Creates a new review for a card
    ///
    /// Quality validation happens in the session layer before any review
    /// is constructed; this constructor only asserts the contract.
    ///
    /// ### Arguments
    ///
    /// * `card_id` - The ID of the card being reviewed
    /// * `reviewer_id` - The ID of the learner performing the review
    /// * `quality` - Self-assessed recall quality (0-5)
    /// * `time_spent_ms` - Optional time spent in milliseconds
    /// * `created_at` - When the review occurred
    ///
    /// ### Returns
    ///
    /// A new `Review` instance with a fresh UUID
    pub fn new(
        card_id: &str,
        reviewer_id: &str,
        quality: i32,
        time_spent_ms: Option<i32>,
        created_at: DateTime<Utc>,
    ) -> Self {
        debug_assert!((0..=5).contains(&quality), "quality out of range: {}", quality);

        Self {
            id: Uuid::new_v4().to_string(),
            card_id: card_id.to_string(),
            reviewer_id: reviewer_id.to_string(),
            quality,
            time_spent_ms,
            created_at: created_at.naive_utc(),
        }
    }

    /// Gets the review's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the ID of the card this review belongs to
    pub fn get_card_id(&self) -> String {
        self.card_id.clone()
    }

    /// Gets the ID of the learner who performed the review
    pub fn get_reviewer_id(&self) -> String {
        self.reviewer_id.clone()
    }

    /// Gets the review's quality rating
    pub fn get_quality(&self) -> i32 {
        self.quality
    }

    /// Gets the time spent on the review in milliseconds
    pub fn get_time_spent_ms(&self) -> Option<i32> {
        self.time_spent_ms
    }

    /// Gets the review's timestamp as a DateTime<Utc>
    pub fn get_created_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }
}
