use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ImageList;
use crate::scheduler::INITIAL_EASE_FACTOR;

/// Represents a card: a front/back learning unit plus its scheduling state
///
/// The four scheduling fields (`ease_factor`, `interval`, `repetitions`,
/// `next_review_at`) are only ever mutated with output from the scheduler;
/// everything else is content.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::cards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Card {
    /// Unique identifier for the card (UUID v4 as string)
    id: String,

    /// The ID of the deck this card belongs to
    deck_id: String,

    /// Front (prompt) text
    front: String,

    /// Back (answer) text
    back: String,

    /// Optional image attachments, stored as a JSON array of URLs
    images: Option<ImageList>,

    /// Multiplier controlling how fast intervals grow; never below 1.3
    ease_factor: f64,

    /// Days until the next scheduled review; 0 means not yet scheduled
    interval: i32,

    /// Consecutive successful reviews since the last failure reset
    repetitions: i32,

    /// When this card was last reviewed, or None if never reviewed
    last_reviewed_at: Option<NaiveDateTime>,

    /// When this card should next be reviewed; None means immediately due
    next_review_at: Option<NaiveDateTime>,

    /// When this card was created
    created_at: NaiveDateTime,
}

impl Card {
    /// Creates a new card in a deck
    ///
    /// The scheduling state starts at its lifecycle defaults: ease factor
    /// 2.5, interval 0, zero repetitions and no next-review timestamp, so
    /// the card is immediately due.
    ///
    /// ### Arguments
    ///
    /// * `deck_id` - The ID of the deck this card belongs to
    /// * `front` - Front (prompt) text
    /// * `back` - Back (answer) text
    /// * `images` - Optional image attachments
    /// * `created_at` - Creation timestamp
    ///
    /// ### Returns
    ///
    /// A new `Card` instance with default scheduling state
    pub fn new(
        deck_id: String,
        front: String,
        back: String,
        images: Option<ImageList>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            deck_id,
            front,
            back,
            images,
            ease_factor: INITIAL_EASE_FACTOR,
            interval: 0,
            repetitions: 0,
            last_reviewed_at: None,
            next_review_at: None,
            created_at: created_at.naive_utc(),
        }
    }

    /// Gets the card's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the ID of the deck this card belongs to
    pub fn get_deck_id(&self) -> String {
        self.deck_id.clone()
    }

    /// Gets the card's front text
    pub fn get_front(&self) -> String {
        self.front.clone()
    }

    /// Sets the card's front text
    pub fn set_front(&mut self, front: String) {
        self.front = front;
    }

    /// Gets the card's back text
    pub fn get_back(&self) -> String {
        self.back.clone()
    }

    /// Sets the card's back text
    pub fn set_back(&mut self, back: String) {
        self.back = back;
    }

    /// Gets the card's image attachments
    pub fn get_images(&self) -> Option<ImageList> {
        self.images.clone()
    }

    /// Sets the card's image attachments
    pub fn set_images(&mut self, images: Option<ImageList>) {
        self.images = images;
    }

    /// Gets the card's ease factor
    pub fn get_ease_factor(&self) -> f64 {
        self.ease_factor
    }

    /// Gets the card's interval in days
    pub fn get_interval(&self) -> i32 {
        self.interval
    }

    /// Gets the card's consecutive-success count
    pub fn get_repetitions(&self) -> i32 {
        self.repetitions
    }

    /// Gets the card's last review timestamp as a DateTime<Utc>
    pub fn get_last_reviewed_at(&self) -> Option<DateTime<Utc>> {
        self.last_reviewed_at
            .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
    }

    /// Gets the card's raw last review timestamp
    pub fn get_last_reviewed_at_raw(&self) -> Option<NaiveDateTime> {
        self.last_reviewed_at
    }

    /// Gets the card's next review timestamp as a DateTime<Utc>
    ///
    /// None means the card has never been reviewed and is immediately due.
    pub fn get_next_review_at(&self) -> Option<DateTime<Utc>> {
        self.next_review_at
            .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
    }

    /// Gets the card's raw next review timestamp
    pub fn get_next_review_at_raw(&self) -> Option<NaiveDateTime> {
        self.next_review_at
    }

    /// Gets the card's creation timestamp as a DateTime<Utc>
    pub fn get_created_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }

    /// Returns whether this card is due for review at the given time
    ///
    /// A card is due iff it has never been scheduled (`next_review_at` is
    /// None) or its next review timestamp has passed.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.get_next_review_at() {
            None => true,
            Some(next) => next <= now,
        }
    }

    /// Applies scheduler output to this card's scheduling fields
    ///
    /// This is the only mutation path for the scheduling state.
    ///
    /// ### Arguments
    ///
    /// * `ease_factor` - New ease factor from the scheduler
    /// * `interval` - New interval in days from the scheduler
    /// * `repetitions` - New consecutive-success count from the scheduler
    /// * `next_review_at` - When the card is next due, or None for
    ///   immediately due
    /// * `reviewed_at` - The review timestamp recorded as `last_reviewed_at`
    pub fn apply_scheduling(
        &mut self,
        ease_factor: f64,
        interval: i32,
        repetitions: i32,
        next_review_at: Option<DateTime<Utc>>,
        reviewed_at: DateTime<Utc>,
    ) {
        self.ease_factor = ease_factor;
        self.interval = interval;
        self.repetitions = repetitions;
        self.next_review_at = next_review_at.map(|dt| dt.naive_utc());
        self.last_reviewed_at = Some(reviewed_at.naive_utc());
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_card_new_defaults() {
        let deck_id = Uuid::new_v4().to_string();
        let card = Card::new(
            deck_id.clone(),
            "What is accrual accounting?".to_string(),
            "Revenue is recognized when earned, not when received.".to_string(),
            None,
            Utc::now(),
        );

        assert!(Uuid::parse_str(&card.get_id()).is_ok());
        assert_eq!(card.get_deck_id(), deck_id);
        assert_eq!(card.get_ease_factor(), 2.5);
        assert_eq!(card.get_interval(), 0);
        assert_eq!(card.get_repetitions(), 0);
        assert_eq!(card.get_last_reviewed_at(), None);
        assert_eq!(card.get_next_review_at(), None);
    }

    #[test]
    fn test_new_card_is_immediately_due() {
        let card = Card::new(
            "deck-1".to_string(),
            "front".to_string(),
            "back".to_string(),
            None,
            Utc::now(),
        );
        assert!(card.is_due(Utc::now()));
    }

    #[test]
    fn test_due_predicate_boundaries() {
        let now = Utc::now();
        let mut card = Card::new(
            "deck-1".to_string(),
            "front".to_string(),
            "back".to_string(),
            None,
            now,
        );

        // One second in the past: due
        card.apply_scheduling(2.5, 1, 1, Some(now - Duration::seconds(1)), now);
        assert!(card.is_due(now));

        // Exactly now: due
        card.apply_scheduling(2.5, 1, 1, Some(now), now);
        assert!(card.is_due(now));

        // One second in the future: not due
        card.apply_scheduling(2.5, 1, 1, Some(now + Duration::seconds(1)), now);
        assert!(!card.is_due(now));
    }

    #[test]
    fn test_apply_scheduling_sets_all_fields() {
        let now = Utc::now();
        let mut card = Card::new(
            "deck-1".to_string(),
            "front".to_string(),
            "back".to_string(),
            None,
            now,
        );

        let next = now + Duration::days(6);
        card.apply_scheduling(2.6, 6, 2, Some(next), now);

        assert_eq!(card.get_ease_factor(), 2.6);
        assert_eq!(card.get_interval(), 6);
        assert_eq!(card.get_repetitions(), 2);
        assert_eq!(
            card.get_next_review_at().map(|dt| dt.timestamp()),
            Some(next.timestamp())
        );
        assert_eq!(
            card.get_last_reviewed_at().map(|dt| dt.timestamp()),
            Some(now.timestamp())
        );
    }

    #[test]
    fn test_card_images() {
        let images = ImageList(vec!["https://cdn.example/balance-sheet.png".to_string()]);
        let mut card = Card::new(
            "deck-1".to_string(),
            "front".to_string(),
            "back".to_string(),
            Some(images.clone()),
            Utc::now(),
        );
        assert_eq!(card.get_images(), Some(images));

        card.set_images(None);
        assert_eq!(card.get_images(), None);
    }
}
