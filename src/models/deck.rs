use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a deck: a named collection of cards owned by one learner
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::decks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Deck {
    /// Unique identifier for the deck (UUID v4 as string)
    id: String,

    /// Title of the deck
    title: String,

    /// Optional free-form description
    description: Option<String>,

    /// Optional subject tag (e.g. "tax law", "auditing")
    subject: Option<String>,

    /// The ID of the learner who owns this deck
    owner_id: String,

    /// When this deck was created
    created_at: NaiveDateTime,
}

impl Deck {
    /// Creates a new deck for a learner
    ///
    /// ### Arguments
    ///
    /// * `title` - Title of the deck
    /// * `description` - Optional free-form description
    /// * `subject` - Optional subject tag
    /// * `owner_id` - The ID of the learner who owns this deck
    /// * `created_at` - Creation timestamp
    ///
    /// ### Returns
    ///
    /// A new `Deck` instance with a fresh UUID
    pub fn new(
        title: String,
        description: Option<String>,
        subject: Option<String>,
        owner_id: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            subject,
            owner_id,
            created_at: created_at.naive_utc(),
        }
    }

    /// Gets the deck's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the deck's title
    pub fn get_title(&self) -> String {
        self.title.clone()
    }

    /// Sets the deck's title
    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    /// Gets the deck's description
    pub fn get_description(&self) -> Option<String> {
        self.description.clone()
    }

    /// Sets the deck's description
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Gets the deck's subject tag
    pub fn get_subject(&self) -> Option<String> {
        self.subject.clone()
    }

    /// Sets the deck's subject tag
    pub fn set_subject(&mut self, subject: Option<String>) {
        self.subject = subject;
    }

    /// Gets the ID of the learner who owns this deck
    pub fn get_owner_id(&self) -> String {
        self.owner_id.clone()
    }

    /// Gets the deck's creation timestamp as a DateTime<Utc>
    pub fn get_created_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }
}
