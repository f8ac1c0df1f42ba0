/// Data models module
///
/// This module defines the core data structures used throughout the engine.
/// It includes database models that map to database tables, as well as
/// methods for creating and manipulating these models.

// Re-export all model types
mod image_list;
pub use image_list::ImageList;

mod deck;
pub use deck::Deck;

mod card;
pub use card::Card;

mod review;
pub use review::Review;
