/// Repository module
///
/// This module provides the data access layer for the engine.
/// It contains functions for interacting with the database, including
/// creating, retrieving, and updating decks, cards and reviews.
///
/// The repository pattern abstracts away the details of database access:
/// the scheduler never touches this module, and the session layer is the
/// only component that depends on both.

mod deck_repo;
mod card_repo;
mod review_repo;

// Re-export all repository functions
pub use deck_repo::*;
pub use card_repo::*;
pub use review_repo::*;
