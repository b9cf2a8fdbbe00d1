//! Error types for ShelfKV
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::index::BookId;
use crate::waitlist::PatronId;

/// Result type alias using LibraryError
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Unified error type for ShelfKV operations
#[derive(Debug, Error)]
pub enum LibraryError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Catalogue Errors
    // -------------------------------------------------------------------------
    #[error("Book {0} not found in the library")]
    BookNotFound(BookId),

    #[error("Book {0} already exists in the library")]
    DuplicateBook(BookId),

    #[error("Patron {patron} cannot return book {book}: not the current holder")]
    InvalidReturn { book: BookId, patron: PatronId },

    #[error("Waitlist for book {book} is full ({capacity} reservations), patron {patron} not queued")]
    WaitlistFull {
        book: BookId,
        patron: PatronId,
        capacity: usize,
    },

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Parse error on {line:?}: {reason}")]
    Parse { line: String, reason: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
