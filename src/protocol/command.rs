//! Command definitions
//!
//! Represents commands read from a command file.

use crate::index::BookId;
use crate::waitlist::{PatronId, Priority};

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    InsertBook,
    PrintBook,
    PrintBooks,
    BorrowBook,
    ReturnBook,
    DeleteBook,
    FindClosestBook,
    ColorFlipCount,
    Quit,
}

impl CommandType {
    const ALL: [CommandType; 9] = [
        CommandType::InsertBook,
        CommandType::PrintBook,
        CommandType::PrintBooks,
        CommandType::BorrowBook,
        CommandType::ReturnBook,
        CommandType::DeleteBook,
        CommandType::FindClosestBook,
        CommandType::ColorFlipCount,
        CommandType::Quit,
    ];

    /// Name as written in a command file
    pub fn name(self) -> &'static str {
        match self {
            CommandType::InsertBook => "InsertBook",
            CommandType::PrintBook => "PrintBook",
            CommandType::PrintBooks => "PrintBooks",
            CommandType::BorrowBook => "BorrowBook",
            CommandType::ReturnBook => "ReturnBook",
            CommandType::DeleteBook => "DeleteBook",
            CommandType::FindClosestBook => "FindClosestBook",
            CommandType::ColorFlipCount => "ColorFlipCount",
            CommandType::Quit => "Quit",
        }
    }

    /// Look up a command by its exact name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Number of arguments the command takes
    pub fn arity(self) -> usize {
        match self {
            CommandType::InsertBook => 4,
            CommandType::BorrowBook => 3,
            CommandType::PrintBooks | CommandType::ReturnBook => 2,
            CommandType::PrintBook | CommandType::DeleteBook | CommandType::FindClosestBook => 1,
            CommandType::ColorFlipCount | CommandType::Quit => 0,
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a book to the catalogue
    InsertBook {
        id: BookId,
        title: String,
        author: String,
        available: bool,
    },

    /// Report one book
    PrintBook { id: BookId },

    /// Report every book with `lo <= id <= hi`
    PrintBooks { lo: BookId, hi: BookId },

    /// Borrow a book, or join its waitlist
    BorrowBook {
        patron: PatronId,
        id: BookId,
        priority: Priority,
    },

    /// Return a held book, handing it to the next reservation
    ReturnBook { patron: PatronId, id: BookId },

    /// Remove a book, cancelling its waitlist
    DeleteBook { id: BookId },

    /// Report the book(s) nearest to an id
    FindClosestBook { id: BookId },

    /// Report the cumulative colour flip count
    ColorFlipCount,

    /// Stop processing
    Quit,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::InsertBook { .. } => CommandType::InsertBook,
            Command::PrintBook { .. } => CommandType::PrintBook,
            Command::PrintBooks { .. } => CommandType::PrintBooks,
            Command::BorrowBook { .. } => CommandType::BorrowBook,
            Command::ReturnBook { .. } => CommandType::ReturnBook,
            Command::DeleteBook { .. } => CommandType::DeleteBook,
            Command::FindClosestBook { .. } => CommandType::FindClosestBook,
            Command::ColorFlipCount => CommandType::ColorFlipCount,
            Command::Quit => CommandType::Quit,
        }
    }
}
