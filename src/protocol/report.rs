//! Report definitions
//!
//! Events produced by executing commands, and the sinks that receive them.

use std::fmt;
use std::io::Write;

use crate::error::Result;
use crate::index::BookId;
use crate::waitlist::PatronId;

/// Read-only snapshot of one book, as shown in reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookView {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub available: bool,
    pub borrowed_by: Option<PatronId>,

    /// Waiting patrons in service order
    pub reservations: Vec<PatronId>,
}

/// Something a command produced that the caller should see
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Full details of one book
    BookDetails(BookView),

    BookNotFound(BookId),
    DuplicateBook(BookId),

    Borrowed { book: BookId, patron: PatronId },
    Reserved { book: BookId, patron: PatronId },
    WaitlistFull { book: BookId, patron: PatronId },

    Returned { book: BookId, patron: PatronId },
    Allotted { book: BookId, patron: PatronId },
    InvalidReturn { book: BookId, patron: PatronId },

    /// Book removed; `cancelled` lists waiting patrons in service order
    Deleted { book: BookId, cancelled: Vec<PatronId> },

    NoClosestBook,
    ColorFlipCount(u64),
    Terminated,
}

impl fmt::Display for BookView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BookID = {}", self.id)?;
        writeln!(f, "Title = \"{}\"", self.title)?;
        writeln!(f, "Author = \"{}\"", self.author)?;
        writeln!(
            f,
            "Availability = \"{}\"",
            if self.available { "Yes" } else { "No" }
        )?;
        match self.borrowed_by {
            Some(patron) => writeln!(f, "BorrowedBy = {}", patron)?,
            None => writeln!(f, "BorrowedBy = None")?,
        }
        writeln!(f, "Reservations = [{}]", join(&self.reservations))?;
        writeln!(f)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::BookDetails(view) => write!(f, "{}", view),
            Event::BookNotFound(book) => writeln!(f, "Book {} not found in the library\n", book),
            Event::DuplicateBook(book) => {
                writeln!(f, "Book {} already exists in the library\n", book)
            }
            Event::Borrowed { book, patron } => {
                writeln!(f, "Book {} Borrowed by Patron {}\n", book, patron)
            }
            Event::Reserved { book, patron } => {
                writeln!(f, "Book {} Reserved by Patron {}\n", book, patron)
            }
            Event::WaitlistFull { .. } => writeln!(f, "Reservation waitlist is full."),
            Event::Returned { book, patron } => {
                writeln!(f, "Book {} Returned by Patron {}\n", book, patron)
            }
            Event::Allotted { book, patron } => {
                writeln!(f, "Book {} Allotted to Patron {}\n", book, patron)
            }
            Event::InvalidReturn { patron, .. } => {
                writeln!(f, "Patron {} cannot return a book they haven't borrowed", patron)
            }
            Event::Deleted { book, cancelled } => match cancelled.len() {
                0 => writeln!(f, "Book {} is no longer available\n", book),
                1 => writeln!(
                    f,
                    "Book {} is no longer available. Reservations made by Patrons {} has been cancelled!\n",
                    book,
                    join(cancelled)
                ),
                _ => writeln!(
                    f,
                    "Book {} is no longer available. Reservations made by Patrons {} have been cancelled!\n",
                    book,
                    join(cancelled)
                ),
            },
            Event::NoClosestBook => writeln!(f, "No closest book found"),
            Event::ColorFlipCount(count) => writeln!(f, "Colour Flip Count: {}\n", count),
            Event::Terminated => writeln!(f, "Program Terminated!!"),
        }
    }
}

fn join(patrons: &[PatronId]) -> String {
    patrons
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Destination for events produced by `Library::execute`
pub trait Reporter {
    /// Deliver one event
    fn report(&mut self, event: Event) -> Result<()>;

    /// Push any buffered output through
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Collects events in memory
impl Reporter for Vec<Event> {
    fn report(&mut self, event: Event) -> Result<()> {
        self.push(event);
        Ok(())
    }
}

/// Renders events as human-readable text
pub struct TextReporter<W: Write> {
    writer: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, event: Event) -> Result<()> {
        write!(self.writer, "{}", event)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
