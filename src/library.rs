//! Library Module
//!
//! The catalogue service that composes the index and per-book waitlists.
//!
//! ## Responsibilities
//! - Own every book through the ordered index
//! - Grant, queue and hand over books on borrow/return
//! - Cancel waitlists on delete, reporting patrons in service order
//! - Route parsed commands and report their results
//!
//! ## Book States
//! ```text
//!                borrow (no holder, or same holder)
//!   Available ──────────────────────────────────────▶ Held
//!       ▲                                              │ │
//!       │ return by holder, waitlist empty             │ │ borrow by other patron
//!       └──────────────────────────────────────────────┘ │ (queued or rejected if full)
//!                                                         ▼
//!                   return by holder, waitlist non-empty: Held by next reservation
//! ```

use crate::config::Config;
use crate::error::{LibraryError, Result};
use crate::index::{BookId, Closest, OrderedIndex};
use crate::protocol::{BookView, Command, Event, Reporter};
use crate::waitlist::{PatronId, Priority, Reservation, Waitlist};

/// A catalogue entry
#[derive(Debug, Clone)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,

    /// True when nobody currently holds the book
    pub available: bool,

    /// Current holder, if any
    pub borrowed_by: Option<PatronId>,

    /// Pending reservations, owned by this book
    waitlist: Waitlist,
}

impl Book {
    fn new(
        id: BookId,
        title: String,
        author: String,
        available: bool,
        waitlist_capacity: usize,
    ) -> Self {
        Self {
            id,
            title,
            author,
            available,
            borrowed_by: None,
            waitlist: Waitlist::with_capacity(waitlist_capacity),
        }
    }

    pub fn waitlist(&self) -> &Waitlist {
        &self.waitlist
    }

    /// Waiting patrons in service order, without consuming the waitlist
    pub fn reservations(&self) -> Vec<PatronId> {
        self.waitlist.snapshot().iter().map(|r| r.patron).collect()
    }

    /// Snapshot for reports
    pub fn view(&self) -> BookView {
        BookView {
            id: self.id,
            title: self.title.clone(),
            author: self.author.clone(),
            available: self.available,
            borrowed_by: self.borrowed_by,
            reservations: self.reservations(),
        }
    }
}

/// Result of a successful borrow request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowOutcome {
    /// The patron now holds the book
    Granted,

    /// The patron joined the waitlist
    Queued,
}

/// Result of a successful return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnOutcome {
    /// Patron the book was handed to from the waitlist, if anyone was waiting
    pub allotted_to: Option<PatronId>,
}

/// Whether command processing should go on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The catalogue service
///
/// ## Ownership
/// The index owns every `Book`, and each book owns its waitlist. Nothing
/// outside the library holds a reference across calls, so every operation
/// runs to completion against a consistent tree.
pub struct Library {
    config: Config,

    /// All books, keyed by id
    index: OrderedIndex<Book>,

    /// Arrival counter stamped on each queued reservation
    next_sequence: u64,
}

impl Library {
    /// Create an empty library with the given config
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            index: OrderedIndex::new(),
            next_sequence: 0,
        })
    }

    /// Execute a command
    ///
    /// Routes commands to the typed operations and reports what happened.
    /// Catalogue rejections (unknown book, invalid return, full waitlist)
    /// are reported as events and do not fail the call.
    pub fn execute(&mut self, command: Command, reporter: &mut dyn Reporter) -> Result<Flow> {
        match command {
            Command::InsertBook {
                id,
                title,
                author,
                available,
            } => {
                if let Err(e) = self.insert_book(id, title, author, available) {
                    reject(e, reporter)?;
                }
            }
            Command::PrintBook { id } => match self.book(id) {
                Ok(book) => reporter.report(Event::BookDetails(book.view()))?,
                Err(e) => reject(e, reporter)?,
            },
            Command::PrintBooks { lo, hi } => {
                for book in self.books(lo, hi) {
                    reporter.report(Event::BookDetails(book.view()))?;
                }
            }
            Command::BorrowBook {
                patron,
                id,
                priority,
            } => match self.borrow_book(patron, id, priority) {
                Ok(BorrowOutcome::Granted) => {
                    reporter.report(Event::Borrowed { book: id, patron })?
                }
                Ok(BorrowOutcome::Queued) => {
                    reporter.report(Event::Reserved { book: id, patron })?
                }
                Err(e) => reject(e, reporter)?,
            },
            Command::ReturnBook { patron, id } => match self.return_book(patron, id) {
                Ok(outcome) => {
                    reporter.report(Event::Returned { book: id, patron })?;
                    if let Some(next) = outcome.allotted_to {
                        reporter.report(Event::Allotted {
                            book: id,
                            patron: next,
                        })?;
                    }
                }
                Err(e) => reject(e, reporter)?,
            },
            Command::DeleteBook { id } => match self.delete_book(id) {
                Ok(cancelled) => reporter.report(Event::Deleted {
                    book: id,
                    cancelled,
                })?,
                Err(e) => reject(e, reporter)?,
            },
            Command::FindClosestBook { id } => match self.closest(id) {
                Some(closest) => {
                    for book in closest.into_vec() {
                        reporter.report(Event::BookDetails(book.view()))?;
                    }
                }
                None => reporter.report(Event::NoClosestBook)?,
            },
            Command::ColorFlipCount => {
                reporter.report(Event::ColorFlipCount(self.color_flip_count()))?
            }
            Command::Quit => {
                reporter.report(Event::Terminated)?;
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }

    // =========================================================================
    // Mutating operations
    // =========================================================================

    /// Add a book. Fails with `DuplicateBook` if the id is already present.
    pub fn insert_book(
        &mut self,
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        available: bool,
    ) -> Result<()> {
        if self.index.contains(id) {
            return Err(LibraryError::DuplicateBook(id));
        }

        let book = Book::new(
            id,
            title.into(),
            author.into(),
            available,
            self.config.waitlist_capacity,
        );
        self.index.insert(id, book);

        tracing::debug!(book = id, available, "book inserted");
        Ok(())
    }

    /// Borrow a book.
    ///
    /// The book is granted when it is available, when nobody holds it (a book
    /// inserted as unavailable), or when `patron` already holds it (a re-borrow
    /// by the holder is granted again rather than queued). Otherwise the
    /// request joins the waitlist.
    pub fn borrow_book(
        &mut self,
        patron: PatronId,
        id: BookId,
        priority: Priority,
    ) -> Result<BorrowOutcome> {
        let book = self
            .index
            .get_mut(id)
            .ok_or(LibraryError::BookNotFound(id))?;

        if book.available || book.borrowed_by.is_none() || book.borrowed_by == Some(patron) {
            book.available = false;
            book.borrowed_by = Some(patron);
            tracing::debug!(book = id, patron, "book granted");
            return Ok(BorrowOutcome::Granted);
        }

        let reservation = Reservation::new(patron, priority, self.next_sequence);
        if book.waitlist.offer(reservation).is_err() {
            tracing::debug!(book = id, patron, "waitlist full, reservation dropped");
            return Err(LibraryError::WaitlistFull {
                book: id,
                patron,
                capacity: book.waitlist.capacity(),
            });
        }
        self.next_sequence += 1;

        tracing::debug!(
            book = id,
            patron,
            priority,
            waiting = book.waitlist.len(),
            "reservation queued"
        );
        Ok(BorrowOutcome::Queued)
    }

    /// Return a book held by `patron`.
    ///
    /// If anyone is waiting, the book goes straight to the reservation with
    /// the lowest (priority, sequence).
    pub fn return_book(&mut self, patron: PatronId, id: BookId) -> Result<ReturnOutcome> {
        let book = self
            .index
            .get_mut(id)
            .ok_or(LibraryError::BookNotFound(id))?;

        if book.borrowed_by != Some(patron) {
            return Err(LibraryError::InvalidReturn { book: id, patron });
        }

        book.available = true;
        book.borrowed_by = None;
        tracing::debug!(book = id, patron, "book returned");

        let allotted_to = book.waitlist.pop().map(|next| {
            book.available = false;
            book.borrowed_by = Some(next.patron);
            tracing::debug!(book = id, patron = next.patron, "book allotted from waitlist");
            next.patron
        });

        Ok(ReturnOutcome { allotted_to })
    }

    /// Delete a book, returning the cancelled patrons in service order
    pub fn delete_book(&mut self, id: BookId) -> Result<Vec<PatronId>> {
        let book = self
            .index
            .get_mut(id)
            .ok_or(LibraryError::BookNotFound(id))?;

        let cancelled: Vec<PatronId> = book
            .waitlist
            .drain_ordered()
            .into_iter()
            .map(|r| r.patron)
            .collect();

        self.index.remove(id);

        tracing::debug!(book = id, cancelled = cancelled.len(), "book deleted");
        Ok(cancelled)
    }

    // =========================================================================
    // Read operations
    // =========================================================================

    /// Look up a book
    pub fn book(&self, id: BookId) -> Result<&Book> {
        self.index.get(id).ok_or(LibraryError::BookNotFound(id))
    }

    /// Books with `lo <= id <= hi`, ascending by id
    pub fn books(&self, lo: BookId, hi: BookId) -> impl Iterator<Item = &Book> + '_ {
        self.index.range(lo, hi).map(|(_, book)| book)
    }

    /// Book(s) nearest to `id`; both on an equal-distance tie
    pub fn closest(&self, id: BookId) -> Option<Closest<'_, Book>> {
        self.index.closest(id)
    }

    /// Cumulative colour flips performed by the index
    pub fn color_flip_count(&self) -> u64 {
        self.index.color_flip_count()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of books
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The underlying index
    pub fn index(&self) -> &OrderedIndex<Book> {
        &self.index
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Report a recoverable rejection, or pass anything else up
fn reject(err: LibraryError, reporter: &mut dyn Reporter) -> Result<()> {
    let event = match err {
        LibraryError::BookNotFound(book) => Event::BookNotFound(book),
        LibraryError::DuplicateBook(book) => Event::DuplicateBook(book),
        LibraryError::InvalidReturn { book, patron } => Event::InvalidReturn { book, patron },
        LibraryError::WaitlistFull { book, patron, .. } => Event::WaitlistFull { book, patron },
        other => return Err(other),
    };
    reporter.report(event)
}
