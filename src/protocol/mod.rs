//! Protocol Module
//!
//! Defines the text command language and the report format.
//!
//! ## Command Format
//! ```text
//! ┌──────────┬───┬──────────────────────────┬───┐
//! │   Name   │ ( │  arg, "quoted, arg", ... │ ) │
//! └──────────┴───┴──────────────────────────┴───┘
//! ```
//!
//! ### Commands
//! - InsertBook(id, title, author, Yes|No)
//! - PrintBook(id)
//! - PrintBooks(lo, hi)
//! - BorrowBook(patron, id, priority)
//! - ReturnBook(patron, id)
//! - DeleteBook(id)
//! - FindClosestBook(id)
//! - ColorFlipCount()
//! - Quit()
//!
//! ### Reports
//! Every command yields zero or more `Event`s, delivered to a `Reporter`.
//! `TextReporter` renders them in the line-oriented report format.

mod command;
mod parser;
mod report;

pub use command::{Command, CommandType};
pub use parser::parse_line;
pub use report::{BookView, Event, Reporter, TextReporter};
