//! # ShelfKV
//!
//! An in-memory book catalogue with:
//! - A red-black tree index keyed by book id, counting colour flips
//! - A bounded reservation waitlist per book, served by (priority, arrival)
//! - Borrow / return / delete semantics composed over both
//! - A line-oriented command language and text reports
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Session (command file)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ parse_line
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Library                                │
//! │          (borrow / return / delete / reports)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ OrderedIndex│  owns    │  Waitlist   │
//!   │ (RB tree)   │────────▶ │ (per book)  │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod waitlist;
pub mod index;
pub mod library;
pub mod protocol;
pub mod session;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LibraryError, Result};
pub use config::Config;
pub use library::Library;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of ShelfKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
