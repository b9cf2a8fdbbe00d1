//! Tests for the command parser and report rendering
//!
//! These tests verify:
//! - Every command parses with the expected arguments
//! - Quoted arguments keep embedded commas
//! - Malformed lines are parse errors
//! - Events render in the report text format

use shelfkv::protocol::{parse_line, BookView, Command, CommandType, Event, Reporter, TextReporter};
use shelfkv::LibraryError;

// =============================================================================
// Parser Tests
// =============================================================================

#[test]
fn test_parse_insert_book() {
    let command = parse_line(r#"InsertBook(1, "Book1", "Author1", "Yes")"#).unwrap();
    assert_eq!(
        command,
        Command::InsertBook {
            id: 1,
            title: "Book1".to_string(),
            author: "Author1".to_string(),
            available: true,
        }
    );
}

#[test]
fn test_parse_quoted_commas() {
    let command = parse_line(r#"InsertBook(4, "War, and Peace", "Tolstoy, Leo", "No")"#).unwrap();
    assert_eq!(
        command,
        Command::InsertBook {
            id: 4,
            title: "War, and Peace".to_string(),
            author: "Tolstoy, Leo".to_string(),
            available: false,
        }
    );
}

#[test]
fn test_parse_numeric_commands() {
    assert_eq!(parse_line("PrintBook(7)").unwrap(), Command::PrintBook { id: 7 });
    assert_eq!(
        parse_line("PrintBooks(1, 100)").unwrap(),
        Command::PrintBooks { lo: 1, hi: 100 }
    );
    assert_eq!(
        parse_line("  BorrowBook(101, 4, 2)  ").unwrap(),
        Command::BorrowBook { patron: 101, id: 4, priority: 2 }
    );
    assert_eq!(
        parse_line("ReturnBook(101,4)").unwrap(),
        Command::ReturnBook { patron: 101, id: 4 }
    );
    assert_eq!(parse_line("DeleteBook(4)").unwrap(), Command::DeleteBook { id: 4 });
    assert_eq!(
        parse_line("FindClosestBook(30)").unwrap(),
        Command::FindClosestBook { id: 30 }
    );
}

#[test]
fn test_parse_negative_numbers() {
    assert_eq!(
        parse_line("FindClosestBook(-3)").unwrap(),
        Command::FindClosestBook { id: -3 }
    );
    assert_eq!(
        parse_line("BorrowBook(-101, -4, -2)").unwrap(),
        Command::BorrowBook { patron: -101, id: -4, priority: -2 }
    );
}

#[test]
fn test_parse_no_arg_commands() {
    assert_eq!(parse_line("ColorFlipCount()").unwrap(), Command::ColorFlipCount);
    assert_eq!(parse_line("Quit()").unwrap(), Command::Quit);
}

#[test]
fn test_command_type_round_trip_names() {
    for line in ["PrintBook(1)", "Quit()", "ColorFlipCount()", "DeleteBook(2)"] {
        let command = parse_line(line).unwrap();
        let name = command.command_type().name();
        assert!(line.starts_with(name));
        assert_eq!(CommandType::from_name(name), Some(command.command_type()));
    }
    assert_eq!(CommandType::from_name("printbook"), None);
}

#[test]
fn test_parse_errors() {
    let bad = [
        "",
        "PrintBook",
        "PrintBook(1",
        "(1)",
        "Unknown(1)",
        "PrintBook(1, 2)",
        "PrintBook(abc)",
        r#"InsertBook(1, "T", "A", "Maybe")"#,
        r#"InsertBook(1, "T, "A", "Yes")"#,
        "Quit(now)",
    ];
    for line in bad {
        assert!(
            matches!(parse_line(line), Err(LibraryError::Parse { .. })),
            "expected parse error for {:?}",
            line
        );
    }
}

// =============================================================================
// Report Rendering Tests
// =============================================================================

fn render(events: Vec<Event>) -> String {
    let mut reporter = TextReporter::new(Vec::new());
    for event in events {
        reporter.report(event).unwrap();
    }
    String::from_utf8(reporter.into_inner()).unwrap()
}

#[test]
fn test_render_book_details() {
    let view = BookView {
        id: 3,
        title: "Book3".to_string(),
        author: "Author3".to_string(),
        available: false,
        borrowed_by: Some(12),
        reservations: vec![7, 8],
    };
    assert_eq!(
        render(vec![Event::BookDetails(view)]),
        "BookID = 3\nTitle = \"Book3\"\nAuthor = \"Author3\"\nAvailability = \"No\"\nBorrowedBy = 12\nReservations = [7, 8]\n\n"
    );
}

#[test]
fn test_render_available_book_without_holder() {
    let view = BookView {
        id: 1,
        title: "T".to_string(),
        author: "A".to_string(),
        available: true,
        borrowed_by: None,
        reservations: vec![],
    };
    let text = render(vec![Event::BookDetails(view)]);
    assert!(text.contains("Availability = \"Yes\"\n"));
    assert!(text.contains("BorrowedBy = None\n"));
    assert!(text.contains("Reservations = []\n"));
}

#[test]
fn test_render_messages() {
    let text = render(vec![
        Event::Borrowed { book: 1, patron: 2 },
        Event::InvalidReturn { book: 1, patron: 3 },
        Event::ColorFlipCount(5),
        Event::Terminated,
    ]);
    assert_eq!(
        text,
        "Book 1 Borrowed by Patron 2\n\n\
         Patron 3 cannot return a book they haven't borrowed\n\
         Colour Flip Count: 5\n\n\
         Program Terminated!!\n"
    );
}

#[test]
fn test_render_delete_plurals() {
    assert_eq!(
        render(vec![Event::Deleted { book: 4, cancelled: vec![] }]),
        "Book 4 is no longer available\n\n"
    );
    assert_eq!(
        render(vec![Event::Deleted { book: 4, cancelled: vec![9] }]),
        "Book 4 is no longer available. Reservations made by Patrons 9 has been cancelled!\n\n"
    );
    assert_eq!(
        render(vec![Event::Deleted { book: 4, cancelled: vec![7, 8, 9] }]),
        "Book 4 is no longer available. Reservations made by Patrons 7, 8, 9 have been cancelled!\n\n"
    );
}
