//! Command parser
//!
//! Turns one line of a command file into a `Command`.
//!
//! ## Line Format
//! ```text
//! Name(arg, arg, ...)
//!
//! InsertBook(4, "Dune, Part One", "Frank Herbert", "Yes")
//! BorrowBook(101, 4, 2)
//! Quit()
//! ```
//! Commas inside double quotes do not split arguments. Quotes and
//! surrounding whitespace are stripped from each argument.

use std::str::FromStr;

use crate::error::{LibraryError, Result};
use super::{Command, CommandType};

/// Parse a single command line
pub fn parse_line(line: &str) -> Result<Command> {
    let trimmed = line.trim();

    let open = trimmed
        .find('(')
        .ok_or_else(|| parse_error(line, "missing '('"))?;
    if !trimmed.ends_with(')') {
        return Err(parse_error(line, "missing closing ')'"));
    }

    let name = trimmed[..open].trim();
    if name.is_empty() {
        return Err(parse_error(line, "missing command name"));
    }
    let kind = CommandType::from_name(name)
        .ok_or_else(|| parse_error(line, &format!("unknown command {}", name)))?;

    let args = split_args(&trimmed[open + 1..trimmed.len() - 1])
        .map_err(|reason| parse_error(line, reason))?;
    if args.len() != kind.arity() {
        return Err(parse_error(
            line,
            &format!(
                "{} expects {} argument(s), got {}",
                kind.name(),
                kind.arity(),
                args.len()
            ),
        ));
    }

    let command = match kind {
        CommandType::InsertBook => Command::InsertBook {
            id: number(line, "book id", &args[0])?,
            title: args[1].clone(),
            author: args[2].clone(),
            available: availability(line, &args[3])?,
        },
        CommandType::PrintBook => Command::PrintBook {
            id: number(line, "book id", &args[0])?,
        },
        CommandType::PrintBooks => Command::PrintBooks {
            lo: number(line, "lower book id", &args[0])?,
            hi: number(line, "upper book id", &args[1])?,
        },
        CommandType::BorrowBook => Command::BorrowBook {
            patron: number(line, "patron id", &args[0])?,
            id: number(line, "book id", &args[1])?,
            priority: number(line, "priority", &args[2])?,
        },
        CommandType::ReturnBook => Command::ReturnBook {
            patron: number(line, "patron id", &args[0])?,
            id: number(line, "book id", &args[1])?,
        },
        CommandType::DeleteBook => Command::DeleteBook {
            id: number(line, "book id", &args[0])?,
        },
        CommandType::FindClosestBook => Command::FindClosestBook {
            id: number(line, "book id", &args[0])?,
        },
        CommandType::ColorFlipCount => Command::ColorFlipCount,
        CommandType::Quit => Command::Quit,
    };

    Ok(command)
}

/// Split an argument list on commas outside double quotes
fn split_args(source: &str) -> std::result::Result<Vec<String>, &'static str> {
    if source.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in source.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ',' if !in_quotes => args.push(clean_arg(&std::mem::take(&mut current))),
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quoted argument");
    }
    args.push(clean_arg(&current));
    Ok(args)
}

fn clean_arg(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_string()
}

fn number<T: FromStr>(line: &str, field: &str, arg: &str) -> Result<T> {
    arg.parse()
        .map_err(|_| parse_error(line, &format!("invalid {}: {:?}", field, arg)))
}

fn availability(line: &str, arg: &str) -> Result<bool> {
    match arg.to_ascii_lowercase().as_str() {
        "yes" | "true" => Ok(true),
        "no" | "false" => Ok(false),
        _ => Err(parse_error(
            line,
            &format!("invalid availability: {:?} (expected Yes or No)", arg),
        )),
    }
}

fn parse_error(line: &str, reason: &str) -> LibraryError {
    LibraryError::Parse {
        line: line.trim().to_string(),
        reason: reason.to_string(),
    }
}
