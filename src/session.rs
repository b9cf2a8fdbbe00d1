//! Session Module
//!
//! Drives a library from a stream of command lines.
//!
//! ## Flow
//! ```text
//!   line ──▶ parse_line ──▶ Library::execute ──▶ Reporter
//!              │
//!              └── malformed: warn + skip (or abort when strict)
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

use crate::config::Config;
use crate::error::{LibraryError, Result};
use crate::library::{Flow, Library};
use crate::protocol::{parse_line, Reporter, TextReporter};

/// Counters for a finished session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Commands parsed and executed
    pub executed: usize,

    /// Malformed lines skipped
    pub skipped: usize,

    /// Whether a `Quit` command ended the session
    pub terminated: bool,
}

/// Executes command lines against a library, reporting to `R`
pub struct Session<R: Reporter> {
    library: Library,
    reporter: R,
}

impl<R: Reporter> Session<R> {
    pub fn new(library: Library, reporter: R) -> Self {
        Self { library, reporter }
    }

    /// Process lines until end of input or `Quit`
    ///
    /// Blank lines are ignored. Malformed lines are skipped with a warning
    /// unless the library config is strict, in which case the parse error is
    /// returned and nothing after it runs.
    pub fn run<B: BufRead>(&mut self, input: B) -> Result<SessionStats> {
        let strict = self.library.config().strict;
        let mut stats = SessionStats::default();

        let mut input = input;
        let mut raw = Vec::new();
        let mut line_no = 0;

        loop {
            raw.clear();
            if input.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            line_no += 1;

            let parsed = match std::str::from_utf8(&raw) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => parse_line(line),
                Err(_) => Err(LibraryError::Parse {
                    line: String::from_utf8_lossy(&raw).trim().to_string(),
                    reason: "line is not valid UTF-8".to_string(),
                }),
            };

            let command = match parsed {
                Ok(command) => command,
                Err(e) if !strict => {
                    tracing::warn!(line = line_no, "Skipping malformed command: {}", e);
                    stats.skipped += 1;
                    continue;
                }
                Err(e) => {
                    self.reporter.flush()?;
                    return Err(e);
                }
            };

            tracing::trace!("Executing line {}: {:?}", line_no, command);
            stats.executed += 1;

            if self.library.execute(command, &mut self.reporter)? == Flow::Quit {
                stats.terminated = true;
                break;
            }
        }

        self.reporter.flush()?;
        tracing::debug!(
            executed = stats.executed,
            skipped = stats.skipped,
            terminated = stats.terminated,
            "Session finished"
        );
        Ok(stats)
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Tear the session down, keeping the reporter
    pub fn into_reporter(self) -> R {
        self.reporter
    }
}

/// Run a command file and write the text report to `output`
pub fn process_file(config: Config, input: &Path, output: &Path) -> Result<SessionStats> {
    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);

    tracing::info!("Processing {} -> {}", input.display(), output.display());

    let library = Library::new(config)?;
    let mut session = Session::new(library, TextReporter::new(writer));
    session.run(reader)
}
