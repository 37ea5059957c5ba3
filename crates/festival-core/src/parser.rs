//! # Parser Module
//!
//! Line validation and show ingestion.
//!
//! - Skip blank lines and comment lines
//! - Reject malformed input with the 1-based line number and raw text
//! - Preserve input order
//! - No inference or repair of bad lines

use crate::primitives::{COMMENT_MARKER, MAX_NAME_LENGTH, MAX_SHOWS, TOKENS_PER_LINE};
use crate::{FestivalError, Show};

/// Turns `name start end` lines into validated [`Show`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineParser {
    comment_marker: String,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    /// Create a parser using the default `#` comment marker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            comment_marker: COMMENT_MARKER.to_string(),
        }
    }

    /// Create a parser with a custom comment marker.
    ///
    /// An empty marker disables comment handling entirely.
    #[must_use]
    pub fn with_comment_marker(marker: impl Into<String>) -> Self {
        Self {
            comment_marker: marker.into(),
        }
    }

    /// The comment marker in use.
    #[must_use]
    pub fn comment_marker(&self) -> &str {
        &self.comment_marker
    }

    fn is_comment(&self, trimmed: &str) -> bool {
        !self.comment_marker.is_empty() && trimmed.starts_with(self.comment_marker.as_str())
    }

    /// Parse a single line.
    ///
    /// Returns `Ok(None)` for blank and comment lines.
    ///
    /// # Errors
    /// - `MalformedLine` if the line does not hold exactly three tokens
    /// - `InvalidTime` if start or end is not an integer
    /// - `InvalidInterval` if end < start
    /// - `NameTooLong` if the name exceeds `MAX_NAME_LENGTH`
    pub fn parse_line(&self, line_number: usize, line: &str) -> Result<Option<Show>, FestivalError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || self.is_comment(trimmed) {
            return Ok(None);
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() != TOKENS_PER_LINE {
            return Err(FestivalError::MalformedLine {
                line: line_number,
                raw: trimmed.to_string(),
            });
        }

        let name = tokens[0];
        if name.len() > MAX_NAME_LENGTH {
            return Err(FestivalError::NameTooLong {
                line: line_number,
                length: name.len(),
                limit: MAX_NAME_LENGTH,
            });
        }

        let invalid_time = || FestivalError::InvalidTime {
            line: line_number,
            raw: trimmed.to_string(),
        };
        let start: i64 = tokens[1].parse().map_err(|_| invalid_time())?;
        let end: i64 = tokens[2].parse().map_err(|_| invalid_time())?;

        if end < start {
            return Err(FestivalError::InvalidInterval {
                line: line_number,
                raw: trimmed.to_string(),
            });
        }

        Ok(Some(Show::new(name, start, end)))
    }

    /// Parse a sequence of lines, numbering them from 1.
    ///
    /// Stops at the first invalid line; no partial result is returned.
    pub fn parse_lines<I, S>(&self, lines: I) -> Result<Vec<Show>, FestivalError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut shows = Vec::new();

        for (index, line) in lines.into_iter().enumerate() {
            if let Some(show) = self.parse_line(index.saturating_add(1), line.as_ref())? {
                if shows.len() >= MAX_SHOWS {
                    return Err(FestivalError::TooManyShows { limit: MAX_SHOWS });
                }
                shows.push(show);
            }
        }

        Ok(shows)
    }

    /// Parse a whole text buffer.
    pub fn parse_str(&self, input: &str) -> Result<Vec<Show>, FestivalError> {
        self.parse_lines(input.lines())
    }
}

// =============================================================================
// TESTS
// =============================================================================
