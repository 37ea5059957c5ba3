//! # Core Type Definitions
//!
//! This module contains the value types shared by every part of the scheduler:
//! - Stage identifiers (`StageId`)
//! - Show representation (`Show`)
//! - Per-show placement (`Assignment`)
//! - Error types (`FestivalError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` where they are used as `BTreeMap` keys
//! - Use saturating arithmetic for identifier minting

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// STAGE IDENTIFIER
// =============================================================================

/// Identifier of a stage: one exclusive timeline.
///
/// Identifiers start at 1 and carry no meaning beyond identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StageId(pub u64);

impl StageId {
    /// The first identifier ever minted.
    pub const FIRST: StageId = StageId(1);

    /// Create a stage identifier from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The identifier minted after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Get the raw identifier value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// SHOW
// =============================================================================

/// A named, time-bounded event: `[start, end]` with an inclusive end.
///
/// Shows are read-only once constructed. Names need not be unique.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Show {
    /// Human-readable identifier.
    pub name: String,
    /// First instant the show occupies.
    pub start: i64,
    /// Last instant the show occupies (inclusive).
    pub end: i64,
}

impl Show {
    /// Create a new show.
    ///
    /// No validation is performed here; use [`Show::is_well_formed`] or the
    /// [`LineParser`](crate::parser::LineParser) to reject `end < start`.
    #[must_use]
    pub fn new(name: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// Whether the show satisfies `end >= start`.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.end >= self.start
    }

    /// Whether the show occupies instant `t`.
    #[must_use]
    pub fn contains(&self, t: i64) -> bool {
        self.start <= t && t <= self.end
    }

    /// Whether two shows cannot share a stage.
    ///
    /// Endpoints are inclusive, so `[1, 5]` and `[5, 8]` conflict.
    #[must_use]
    pub fn conflicts_with(&self, other: &Show) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for Show {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.name, self.start, self.end)
    }
}

// =============================================================================
// ASSIGNMENT
// =============================================================================

/// The stage a single show was placed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// The placed show.
    #[serde(flatten)]
    pub show: Show,
    /// The stage it occupies.
    pub stage: StageId,
}

impl Assignment {
    /// Create a new assignment.
    #[must_use]
    pub const fn new(show: Show, stage: StageId) -> Self {
        Self { show, stage }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Festival system.
///
/// - Input errors carry the 1-based line number and the offending text
/// - Allocation itself never fails; only parsing, verification and I/O do
#[derive(Debug, Error)]
pub enum FestivalError {
    /// A line did not split into exactly `name start end`.
    #[error("line {line}: expected 3 tokens, got: {raw:?}")]
    MalformedLine { line: usize, raw: String },

    /// A start or end token is not an integer.
    #[error("line {line}: start/end must be integers: {raw:?}")]
    InvalidTime { line: usize, raw: String },

    /// The show ends before it starts.
    #[error("line {line}: end < start: {raw:?}")]
    InvalidInterval { line: usize, raw: String },

    /// A show name exceeds the accepted length.
    #[error("line {line}: show name is {length} bytes, maximum is {limit}")]
    NameTooLong {
        line: usize,
        length: usize,
        limit: usize,
    },

    /// The input holds more shows than the parser accepts.
    #[error("input holds more than {limit} shows")]
    TooManyShows { limit: usize },

    /// The raw input exceeds the accepted size.
    #[error("input size {size} bytes exceeds maximum allowed {limit} bytes")]
    InputTooLarge { size: u64, limit: u64 },

    /// Two shows on the same stage overlap.
    #[error("stage {stage}: {first:?} conflicts with {second:?}")]
    ScheduleConflict {
        stage: StageId,
        first: String,
        second: String,
    },

    /// A schedule does not account for its input exactly.
    #[error("incomplete schedule: {0}")]
    IncompleteSchedule(String),

    /// A schedule uses more stages than the overlap depth.
    #[error("schedule uses {stage_count} stages but the overlap depth is {depth}")]
    NotMinimal { stage_count: usize, depth: usize },

    /// A configuration value could not be understood.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
