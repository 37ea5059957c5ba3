//! # Primitives
//!
//! Fixed constants of the scheduler.
//!
//! These values are compiled into the binary and are immutable at runtime.
//! Only the comment marker can be overridden, through configuration.

/// Default prefix of a line that the parser skips.
pub const COMMENT_MARKER: &str = "#";

/// Number of whitespace-separated tokens on a show line: `name start end`.
pub const TOKENS_PER_LINE: usize = 3;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length of a show name, in bytes.
///
/// Longer names are rejected by the parser.
pub const MAX_NAME_LENGTH: usize = 256;

/// Maximum number of shows in a single input.
///
/// Inputs with more shows are rejected before allocation.
pub const MAX_SHOWS: usize = 1_000_000;

/// Maximum size of raw input accepted by the binary (16 MiB).
pub const MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;
