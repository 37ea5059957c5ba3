//! # festival-core
//!
//! The deterministic stage allocator for Festival - THE ALLOCATOR.
//!
//! Given a list of shows, each a named interval `[start, end]` with an
//! inclusive end, this crate places every show on a stage so that no two
//! shows on one stage overlap, using the fewest stages possible.
//!
//! ```
//! use festival_core::{LineParser, StageAllocator};
//!
//! let shows = LineParser::new()
//!     .parse_str("ShowA 1 3\nShowB 2 5\nShowC 4 6\nShowD 5 7\n")
//!     .expect("valid input");
//! let schedule = StageAllocator::new().allocate(&shows);
//!
//! assert_eq!(schedule.stage_count(), 3);
//! ```
//!
//! ## Architectural Constraints
//!
//! - Pure: no file, network or terminal I/O; the binary owns those
//! - Deterministic: the same input in the same order always yields the same
//!   stage identifiers
//! - Total: allocation over parsed input cannot fail

// =============================================================================
// MODULES
// =============================================================================

pub mod allocator;
pub mod metrics;
pub mod parser;
pub mod primitives;
pub mod report;
pub mod types;
pub mod verify;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Assignment, FestivalError, Show, StageId};

// =============================================================================
// RE-EXPORTS: Allocation, Input, Output
// =============================================================================

pub use allocator::{ReusePolicy, Schedule, StageAllocator, allocate};
pub use metrics::ScheduleMetrics;
pub use parser::LineParser;
pub use report::{ScheduleReport, TimelineEntry, render_text};
pub use verify::{overlap_depth, verify_schedule};
