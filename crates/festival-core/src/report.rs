//! # Report Module
//!
//! Renders a [`Schedule`] for people and for programs.
//!
//! The text layout is fixed: existing callers parse it line by line.
//!
//! ```text
//! Total stages required: 2
//!
//! Assignments in input order:
//!   X: 1 - 5  --> Stage 1
//!   Y: 5 - 8  --> Stage 2
//!
//! Per-stage timelines:
//! Stage 1:
//!   X: 1 - 5
//!
//! Stage 2:
//!   Y: 5 - 8
//!
//! ```

use crate::allocator::Schedule;
use crate::{Assignment, Show, StageId};
use serde::{Deserialize, Serialize};

/// Render the text report.
///
/// The assignment section is omitted when there are no shows.
#[must_use]
pub fn render_text(schedule: &Schedule) -> String {
    let mut out = format!("Total stages required: {}\n\n", schedule.stage_count());

    if !schedule.is_empty() {
        out.push_str("Assignments in input order:\n");
        for assignment in schedule.assignments() {
            out.push_str(&format!(
                "  {}  --> Stage {}\n",
                assignment.show, assignment.stage
            ));
        }
        out.push('\n');
    }

    out.push_str("Per-stage timelines:\n");
    for (stage, timeline) in schedule.timelines() {
        out.push_str(&format!("Stage {}:\n", stage));
        for show in timeline {
            out.push_str(&format!("  {}\n", show));
        }
        out.push('\n');
    }

    out
}

// =============================================================================
// JSON REPORT
// =============================================================================

/// One stage and its shows, for the JSON report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub stage: StageId,
    pub shows: Vec<Show>,
}

/// Serializable view of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub stage_count: usize,
    pub assignments: Vec<Assignment>,
    pub timelines: Vec<TimelineEntry>,
}

impl From<&Schedule> for ScheduleReport {
    fn from(schedule: &Schedule) -> Self {
        Self {
            stage_count: schedule.stage_count(),
            assignments: schedule.assignments().to_vec(),
            timelines: schedule
                .timelines()
                .iter()
                .map(|(&stage, shows)| TimelineEntry {
                    stage,
                    shows: shows.clone(),
                })
                .collect(),
        }
    }
}

impl ScheduleReport {
    /// Rebuild the schedule this report describes.
    #[must_use]
    pub fn into_schedule(self) -> Schedule {
        Schedule::from_assignments(self.assignments)
    }
}

// =============================================================================
// TESTS
// =============================================================================
