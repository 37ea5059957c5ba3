//! # Schedule Metrics
//!
//! Summary figures for a finished schedule, integer-only.

use crate::allocator::Schedule;
use crate::verify::overlap_depth;
use crate::{Show, StageId};
use serde::{Deserialize, Serialize};

/// Metrics extracted from a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    /// Number of shows placed.
    pub show_count: usize,
    /// Number of stages used.
    pub stage_count: usize,
    /// Maximum number of shows sharing an instant.
    pub overlap_depth: usize,
    /// Start of the earliest show, if any.
    pub earliest_start: Option<i64>,
    /// End of the latest show, if any.
    pub latest_end: Option<i64>,
    /// Stage hosting the most shows (lowest id on ties).
    pub busiest_stage: Option<StageId>,
    /// Number of shows on the busiest stage.
    pub busiest_stage_shows: usize,
}

impl ScheduleMetrics {
    /// Create metrics for an empty schedule.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            show_count: 0,
            stage_count: 0,
            overlap_depth: 0,
            earliest_start: None,
            latest_end: None,
            busiest_stage: None,
            busiest_stage_shows: 0,
        }
    }

    /// Compute metrics from a schedule.
    #[must_use]
    pub fn from_schedule(schedule: &Schedule) -> Self {
        if schedule.is_empty() {
            return Self::empty();
        }

        let shows: Vec<Show> = schedule
            .assignments()
            .iter()
            .map(|a| a.show.clone())
            .collect();

        let mut busiest_stage = None;
        let mut busiest_stage_shows = 0;
        for (&stage, timeline) in schedule.timelines() {
            if timeline.len() > busiest_stage_shows {
                busiest_stage = Some(stage);
                busiest_stage_shows = timeline.len();
            }
        }

        Self {
            show_count: shows.len(),
            stage_count: schedule.stage_count(),
            overlap_depth: overlap_depth(&shows),
            earliest_start: shows.iter().map(|s| s.start).min(),
            latest_end: shows.iter().map(|s| s.end).max(),
            busiest_stage,
            busiest_stage_shows,
        }
    }

    /// Length of the covered period, inclusive of both ends.
    ///
    /// `None` for an empty schedule, or when the period spans the whole
    /// `i64` range and its length does not fit in a `u64`.
    #[must_use]
    pub fn span(&self) -> Option<u64> {
        let (start, end) = (self.earliest_start?, self.latest_end?);
        let length = i128::from(end) - i128::from(start) + 1;
        u64::try_from(length).ok()
    }
}

// =============================================================================
// TESTS
// =============================================================================
