//! # Verification Module
//!
//! Independent checks of an allocation result.
//!
//! - `overlap_depth`: the lower bound any partition must meet
//! - `verify_schedule`: validity, minimality and completeness of a schedule
//!
//! These functions do not reuse the allocator's logic, so they can be used
//! to audit it.

use crate::allocator::Schedule;
use crate::{FestivalError, Show, StageId};

/// Endpoint kind for the sweep. `Open` sorts before `Close` at equal times,
/// which makes ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Endpoint {
    Open,
    Close,
}

/// Maximum number of shows that occupy a single instant.
///
/// Ends are inclusive: a show ending at `t` and one starting at `t` both
/// occupy `t`.
#[must_use]
pub fn overlap_depth(shows: &[Show]) -> usize {
    let mut points: Vec<(i64, Endpoint)> = Vec::with_capacity(shows.len().saturating_mul(2));
    for show in shows {
        points.push((show.start, Endpoint::Open));
        points.push((show.end, Endpoint::Close));
    }
    points.sort_unstable();

    let mut depth: usize = 0;
    let mut max_depth: usize = 0;
    for (_, endpoint) in points {
        match endpoint {
            Endpoint::Open => {
                depth = depth.saturating_add(1);
                max_depth = max_depth.max(depth);
            }
            Endpoint::Close => depth = depth.saturating_sub(1),
        }
    }

    max_depth
}

/// Check that `schedule` is a valid, minimal, complete placement of `shows`.
///
/// # Errors
/// - `IncompleteSchedule` if assignments or timelines do not match the input
/// - `ScheduleConflict` if two shows on one stage overlap
/// - `NotMinimal` if the stage count exceeds the overlap depth
pub fn verify_schedule(shows: &[Show], schedule: &Schedule) -> Result<(), FestivalError> {
    let assignments = schedule.assignments();
    if assignments.len() != shows.len() {
        return Err(FestivalError::IncompleteSchedule(format!(
            "{} shows in input, {} assigned",
            shows.len(),
            assignments.len()
        )));
    }

    for (position, (show, assignment)) in shows.iter().zip(assignments).enumerate() {
        if &assignment.show != show {
            return Err(FestivalError::IncompleteSchedule(format!(
                "assignment {} is {:?}, expected {:?}",
                position, assignment.show.name, show.name
            )));
        }
        let in_range = (StageId::FIRST.value()..=schedule.stage_count() as u64)
            .contains(&assignment.stage.value());
        if !in_range {
            return Err(FestivalError::IncompleteSchedule(format!(
                "show {:?} placed on stage {} outside 1..={}",
                show.name,
                assignment.stage,
                schedule.stage_count()
            )));
        }
    }

    for (&stage, timeline) in schedule.timelines() {
        for pair in timeline.windows(2) {
            if pair[1].start < pair[0].start {
                return Err(FestivalError::IncompleteSchedule(format!(
                    "stage {} timeline is out of order at {:?}",
                    stage, pair[1].name
                )));
            }
            // Sorted by start, so consecutive checks cover every pair.
            if pair[0].conflicts_with(&pair[1]) {
                return Err(FestivalError::ScheduleConflict {
                    stage,
                    first: pair[0].to_string(),
                    second: pair[1].to_string(),
                });
            }
        }
    }

    let mut expected: Vec<&Show> = shows.iter().collect();
    let mut grouped: Vec<&Show> = schedule.timelines().values().flatten().collect();
    expected.sort();
    grouped.sort();
    if expected != grouped {
        return Err(FestivalError::IncompleteSchedule(
            "timelines do not hold exactly the input shows".to_string(),
        ));
    }

    let depth = overlap_depth(shows);
    if schedule.stage_count() != depth {
        return Err(FestivalError::NotMinimal {
            stage_count: schedule.stage_count(),
            depth,
        });
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
