//! # Stage Allocator
//!
//! Greedy interval partitioning of shows onto the fewest stages.
//!
//! Shows are processed in `(start, end)` order (stable, so equal keys keep
//! their input order). Before each show is placed, every stage whose last
//! show ended strictly before the new start is released into a free pool.
//! The show then takes a stage from the pool, or a newly minted one if the
//! pool is empty.
//!
//! Because a stage is only minted when every existing stage is busy at the
//! new show's start, the number of minted stages equals the maximum number
//! of shows that share an instant, which no partition can beat.

use crate::{Assignment, FestivalError, Show, StageId};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, VecDeque};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// REUSE POLICY
// =============================================================================

/// Which free stage a show takes when several are available.
///
/// The policy never changes the stage count, only the identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReusePolicy {
    /// Smallest free identifier first. Matches the legacy report output.
    #[default]
    LowestId,
    /// The stage released earliest (by the end time it was released at,
    /// then identifier) first.
    EarliestReleased,
}

impl ReusePolicy {
    /// Get the policy name as written in configuration.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ReusePolicy::LowestId => "lowest-id",
            ReusePolicy::EarliestReleased => "earliest-released",
        }
    }
}

impl fmt::Display for ReusePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReusePolicy {
    type Err = FestivalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lowest-id" => Ok(ReusePolicy::LowestId),
            "earliest-released" => Ok(ReusePolicy::EarliestReleased),
            other => Err(FestivalError::ConfigError(format!(
                "unknown reuse policy '{}' (expected 'lowest-id' or 'earliest-released')",
                other
            ))),
        }
    }
}

/// Stages released and waiting to be reused.
enum FreePool {
    Lowest(BinaryHeap<Reverse<StageId>>),
    // Releases arrive in ascending (end, id) order, so FIFO order is release order.
    Released(VecDeque<StageId>),
}

impl FreePool {
    fn new(policy: ReusePolicy) -> Self {
        match policy {
            ReusePolicy::LowestId => FreePool::Lowest(BinaryHeap::new()),
            ReusePolicy::EarliestReleased => FreePool::Released(VecDeque::new()),
        }
    }

    fn release(&mut self, stage: StageId) {
        match self {
            FreePool::Lowest(heap) => heap.push(Reverse(stage)),
            FreePool::Released(queue) => queue.push_back(stage),
        }
    }

    fn take(&mut self) -> Option<StageId> {
        match self {
            FreePool::Lowest(heap) => heap.pop().map(|Reverse(stage)| stage),
            FreePool::Released(queue) => queue.pop_front(),
        }
    }
}

// =============================================================================
// SCHEDULE
// =============================================================================

/// The outcome of one allocation pass.
///
/// - `assignments` lists every input show in input order
/// - `timelines` maps each stage to its shows in `(start, end)` order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    stage_count: usize,
    assignments: Vec<Assignment>,
    timelines: BTreeMap<StageId, Vec<Show>>,
}

impl Schedule {
    /// A schedule for no shows.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a schedule from placements given in input order.
    ///
    /// Timelines are grouped by stage and ordered by `(start, end)`, keeping
    /// input order for equal keys. The stage count is the highest identifier
    /// in use.
    #[must_use]
    pub fn from_assignments(assignments: Vec<Assignment>) -> Self {
        let mut timelines: BTreeMap<StageId, Vec<Show>> = BTreeMap::new();
        for assignment in &assignments {
            timelines
                .entry(assignment.stage)
                .or_default()
                .push(assignment.show.clone());
        }
        for timeline in timelines.values_mut() {
            timeline.sort_by_key(|show| (show.start, show.end));
        }

        let stage_count = timelines
            .keys()
            .next_back()
            .map_or(0, |stage| stage.value() as usize);

        Self {
            stage_count,
            assignments,
            timelines,
        }
    }

    /// Number of stages required.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stage_count
    }

    /// Number of shows placed.
    #[must_use]
    pub fn show_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether no show was placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Placements in original input order.
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Stage of the show at input position `index`.
    #[must_use]
    pub fn stage_of(&self, index: usize) -> Option<StageId> {
        self.assignments.get(index).map(|a| a.stage)
    }

    /// Per-stage timelines, stages in ascending order.
    #[must_use]
    pub fn timelines(&self) -> &BTreeMap<StageId, Vec<Show>> {
        &self.timelines
    }

    /// Shows placed on one stage, ordered by start time.
    #[must_use]
    pub fn timeline(&self, stage: StageId) -> Option<&[Show]> {
        self.timelines.get(&stage).map(Vec::as_slice)
    }
}

// =============================================================================
// ALLOCATOR
// =============================================================================

/// Assigns shows to the minimum number of stages.
///
/// The allocator holds only its reuse policy; all working state lives inside
/// [`StageAllocator::allocate`], so one allocator may serve many threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageAllocator {
    policy: ReusePolicy,
}

impl StageAllocator {
    /// Create an allocator with the legacy `LowestId` policy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            policy: ReusePolicy::LowestId,
        }
    }

    /// Create an allocator with an explicit reuse policy.
    #[must_use]
    pub const fn with_policy(policy: ReusePolicy) -> Self {
        Self { policy }
    }

    /// The reuse policy in use.
    #[must_use]
    pub const fn policy(&self) -> ReusePolicy {
        self.policy
    }

    /// Place every show on a stage.
    ///
    /// Shows must satisfy `end >= start`; the [`LineParser`](crate::parser::LineParser)
    /// guarantees this for parsed input. The pass never fails.
    #[must_use]
    pub fn allocate(&self, shows: &[Show]) -> Schedule {
        if shows.is_empty() {
            return Schedule::empty();
        }

        // Stable: equal (start, end) keys keep input order.
        let mut order: Vec<usize> = (0..shows.len()).collect();
        order.sort_by_key(|&i| (shows[i].start, shows[i].end));

        let mut occupied: BinaryHeap<Reverse<(i64, StageId)>> =
            BinaryHeap::with_capacity(shows.len());
        let mut free = FreePool::new(self.policy);
        let mut next_stage = StageId::FIRST;
        let mut placements = Vec::with_capacity(shows.len());

        for &index in &order {
            let show = &shows[index];

            // Strict comparison: a stage busy until T is still busy at T.
            while let Some(&Reverse((end, stage))) = occupied.peek() {
                if end >= show.start {
                    break;
                }
                occupied.pop();
                free.release(stage);
            }

            let stage = match free.take() {
                Some(stage) => stage,
                None => {
                    let minted = next_stage;
                    next_stage = next_stage.next();
                    minted
                }
            };

            placements.push(stage);
            occupied.push(Reverse((show.end, stage)));
        }

        let mut stage_of = vec![StageId::FIRST; shows.len()];
        for (&index, &stage) in order.iter().zip(&placements) {
            stage_of[index] = stage;
        }

        let assignments = shows
            .iter()
            .zip(stage_of)
            .map(|(show, stage)| Assignment::new(show.clone(), stage))
            .collect();

        Schedule::from_assignments(assignments)
    }
}

/// Allocate with the default `LowestId` policy.
#[must_use]
pub fn allocate(shows: &[Show]) -> Schedule {
    StageAllocator::new().allocate(shows)
}

// =============================================================================
// TESTS
// =============================================================================
