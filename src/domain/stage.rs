//! Module defining the lifecycle stages of a record and the transition applied once per processing pass

use serde::Serialize;

use crate::domain::Record;

/// Lifecycle stage shared by all record kinds. The kind-specific names
/// (e.g., `Created`/`Draft`) are provided by [`Record::STAGE_LABELS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Stage {
    Initial,
    Intermediate,
    Success,
    /// Cancelled or archived. Only reachable from outside the pipeline.
    Closed,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Initial,
        Stage::Intermediate,
        Stage::Success,
        Stage::Closed,
    ];

    pub fn ordinal(self) -> usize {
        match self {
            Stage::Initial => 0,
            Stage::Intermediate => 1,
            Stage::Success => 2,
            Stage::Closed => 3,
        }
    }

    pub fn from_ordinal(ordinal: u64) -> Option<Self> {
        Self::ALL.get(usize::try_from(ordinal).ok()?).copied()
    }

    /// Looks up a stage by the kind-specific label, ignoring case.
    pub fn from_label<R: Record>(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|stage| R::stage_label(*stage).eq_ignore_ascii_case(label.trim()))
    }
}

/// Outcome of a single pass of the state machine over one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advanced { from: Stage, to: Stage },
    /// Intermediate record whose promotion test did not pass
    Held,
    /// Terminal record, left as it is
    Unchanged(Stage),
}

/// Moves the record at most one stage forward.
pub(crate) fn advance<R: Record>(record: &mut R) -> Transition {
    let from = record.stage();
    let to = match from {
        Stage::Initial => Stage::Intermediate,
        Stage::Intermediate if record.promotes() => Stage::Success,
        Stage::Intermediate => return Transition::Held,
        Stage::Success | Stage::Closed => return Transition::Unchanged(from),
    };
    record.set_stage(to);
    Transition::Advanced { from, to }
}
