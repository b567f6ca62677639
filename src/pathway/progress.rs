//! Per-policy progress records and the state machines over them.
//!
//! Records are append-only: every learner interaction yields a new version,
//! so the transition methods here take `&self` and return the next record
//! rather than mutating in place. "No record yet" is represented by the
//! store returning `None`, never by a sentinel value.

use std::collections::HashSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::bkt::{self, BktError};
use super::config::BktSettings;
use super::types::WalkableRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PathwayStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl PathwayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "notStarted",
            Self::InProgress => "inProgress",
            Self::Completed => "completed",
        }
    }
}

/// Identity and versioning shared by every progress family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressMeta {
    pub pathway_id: Uuid,
    pub learner_id: String,
    pub version: i64,
    pub created_at: i64,
}

impl ProgressMeta {
    pub fn new(pathway_id: Uuid, learner_id: impl Into<String>) -> Self {
        Self {
            pathway_id,
            learner_id: learner_id.into(),
            version: 1,
            created_at: Utc::now().timestamp_millis(),
        }
    }

    fn next(&self) -> Self {
        Self {
            pathway_id: self.pathway_id,
            learner_id: self.learner_id.clone(),
            version: self.version + 1,
            created_at: Utc::now().timestamp_millis(),
        }
    }
}

/// Linear traversal: an ordered, monotonically growing completed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearProgress {
    pub meta: ProgressMeta,
    pub completed: Vec<Uuid>,
}

impl LinearProgress {
    pub fn start(pathway_id: Uuid, learner_id: impl Into<String>) -> Self {
        Self {
            meta: ProgressMeta::new(pathway_id, learner_id),
            completed: Vec::new(),
        }
    }

    /// Next version with `element_id` recorded complete. Ids are never
    /// removed; re-recording one is a version bump with no set change.
    pub fn with_completed(&self, element_id: Uuid) -> Self {
        let mut completed = self.completed.clone();
        if !completed.contains(&element_id) {
            completed.push(element_id);
        }
        Self {
            meta: self.meta.next(),
            completed,
        }
    }

    /// First child of the live list the learner has not finished. Scanning
    /// the live list (not a frozen snapshot) lets authoring insert new
    /// children mid-run and have them show up in position.
    pub fn next_pending<'c>(&self, children: &'c [WalkableRef]) -> Option<&'c WalkableRef> {
        children
            .iter()
            .find(|child| !self.completed.contains(&child.element_id))
    }

    pub fn status(&self, children: &[WalkableRef]) -> PathwayStatus {
        if self.completed.is_empty() {
            PathwayStatus::NotStarted
        } else if self.next_pending(children).is_some() {
            PathwayStatus::InProgress
        } else {
            PathwayStatus::Completed
        }
    }
}

/// Random traversal: unordered completed set plus an optional in-progress
/// walkable that resumes verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomProgress {
    pub meta: ProgressMeta,
    pub completed: HashSet<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_progress: Option<WalkableRef>,
}

impl RandomProgress {
    pub fn start(pathway_id: Uuid, learner_id: impl Into<String>) -> Self {
        Self {
            meta: ProgressMeta::new(pathway_id, learner_id),
            completed: HashSet::new(),
            in_progress: None,
        }
    }

    pub fn started(&self, walkable: WalkableRef) -> Self {
        Self {
            meta: self.meta.next(),
            completed: self.completed.clone(),
            in_progress: Some(walkable),
        }
    }

    /// Next version with `walkable` done: its id joins the completed set and
    /// the in-progress slot clears.
    pub fn finished(&self, walkable: &WalkableRef) -> Self {
        let mut completed = self.completed.clone();
        completed.insert(walkable.element_id);
        Self {
            meta: self.meta.next(),
            completed,
            in_progress: None,
        }
    }

    pub fn remaining(&self, children: &[WalkableRef]) -> Vec<WalkableRef> {
        children
            .iter()
            .filter(|child| !self.completed.contains(&child.element_id))
            .cloned()
            .collect()
    }

    pub fn is_satisfied(&self, exit_after: u64) -> bool {
        self.completed.len() as u64 >= exit_after
    }

    pub fn status(&self, exit_after: u64) -> PathwayStatus {
        if self.is_satisfied(exit_after) {
            PathwayStatus::Completed
        } else if self.completed.is_empty() && self.in_progress.is_none() {
            PathwayStatus::NotStarted
        } else {
            PathwayStatus::InProgress
        }
    }
}

/// Graph traversal: a single cursor, overwritten on each advance by the
/// external progression action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphProgress {
    pub meta: ProgressMeta,
    pub current: WalkableRef,
}

impl GraphProgress {
    pub fn start_at(pathway_id: Uuid, learner_id: impl Into<String>, walkable: WalkableRef) -> Self {
        Self {
            meta: ProgressMeta::new(pathway_id, learner_id),
            current: walkable,
        }
    }

    pub fn moved_to(&self, walkable: WalkableRef) -> Self {
        Self {
            meta: self.meta.next(),
            current: walkable,
        }
    }
}

/// BKT traversal: resume/completed bookkeeping plus the mastery chain (the
/// latest P(Lₙ) and the maintain-for streak ride on the record).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BktProgress {
    pub meta: ProgressMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_progress: Option<WalkableRef>,
    pub completed: HashSet<Uuid>,
    pub is_completed: bool,
    pub mastery: f64,
    pub mastery_streak: u32,
}

impl BktProgress {
    pub fn start(pathway_id: Uuid, learner_id: impl Into<String>, p_l0: f64) -> Self {
        Self {
            meta: ProgressMeta::new(pathway_id, learner_id),
            in_progress: None,
            completed: HashSet::new(),
            is_completed: false,
            mastery: p_l0,
            mastery_streak: 0,
        }
    }

    pub fn started(&self, walkable: WalkableRef) -> Self {
        Self {
            meta: self.meta.next(),
            in_progress: Some(walkable),
            completed: self.completed.clone(),
            is_completed: self.is_completed,
            mastery: self.mastery,
            mastery_streak: self.mastery_streak,
        }
    }

    /// Fold one evaluated response into the chain: the in-progress walkable
    /// moves to completed, the mastery model advances with the record's
    /// P(Lₙ) as prior, and the record turns terminal once the threshold has
    /// held for `maintainFor` consecutive screens or `exitAfter` walkables
    /// are done. Exhausting walkables exits without the threshold; that is
    /// the path on which no competency is awarded.
    pub fn observe(&self, actual: bool, settings: &BktSettings) -> Result<Self, BktError> {
        let update = bkt::advance(actual, self.mastery, &settings.params)?;

        let mut completed = self.completed.clone();
        if let Some(ref current) = self.in_progress {
            completed.insert(current.element_id);
        }

        let mastery_streak = if update.p_ln >= settings.p_ln {
            self.mastery_streak + 1
        } else {
            0
        };
        let mastered = mastery_streak >= settings.maintain_for;
        let exhausted = completed.len() as u64 >= settings.exit_after;

        Ok(Self {
            meta: self.meta.next(),
            in_progress: None,
            completed,
            is_completed: self.is_completed || mastered || exhausted,
            mastery: update.p_ln,
            mastery_streak,
        })
    }

    pub fn remaining(&self, children: &[WalkableRef]) -> Vec<WalkableRef> {
        children
            .iter()
            .filter(|child| !self.completed.contains(&child.element_id))
            .cloned()
            .collect()
    }

    pub fn status(&self) -> PathwayStatus {
        if self.is_completed {
            PathwayStatus::Completed
        } else if self.completed.is_empty() && self.in_progress.is_none() {
            PathwayStatus::NotStarted
        } else {
            PathwayStatus::InProgress
        }
    }
}

/// Latest progress for one (pathway, learner) pair, one variant per policy
/// family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PathwayProgress {
    Linear(LinearProgress),
    Random(RandomProgress),
    Graph(GraphProgress),
    Bkt(BktProgress),
}

impl PathwayProgress {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Linear(_) => "linear",
            Self::Random(_) => "random",
            Self::Graph(_) => "graph",
            Self::Bkt(_) => "bkt",
        }
    }

    pub fn meta(&self) -> &ProgressMeta {
        match self {
            Self::Linear(p) => &p.meta,
            Self::Random(p) => &p.meta,
            Self::Graph(p) => &p.meta,
            Self::Bkt(p) => &p.meta,
        }
    }
}
