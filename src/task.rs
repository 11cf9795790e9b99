use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a task participates in scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// A regular unit of work with a duration.
    Task,
    /// A zero-duration marker; start and finish always coincide.
    Milestone,
    /// A WBS roll-up. Never scheduled on its own; its dates are the envelope
    /// of its children.
    Summary,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Task => "task",
            TaskKind::Milestone => "milestone",
            TaskKind::Summary => "summary",
        }
    }
}

/// Which quantity stays fixed when the planning surface edits a task. The
/// passes always read `duration_days`; this is carried for the callers that
/// maintain the duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortType {
    FixedDuration,
    FixedWork,
    FixedUnits,
}

impl Default for EffortType {
    fn default() -> Self {
        EffortType::FixedDuration
    }
}

/// A date restriction a task carries on top of its dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateConstraint {
    /// Bounds the forward pass: the task may not start before this date.
    StartNoEarlierThan(NaiveDate),
    /// Bounds the backward pass: the task may not finish after this date.
    FinishNoLaterThan(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i32,
    pub name: String,
    /// Working days; 0 for milestones.
    pub duration_days: i64,
    #[serde(default = "TaskKind::default_kind")]
    pub kind: TaskKind,
    #[serde(default)]
    pub effort: EffortType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<DateConstraint>,
    /// Summary task this task nests under, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wbs_code: Option<String>,
}

impl TaskKind {
    fn default_kind() -> Self {
        TaskKind::Task
    }
}

impl Task {
    pub fn new(id: i32, name: impl Into<String>, duration_days: i64) -> Self {
        Self {
            id,
            name: name.into(),
            duration_days,
            kind: TaskKind::Task,
            effort: EffortType::FixedDuration,
            constraint: None,
            parent_id: None,
            wbs_code: None,
        }
    }

    pub fn milestone(id: i32, name: impl Into<String>) -> Self {
        let mut task = Self::new(id, name, 0);
        task.kind = TaskKind::Milestone;
        task
    }

    pub fn summary(id: i32, name: impl Into<String>) -> Self {
        let mut task = Self::new(id, name, 0);
        task.kind = TaskKind::Summary;
        task
    }

    pub fn with_constraint(mut self, constraint: DateConstraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    pub fn with_parent(mut self, parent_id: i32) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn is_summary(&self) -> bool {
        self.kind == TaskKind::Summary
    }

    pub fn is_milestone(&self) -> bool {
        self.kind == TaskKind::Milestone
    }
}
