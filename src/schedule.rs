use crate::calculations::{BackwardPass, ForwardPass};
use crate::calendar::WorkCalendar;
use crate::dependency::Dependency;
use crate::graph::schedule_dag::ScheduleDag;
use crate::task::Task;
use crate::task_validation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Why a scheduling run failed. `InfeasibleTargetFinish` is the exception:
/// the run still completes, with negative float quantifying the deficit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleError {
    /// The calendar's weekly mask has no working day.
    InvalidCalendar,
    DuplicateTaskId {
        id: i32,
    },
    InvalidTask {
        id: i32,
        message: String,
    },
    /// A dependency references a task id that does not exist.
    DanglingReference {
        task_id: i32,
    },
    /// A dependency is attached to a summary task; summaries are roll-ups,
    /// not schedulable nodes.
    SummaryDependency {
        task_id: i32,
    },
    /// The dependency graph contains a cycle; `cycle` lists its members in
    /// traversal order (a single id for a self-loop).
    CyclicDependency {
        cycle: Vec<i32>,
    },
    /// Non-fatal: the requested finish precedes the earliest achievable one.
    /// The run completes anchored to the target so negative float shows the
    /// size of the deficit.
    InfeasibleTargetFinish {
        target: NaiveDate,
        required: NaiveDate,
    },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::InvalidCalendar => {
                write!(f, "calendar has no working days")
            }
            ScheduleError::DuplicateTaskId { id } => {
                write!(f, "duplicate task id {id}")
            }
            ScheduleError::InvalidTask { id, message } => {
                write!(f, "invalid task {id}: {message}")
            }
            ScheduleError::DanglingReference { task_id } => {
                write!(f, "dependency references missing task {task_id}")
            }
            ScheduleError::SummaryDependency { task_id } => {
                write!(f, "dependency attached to summary task {task_id}")
            }
            ScheduleError::CyclicDependency { cycle } => {
                let chain = cycle
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("->");
                write!(f, "dependency cycle: {chain}")
            }
            ScheduleError::InfeasibleTargetFinish { target, required } => write!(
                f,
                "target finish {target} precedes earliest achievable finish {required}"
            ),
        }
    }
}

impl std::error::Error for ScheduleError {}

/// One immutable snapshot of everything a scheduling run consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub tasks: Vec<Task>,
    pub dependencies: Vec<Dependency>,
    pub calendar: WorkCalendar,
    pub project_start: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_finish: Option<NaiveDate>,
}

impl ScheduleInput {
    pub fn new(
        tasks: Vec<Task>,
        dependencies: Vec<Dependency>,
        calendar: WorkCalendar,
        project_start: NaiveDate,
    ) -> Self {
        Self {
            tasks,
            dependencies,
            calendar,
            project_start,
            target_finish: None,
        }
    }

    pub fn with_target_finish(mut self, target_finish: NaiveDate) -> Self {
        self.target_finish = Some(target_finish);
        self
    }
}

/// A task augmented with the computed schedule fields. Dates are `None` only
/// for summary tasks with no scheduled descendants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    #[serde(flatten)]
    pub task: Task,
    pub early_start: Option<NaiveDate>,
    pub early_finish: Option<NaiveDate>,
    pub late_start: Option<NaiveDate>,
    pub late_finish: Option<NaiveDate>,
    pub total_float: Option<i64>,
    pub is_critical: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub schedulable: bool,
    pub tasks: Vec<ScheduledTask>,
    pub project_finish: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ScheduleError>,
}

impl ScheduleResult {
    fn failure(error: ScheduleError) -> Self {
        Self {
            schedulable: false,
            tasks: Vec::new(),
            project_finish: None,
            error: Some(error),
        }
    }

    pub fn task(&self, id: i32) -> Option<&ScheduledTask> {
        self.tasks.iter().find(|t| t.task.id == id)
    }

    pub fn summary(&self) -> ScheduleSummary {
        let mut critical: Vec<(NaiveDate, i32)> = Vec::new();
        for scheduled in &self.tasks {
            if scheduled.task.is_summary() || !scheduled.is_critical {
                continue;
            }
            if let Some(start) = scheduled.early_start {
                critical.push((start, scheduled.task.id));
            }
        }
        critical.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

        ScheduleSummary {
            schedulable: self.schedulable,
            task_count: self.tasks.len(),
            critical_count: critical.len(),
            critical_path: critical.into_iter().map(|(_, id)| id).collect(),
            project_finish: self.project_finish,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub schedulable: bool,
    pub task_count: usize,
    pub critical_count: usize,
    pub critical_path: Vec<i32>,
    pub project_finish: Option<NaiveDate>,
}

impl ScheduleSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("schedulable={}", self.schedulable));
        parts.push(format!("tasks={}", self.task_count));
        parts.push(format!("critical={}", self.critical_count));
        if let Some(date) = self.project_finish {
            parts.push(format!("finish={}", date));
        }
        if !self.critical_path.is_empty() {
            let chain = self
                .critical_path
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("->");
            parts.push(format!("crit_path={}", chain));
        }
        parts.join(", ")
    }
}

/// Stateless CPM engine: one borrowed input snapshot in, one owned result
/// out. Fatal failures come back inside the result, never as a panic.
#[derive(Debug, Default)]
pub struct Scheduler;

impl Scheduler {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self, input: &ScheduleInput) -> ScheduleResult {
        match self.compute(input) {
            Ok(result) => result,
            Err(error) => ScheduleResult::failure(error),
        }
    }

    fn compute(&self, input: &ScheduleInput) -> Result<ScheduleResult, ScheduleError> {
        if !input.calendar.has_working_days() {
            return Err(ScheduleError::InvalidCalendar);
        }
        task_validation::validate_task_collection(&input.tasks)?;

        let dag = ScheduleDag::build(&input.tasks, &input.dependencies)?;
        let order = dag.topological_order()?;

        let by_id: HashMap<i32, &Task> = input.tasks.iter().map(|t| (t.id, t)).collect();

        let forward = ForwardPass::new(&dag, &input.calendar, &by_id);
        let early = forward.execute(input.project_start, &order);

        let computed_finish = early.values().map(|&(_, ef)| ef).max();

        let mut warning = None;
        let anchor = match (input.target_finish, computed_finish) {
            (Some(target), Some(required)) if target < required => {
                warning = Some(ScheduleError::InfeasibleTargetFinish { target, required });
                target
            }
            (Some(target), _) => target,
            (None, Some(required)) => required,
            (None, None) => input.project_start,
        };

        let backward = BackwardPass::new(&dag, &input.calendar, &by_id);
        let late = backward.execute(anchor, &order);

        let mut tasks: Vec<ScheduledTask> = Vec::with_capacity(input.tasks.len());
        for task in &input.tasks {
            if task.is_summary() {
                continue;
            }
            let &(es, ef) = early
                .get(&task.id)
                .expect("forward pass covers every scheduled task");
            let &(ls, lf) = late
                .get(&task.id)
                .expect("backward pass covers every scheduled task");
            let total_float = input.calendar.working_days_between(es, ls);
            tasks.push(ScheduledTask {
                task: task.clone(),
                early_start: Some(es),
                early_finish: Some(ef),
                late_start: Some(ls),
                late_finish: Some(lf),
                total_float: Some(total_float),
                is_critical: total_float <= 0,
            });
        }

        let rolled_up = roll_up_summaries(&input.tasks, &tasks);
        tasks.extend(rolled_up);
        tasks.sort_by_key(|t| t.task.id);

        Ok(ScheduleResult {
            schedulable: true,
            tasks,
            project_finish: computed_finish,
            error: warning,
        })
    }
}

/// Envelope dates for summary tasks: min/max over their transitive
/// non-summary descendants. Float is the minimum child float; a summary is
/// critical when any child is.
fn roll_up_summaries(all_tasks: &[Task], scheduled: &[ScheduledTask]) -> Vec<ScheduledTask> {
    let mut children: HashMap<i32, Vec<i32>> = HashMap::new();
    for task in all_tasks {
        if let Some(parent_id) = task.parent_id {
            children.entry(parent_id).or_default().push(task.id);
        }
    }
    let by_id: HashMap<i32, &Task> = all_tasks.iter().map(|t| (t.id, t)).collect();
    let scheduled_by_id: HashMap<i32, &ScheduledTask> =
        scheduled.iter().map(|t| (t.task.id, t)).collect();

    let mut results = Vec::new();
    for task in all_tasks {
        if !task.is_summary() {
            continue;
        }

        // Walk the subtree iteratively; parent links are caller data, so a
        // visited set guards against malformed summary-to-summary loops.
        let mut leaves: Vec<&ScheduledTask> = Vec::new();
        let mut stack = vec![task.id];
        let mut visited: HashSet<i32> = HashSet::new();
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            if let Some(child_ids) = children.get(&id) {
                for &child_id in child_ids {
                    match by_id.get(&child_id) {
                        Some(child) if child.is_summary() => stack.push(child_id),
                        Some(_) => {
                            if let Some(s) = scheduled_by_id.get(&child_id) {
                                leaves.push(s);
                            }
                        }
                        None => {}
                    }
                }
            }
        }

        let early_start = leaves.iter().filter_map(|s| s.early_start).min();
        let early_finish = leaves.iter().filter_map(|s| s.early_finish).max();
        let late_start = leaves.iter().filter_map(|s| s.late_start).min();
        let late_finish = leaves.iter().filter_map(|s| s.late_finish).max();
        let total_float = leaves.iter().filter_map(|s| s.total_float).min();
        let is_critical = leaves.iter().any(|s| s.is_critical);

        results.push(ScheduledTask {
            task: task.clone(),
            early_start,
            early_finish,
            late_start,
            late_finish,
            total_float,
            is_critical,
        });
    }
    results
}
