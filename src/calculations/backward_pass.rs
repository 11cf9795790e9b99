use crate::calendar::WorkCalendar;
use crate::dependency::LinkType;
use crate::graph::schedule_dag::ScheduleDag;
use crate::task::{DateConstraint, Task};
use chrono::NaiveDate;
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Computes late start/finish per task in reverse topological order.
///
/// Mirror of the forward pass: the late start of a task is the earliest of
/// every outgoing dependency bound (finish bounds receded by the task's
/// duration), its own finish-no-later-than constraint, and the project
/// finish anchor for tasks with no successors.
pub struct BackwardPass<'a> {
    dag: &'a ScheduleDag,
    calendar: &'a WorkCalendar,
    tasks: &'a HashMap<i32, &'a Task>,
}

impl<'a> BackwardPass<'a> {
    pub fn new(
        dag: &'a ScheduleDag,
        calendar: &'a WorkCalendar,
        tasks: &'a HashMap<i32, &'a Task>,
    ) -> Self {
        Self {
            dag,
            calendar,
            tasks,
        }
    }

    /// `order` must be a topological ordering; it is walked back to front so
    /// every successor's late dates are already in the map when read.
    pub fn execute(
        &self,
        project_finish: NaiveDate,
        order: &[NodeIndex],
    ) -> HashMap<i32, (NaiveDate, NaiveDate)> {
        let anchor = self.calendar.snap_backward(project_finish);
        let mut results: HashMap<i32, (NaiveDate, NaiveDate)> =
            HashMap::with_capacity(order.len());

        for &node in order.iter().rev() {
            let task_id = self.dag.graph[node];
            let duration = *self.dag.durations.get(&task_id).unwrap_or(&0);

            let mut late_start: Option<NaiveDate> = None;
            let mut tighten = |candidate: NaiveDate| match late_start {
                Some(current) if current <= candidate => {}
                _ => late_start = Some(candidate),
            };

            let mut has_successor = false;
            for edge in self.dag.graph.edges_directed(node, Direction::Outgoing) {
                let succ_id = self.dag.graph[edge.target()];
                let Some(&(succ_ls, succ_lf)) = results.get(&succ_id) else {
                    continue;
                };
                has_successor = true;
                let weight = edge.weight();
                match weight.link {
                    LinkType::FS => {
                        let finish = self.calendar.shift_available(succ_ls, -weight.lag_days);
                        tighten(self.calendar.shift_available(finish, -duration));
                    }
                    LinkType::SS => {
                        tighten(self.calendar.shift_available(succ_ls, -weight.lag_days));
                    }
                    LinkType::FF => {
                        let finish = self.calendar.shift_available(succ_lf, -weight.lag_days);
                        tighten(self.calendar.shift_available(finish, -duration));
                    }
                    LinkType::SF => {
                        tighten(self.calendar.shift_available(succ_lf, -weight.lag_days));
                    }
                }
            }

            if !has_successor {
                tighten(self.calendar.shift_available(anchor, -duration));
            }

            if let Some(task) = self.tasks.get(&task_id) {
                if let Some(DateConstraint::FinishNoLaterThan(date)) = task.constraint {
                    let finish = self.calendar.snap_backward(date);
                    tighten(self.calendar.shift_available(finish, -duration));
                }
            }

            let late_start = late_start.unwrap_or(anchor);
            let late_finish = self.calendar.shift_available(late_start, duration);
            results.insert(task_id, (late_start, late_finish));
        }

        results
    }
}
