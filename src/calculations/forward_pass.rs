use crate::calendar::WorkCalendar;
use crate::dependency::LinkType;
use crate::graph::schedule_dag::ScheduleDag;
use crate::task::{DateConstraint, Task};
use chrono::NaiveDate;
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Computes early start/finish per task in topological order.
///
/// The early start of a task is the latest of: the project start, every
/// incoming dependency bound, and its own start-no-earlier-than constraint.
/// Finish-side links (FF/SF) convert to start bounds by receding the finish
/// bound by the task's duration.
pub struct ForwardPass<'a> {
    dag: &'a ScheduleDag,
    calendar: &'a WorkCalendar,
    tasks: &'a HashMap<i32, &'a Task>,
}

impl<'a> ForwardPass<'a> {
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

    /// `order` must be a topological ordering of the DAG, so every
    /// predecessor's early dates are already in the map when read.
    pub fn execute(
        &self,
        project_start: NaiveDate,
        order: &[NodeIndex],
    ) -> HashMap<i32, (NaiveDate, NaiveDate)> {
        let mut results: HashMap<i32, (NaiveDate, NaiveDate)> =
            HashMap::with_capacity(order.len());

        for &node in order {
            let task_id = self.dag.graph[node];
            let duration = *self.dag.durations.get(&task_id).unwrap_or(&0);

            let mut early_start = self.calendar.snap_forward(project_start);

            for edge in self.dag.graph.edges_directed(node, Direction::Incoming) {
                let pred_id = self.dag.graph[edge.source()];
                let Some(&(pred_es, pred_ef)) = results.get(&pred_id) else {
                    continue;
                };
                let weight = edge.weight();
                let bound = match weight.link {
                    LinkType::FS => self.calendar.shift_available(pred_ef, weight.lag_days),
                    LinkType::SS => self.calendar.shift_available(pred_es, weight.lag_days),
                    LinkType::FF => {
                        let finish = self.calendar.shift_available(pred_ef, weight.lag_days);
                        self.calendar.shift_available(finish, -duration)
                    }
                    LinkType::SF => {
                        let finish = self.calendar.shift_available(pred_es, weight.lag_days);
                        self.calendar.shift_available(finish, -duration)
                    }
                };
                if bound > early_start {
                    early_start = bound;
                }
            }

            if let Some(task) = self.tasks.get(&task_id) {
                if let Some(DateConstraint::StartNoEarlierThan(date)) = task.constraint {
                    let bound = self.calendar.snap_forward(date);
                    if bound > early_start {
                        early_start = bound;
                    }
                }
            }

            let early_start = self.calendar.snap_forward(early_start);
            let early_finish = self.calendar.shift_available(early_start, duration);
            results.insert(task_id, (early_start, early_finish));
        }

        results
    }
}
