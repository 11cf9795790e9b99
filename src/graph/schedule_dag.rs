use crate::dependency::{Dependency, LinkType};
use crate::schedule::ScheduleError;
use crate::task::Task;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

/// Edge payload: how the successor is tied to the predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyEdge {
    pub link: LinkType,
    pub lag_days: i64,
}

/// Dependency graph over the schedulable (non-summary) tasks. Node weights
/// are task ids; parallel edges between the same pair are allowed since FS
/// and SS links, say, constrain different endpoints.
#[derive(Debug)]
pub struct ScheduleDag {
    pub graph: DiGraph<i32, DependencyEdge>,
    pub id_to_index: HashMap<i32, NodeIndex>,
    pub durations: HashMap<i32, i64>,
}

impl ScheduleDag {
    pub fn build(tasks: &[Task], dependencies: &[Dependency]) -> Result<Self, ScheduleError> {
        let mut graph: DiGraph<i32, DependencyEdge> = DiGraph::new();
        let mut id_to_index: HashMap<i32, NodeIndex> = HashMap::new();
        let mut durations: HashMap<i32, i64> = HashMap::new();
        let mut summary_ids: HashSet<i32> = HashSet::new();

        for task in tasks {
            if task.is_summary() {
                summary_ids.insert(task.id);
                continue;
            }
            let node_ix = graph.add_node(task.id);
            id_to_index.insert(task.id, node_ix);
            durations.insert(task.id, task.duration_days);
        }

        for dep in dependencies {
            for endpoint in [dep.predecessor_id, dep.successor_id] {
                if summary_ids.contains(&endpoint) {
                    return Err(ScheduleError::SummaryDependency { task_id: endpoint });
                }
                if !id_to_index.contains_key(&endpoint) {
                    return Err(ScheduleError::DanglingReference { task_id: endpoint });
                }
            }
            if dep.predecessor_id == dep.successor_id {
                return Err(ScheduleError::CyclicDependency {
                    cycle: vec![dep.predecessor_id],
                });
            }
            let u = id_to_index[&dep.predecessor_id];
            let v = id_to_index[&dep.successor_id];
            graph.add_edge(
                u,
                v,
                DependencyEdge {
                    link: dep.link,
                    lag_days: dep.lag_days,
                },
            );
        }

        Ok(Self {
            graph,
            id_to_index,
            durations,
        })
    }

    /// Topological ordering of the graph, or the first cycle found.
    ///
    /// Three-color depth-first search: a back-edge into an in-progress node
    /// signals a cycle, and the current path pinpoints its members in order.
    pub fn topological_order(&self) -> Result<Vec<NodeIndex>, ScheduleError> {
        const WHITE: u8 = 0;
        const GRAY: u8 = 1;
        const BLACK: u8 = 2;

        let mut colors = vec![WHITE; self.graph.node_count()];
        let mut path: Vec<NodeIndex> = Vec::new();
        let mut postorder: Vec<NodeIndex> = Vec::new();

        fn visit(
            graph: &DiGraph<i32, DependencyEdge>,
            node: NodeIndex,
            colors: &mut [u8],
            path: &mut Vec<NodeIndex>,
            postorder: &mut Vec<NodeIndex>,
        ) -> Result<(), Vec<i32>> {
            colors[node.index()] = GRAY;
            path.push(node);
            for next in graph.neighbors_directed(node, Direction::Outgoing) {
                match colors[next.index()] {
                    WHITE => visit(graph, next, colors, path, postorder)?,
                    GRAY => {
                        // Back-edge: everything on the path from `next` onward
                        // is part of the cycle.
                        let start = path
                            .iter()
                            .position(|&ix| ix == next)
                            .unwrap_or(0);
                        let cycle = path[start..].iter().map(|&ix| graph[ix]).collect();
                        return Err(cycle);
                    }
                    _ => {}
                }
            }
            path.pop();
            colors[node.index()] = BLACK;
            postorder.push(node);
            Ok(())
        }

        for node in self.graph.node_indices() {
            if colors[node.index()] == WHITE {
                visit(&self.graph, node, &mut colors, &mut path, &mut postorder)
                    .map_err(|cycle| ScheduleError::CyclicDependency { cycle })?;
            }
        }

        postorder.reverse();
        Ok(postorder)
    }
}
