pub mod schedule_dag;

pub use schedule_dag::{DependencyEdge, ScheduleDag};
