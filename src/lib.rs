pub mod calculations;
pub mod calendar;
pub mod dependency;
pub mod graph;
pub mod persistence;
pub mod report;
pub mod schedule;
pub mod task;
pub(crate) mod task_validation;

pub use calendar::{InvalidCalendarError, WorkCalendar, WorkCalendarConfig};
pub use dependency::{Dependency, LinkType};
pub use persistence::{
    PersistenceError, load_project_from_json, save_project_to_json, save_schedule_to_csv,
};
pub use report::{render_table, result_to_dataframe};
pub use schedule::{
    ScheduleError, ScheduleInput, ScheduleResult, ScheduleSummary, ScheduledTask, Scheduler,
};
pub use task::{DateConstraint, EffortType, Task, TaskKind};
