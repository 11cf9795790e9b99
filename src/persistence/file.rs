use super::{PersistenceError, PersistenceResult};
use crate::calendar::{WorkCalendar, WorkCalendarConfig};
use crate::dependency::Dependency;
use crate::schedule::{ScheduleInput, ScheduleResult};
use crate::task::Task;
use crate::task_validation;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// On-disk project snapshot: the scheduling input, with the calendar stored
/// as its config form. Computed results are exported separately and never
/// read back as authority.
#[derive(Serialize, Deserialize)]
struct ProjectFile {
    project_start: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_finish: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    calendar: Option<WorkCalendarConfig>,
    tasks: Vec<Task>,
    #[serde(default)]
    dependencies: Vec<Dependency>,
}

impl ProjectFile {
    fn from_input(input: &ScheduleInput) -> Self {
        Self {
            project_start: input.project_start,
            target_finish: input.target_finish,
            calendar: Some(input.calendar.to_config()),
            tasks: input.tasks.clone(),
            dependencies: input.dependencies.clone(),
        }
    }

    fn into_input(self) -> PersistenceResult<ScheduleInput> {
        task_validation::validate_task_collection(&self.tasks)?;

        let calendar = match self.calendar {
            Some(config) => WorkCalendar::from_config(&config)?,
            None => {
                let start_year = self.project_start.year();
                let end_year = self
                    .target_finish
                    .map(|d| d.year())
                    .unwrap_or(start_year + 1)
                    .max(start_year);
                WorkCalendar::with_year_range(start_year, end_year)
            }
        };

        Ok(ScheduleInput {
            tasks: self.tasks,
            dependencies: self.dependencies,
            calendar,
            project_start: self.project_start,
            target_finish: self.target_finish,
        })
    }
}

pub fn save_project_to_json<P: AsRef<Path>>(
    input: &ScheduleInput,
    path: P,
) -> PersistenceResult<()> {
    let snapshot = ProjectFile::from_input(input);
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_project_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<ScheduleInput> {
    let file = File::open(path)?;
    let snapshot: ProjectFile = serde_json::from_reader(file)?;
    snapshot.into_input()
}

#[derive(Serialize)]
struct ScheduleCsvRecord<'a> {
    id: i32,
    name: &'a str,
    kind: &'a str,
    duration_days: i64,
    early_start: String,
    early_finish: String,
    late_start: String,
    late_finish: String,
    total_float: String,
    is_critical: bool,
}

pub fn save_schedule_to_csv<P: AsRef<Path>>(
    result: &ScheduleResult,
    path: P,
) -> PersistenceResult<()> {
    if !result.schedulable {
        return Err(PersistenceError::InvalidData(
            "cannot export an unschedulable result".into(),
        ));
    }
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for scheduled in &result.tasks {
        writer.serialize(ScheduleCsvRecord {
            id: scheduled.task.id,
            name: &scheduled.task.name,
            kind: scheduled.task.kind.as_str(),
            duration_days: scheduled.task.duration_days,
            early_start: format_date(scheduled.early_start),
            early_finish: format_date(scheduled.early_finish),
            late_start: format_date(scheduled.late_start),
            late_finish: format_date(scheduled.late_finish),
            total_float: format_option_i64(scheduled.total_float),
            is_critical: scheduled.is_critical,
        })?;
    }
    writer.flush().map_err(PersistenceError::Io)?;
    Ok(())
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn format_option_i64(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
