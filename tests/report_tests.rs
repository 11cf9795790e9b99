use chrono::{NaiveDate, Weekday};
use cpm_engine::{
    Dependency, ScheduleInput, Scheduler, Task, WorkCalendar, render_table, result_to_dataframe,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample_result() -> cpm_engine::ScheduleResult {
    let calendar = WorkCalendar::custom(
        vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ],
        Vec::new(),
    )
    .unwrap();
    let tasks = vec![
        Task::new(1, "design", 3),
        Task::new(2, "build", 5),
        Task::milestone(3, "ship"),
    ];
    let deps = vec![Dependency::new(1, 2), Dependency::new(2, 3)];
    let input = ScheduleInput::new(tasks, deps, calendar, d(2025, 1, 6));
    Scheduler::new().run(&input)
}

#[test]
fn dataframe_has_expected_columns_and_rows() {
    let result = sample_result();
    let df = result_to_dataframe(&result).unwrap();

    assert_eq!(df.height(), 3);
    let expected = [
        "id",
        "name",
        "kind",
        "duration_days",
        "early_start",
        "early_finish",
        "late_start",
        "late_finish",
        "total_float",
        "is_critical",
    ];
    for name in expected {
        assert!(df.column(name).is_ok(), "missing column {name}");
    }
}

#[test]
fn dataframe_carries_computed_values() {
    let result = sample_result();
    let df = result_to_dataframe(&result).unwrap();

    let floats = df.column("total_float").unwrap().i64().unwrap();
    for idx in 0..df.height() {
        assert_eq!(floats.get(idx), Some(0));
    }
    let crit = df.column("is_critical").unwrap().bool().unwrap();
    assert_eq!(crit.get(0), Some(true));
}

#[test]
fn render_table_lists_every_task() {
    let result = sample_result();
    let df = result_to_dataframe(&result).unwrap();
    let rendered = render_table(&df);

    assert!(rendered.contains("early_start"));
    assert!(rendered.contains("design"));
    assert!(rendered.contains("build"));
    assert!(rendered.contains("ship"));
    assert!(rendered.contains("milestone"));
    // One separator above the header, one below, one at the bottom
    assert_eq!(rendered.lines().filter(|l| l.starts_with('+')).count(), 3);
}

#[test]
fn empty_result_renders_header_only() {
    let calendar = WorkCalendar::default();
    let input = ScheduleInput::new(vec![], vec![], calendar, d(2025, 1, 6));
    let result = Scheduler::new().run(&input);
    let df = result_to_dataframe(&result).unwrap();

    assert_eq!(df.height(), 0);
    let rendered = render_table(&df);
    assert!(rendered.contains("id"));
}
