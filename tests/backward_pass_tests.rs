use chrono::{NaiveDate, Weekday};
use cpm_engine::{
    DateConstraint, Dependency, ScheduleError, ScheduleInput, Scheduler, Task, WorkCalendar,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn five_day_week() -> WorkCalendar {
    WorkCalendar::custom(
        vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ],
        Vec::new(),
    )
    .unwrap()
}

#[test]
fn linear_fs_chain_is_fully_critical() {
    let tasks = vec![
        Task::new(1, "A", 5),
        Task::new(2, "B", 3),
        Task::new(3, "C", 2),
    ];
    let deps = vec![Dependency::new(1, 2), Dependency::new(2, 3)];
    let input = ScheduleInput::new(tasks, deps, five_day_week(), d(2024, 1, 1));
    let result = Scheduler::new().run(&input);

    assert!(result.schedulable);
    for id in [1, 2, 3] {
        let t = result.task(id).unwrap();
        assert_eq!(t.total_float, Some(0), "task {id} should have zero float");
        assert!(t.is_critical);
        assert_eq!(t.early_start, t.late_start);
        assert_eq!(t.early_finish, t.late_finish);
    }
    assert_eq!(result.project_finish, result.task(3).unwrap().early_finish);
}

#[test]
fn parallel_branch_carries_float() {
    // 1 -> {2 slow, 3 fast} -> 4
    let tasks = vec![
        Task::new(1, "start", 2),
        Task::new(2, "slow", 3),
        Task::new(3, "fast", 1),
        Task::new(4, "end", 2),
    ];
    let deps = vec![
        Dependency::new(1, 2),
        Dependency::new(1, 3),
        Dependency::new(2, 4),
        Dependency::new(3, 4),
    ];
    let input = ScheduleInput::new(tasks, deps, five_day_week(), d(2025, 1, 6));
    let result = Scheduler::new().run(&input);

    let slow = result.task(2).unwrap();
    let fast = result.task(3).unwrap();
    assert_eq!(slow.total_float, Some(0));
    assert!(slow.is_critical);
    assert_eq!(fast.total_float, Some(2));
    assert!(!fast.is_critical);

    // The summary's critical path follows the slow branch
    let summary = result.summary();
    assert_eq!(summary.critical_path, vec![1, 2, 4]);
}

#[test]
fn no_target_finish_means_no_negative_float() {
    let tasks = vec![
        Task::new(1, "A", 4),
        Task::new(2, "B", 2),
        Task::new(3, "C", 6),
    ];
    let deps = vec![Dependency::new(1, 2)];
    let input = ScheduleInput::new(tasks, deps, five_day_week(), d(2024, 3, 4));
    let result = Scheduler::new().run(&input);

    assert!(result.schedulable);
    assert_eq!(result.error, None);
    for t in &result.tasks {
        assert!(t.total_float.unwrap() >= 0);
    }
}

#[test]
fn feasible_target_finish_relaxes_floats() {
    let tasks = vec![Task::new(1, "A", 2), Task::new(2, "B", 3)];
    let deps = vec![Dependency::new(1, 2)];
    let input = ScheduleInput::new(tasks, deps, five_day_week(), d(2024, 1, 1))
        .with_target_finish(d(2024, 1, 15));
    let result = Scheduler::new().run(&input);

    assert!(result.schedulable);
    assert_eq!(result.error, None);
    // Work still ends at the computed finish, not the target
    assert_eq!(result.project_finish, Some(d(2024, 1, 8)));
    // Five working days of slack between Jan 8 and Jan 15
    assert_eq!(result.task(2).unwrap().total_float, Some(5));
    assert!(!result.task(2).unwrap().is_critical);
}

#[test]
fn infeasible_target_finish_surfaces_negative_float() {
    // Chain needs 10 working days; the target allows 3.
    let tasks = vec![Task::new(1, "A", 5), Task::new(2, "B", 5)];
    let deps = vec![Dependency::new(1, 2)];
    let start = d(2024, 1, 1);
    let target = d(2024, 1, 4);
    let input =
        ScheduleInput::new(tasks, deps, five_day_week(), start).with_target_finish(target);
    let result = Scheduler::new().run(&input);

    assert!(result.schedulable);
    assert_eq!(
        result.error,
        Some(ScheduleError::InfeasibleTargetFinish {
            target,
            required: d(2024, 1, 15),
        })
    );
    assert_eq!(result.project_finish, Some(d(2024, 1, 15)));
    assert!(
        result.tasks.iter().any(|t| t.total_float.unwrap() < 0),
        "deficit must surface as negative float"
    );
    // Negative-float tasks stay flagged
    assert!(result.tasks.iter().all(|t| t.is_critical));
}

#[test]
fn finish_no_later_than_caps_late_dates() {
    let tasks = vec![
        Task::new(1, "A", 2).with_constraint(DateConstraint::FinishNoLaterThan(d(2024, 1, 10))),
    ];
    let input = ScheduleInput::new(tasks, vec![], five_day_week(), d(2024, 1, 1))
        .with_target_finish(d(2024, 1, 31));
    let result = Scheduler::new().run(&input);

    let a = result.task(1).unwrap();
    assert_eq!(a.late_finish, Some(d(2024, 1, 10)));
    assert_eq!(a.late_start, Some(d(2024, 1, 8)));
    assert_eq!(a.total_float, Some(5));
}

#[test]
fn backward_pass_mirrors_lag() {
    let tasks = vec![Task::new(1, "A", 1), Task::new(2, "B", 1)];
    let deps = vec![Dependency::new(1, 2).with_lag(2)];
    let input = ScheduleInput::new(tasks, deps, five_day_week(), d(2024, 1, 1));
    let result = Scheduler::new().run(&input);

    // With a single chain and no target, everything is critical even with lag
    assert_eq!(result.task(1).unwrap().total_float, Some(0));
    assert_eq!(result.task(2).unwrap().total_float, Some(0));
}
