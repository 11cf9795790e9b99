use crate::schedule::ScheduleError;
use crate::task::{Task, TaskKind};
use std::collections::HashMap;

pub fn validate_task(task: &Task) -> Result<(), ScheduleError> {
    if task.duration_days < 0 {
        return Err(ScheduleError::InvalidTask {
            id: task.id,
            message: format!("negative duration {}", task.duration_days),
        });
    }

    if task.kind == TaskKind::Milestone && task.duration_days != 0 {
        return Err(ScheduleError::InvalidTask {
            id: task.id,
            message: format!(
                "milestone must have duration 0 (got {})",
                task.duration_days
            ),
        });
    }

    if task.parent_id == Some(task.id) {
        return Err(ScheduleError::InvalidTask {
            id: task.id,
            message: "task cannot be its own parent".to_string(),
        });
    }

    Ok(())
}

pub fn validate_task_collection(tasks: &[Task]) -> Result<(), ScheduleError> {
    let mut by_id: HashMap<i32, &Task> = HashMap::with_capacity(tasks.len());
    for task in tasks {
        if by_id.insert(task.id, task).is_some() {
            return Err(ScheduleError::DuplicateTaskId { id: task.id });
        }
        validate_task(task)?;
    }

    for task in tasks {
        if let Some(parent_id) = task.parent_id {
            match by_id.get(&parent_id) {
                None => {
                    return Err(ScheduleError::InvalidTask {
                        id: task.id,
                        message: format!("parent {} does not exist", parent_id),
                    });
                }
                Some(parent) if parent.kind != TaskKind::Summary => {
                    return Err(ScheduleError::InvalidTask {
                        id: task.id,
                        message: format!("parent {} is not a summary task", parent_id),
                    });
                }
                Some(_) => {}
            }
        }
    }

    Ok(())
}
