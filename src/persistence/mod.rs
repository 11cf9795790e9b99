use crate::calendar::InvalidCalendarError;
use crate::schedule::ScheduleError;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    Csv(csv::Error),
    Calendar(InvalidCalendarError),
    Schedule(ScheduleError),
    InvalidData(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::Calendar(err) => write!(f, "calendar error: {err}"),
            PersistenceError::Schedule(err) => write!(f, "schedule error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<InvalidCalendarError> for PersistenceError {
    fn from(value: InvalidCalendarError) -> Self {
        Self::Calendar(value)
    }
}

impl From<ScheduleError> for PersistenceError {
    fn from(value: ScheduleError) -> Self {
        Self::Schedule(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub mod file;

pub use file::{load_project_from_json, save_project_to_json, save_schedule_to_csv};
