use serde::{Deserialize, Serialize};

/// Which endpoints of predecessor and successor a dependency ties together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    /// Finish-to-start: successor starts after the predecessor finishes.
    FS,
    /// Start-to-start: successor starts after the predecessor starts.
    SS,
    /// Finish-to-finish: successor finishes after the predecessor finishes.
    FF,
    /// Start-to-finish: successor finishes after the predecessor starts.
    SF,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::FS => "FS",
            LinkType::SS => "SS",
            LinkType::FF => "FF",
            LinkType::SF => "SF",
        }
    }

    pub fn from_str(input: &str) -> Option<Self> {
        match input.trim().to_ascii_uppercase().as_str() {
            "FS" => Some(LinkType::FS),
            "SS" => Some(LinkType::SS),
            "FF" => Some(LinkType::FF),
            "SF" => Some(LinkType::SF),
            _ => None,
        }
    }
}

impl Default for LinkType {
    fn default() -> Self {
        LinkType::FS
    }
}

/// A directed edge in the task graph: `successor` is constrained relative to
/// `predecessor` per the link type, offset by a signed working-day lag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub predecessor_id: i32,
    pub successor_id: i32,
    #[serde(default)]
    pub link: LinkType,
    /// Working days; negative values are leads.
    #[serde(default)]
    pub lag_days: i64,
}

impl Dependency {
    pub fn new(predecessor_id: i32, successor_id: i32) -> Self {
        Self {
            predecessor_id,
            successor_id,
            link: LinkType::FS,
            lag_days: 0,
        }
    }

    pub fn with_link(mut self, link: LinkType) -> Self {
        self.link = link;
        self
    }

    pub fn with_lag(mut self, lag_days: i64) -> Self {
        self.lag_days = lag_days;
        self
    }
}
