/*
[INPUT]:  Raw todo records, user-entered titles
[OUTPUT]: Todo items, filters, fetch status and timer fields held by the store
[POS]:    Domain layer - value types shared by store, coordinator and front ends
[UPDATE]: When adding fields to the store state
*/

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use uuid::Uuid;

/// Opaque todo identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoId(String);

impl TodoId {
    /// Fresh identifier for a newly added item.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TodoId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TodoId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
}

impl TodoItem {
    pub fn new(id: impl Into<TodoId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            completed: false,
        }
    }
}

/// Which subset of the list is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(self, item: &TodoItem) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !item.completed,
            Filter::Completed => item.completed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Filter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" | "done" => Ok(Filter::Completed),
            other => Err(anyhow!("unknown filter: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Remote load status. `error` is only set while `status` is `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchState {
    pub status: FetchStatus,
    pub error: Option<String>,
    /// Number of fetch requests applied so far; the latest request owns this value.
    pub request_seq: u64,
}

/// Timer-mode fields.
///
/// `remaining_seconds` stays 0 unless a countdown is running for an active draft, and
/// `is_typing` is only true while `mode` is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerState {
    pub mode: bool,
    pub is_typing: bool,
    pub remaining_seconds: u32,
    pub draft_reset_epoch: u64,
}

impl TimerState {
    /// True when a countdown has run out while the user is still composing.
    pub fn time_is_up(&self) -> bool {
        self.mode && self.is_typing && self.remaining_seconds == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = TodoId::generate();
        let b = TodoId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn filter_parse_and_label() {
        assert_eq!("Active".parse::<Filter>().expect("parse"), Filter::Active);
        assert_eq!("done".parse::<Filter>().expect("parse"), Filter::Completed);
        assert!("someday".parse::<Filter>().is_err());
        assert_eq!(Filter::Completed.to_string(), "completed");
    }

    #[test]
    fn time_is_up_requires_mode_and_typing() {
        let mut timer = TimerState {
            mode: true,
            is_typing: true,
            ..TimerState::default()
        };
        assert!(timer.time_is_up());
        timer.remaining_seconds = 3;
        assert!(!timer.time_is_up());
        timer.remaining_seconds = 0;
        timer.is_typing = false;
        assert!(!timer.time_is_up());
    }
}
