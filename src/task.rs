//! To-do tasks

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Caller-assigned task identifier.
/// Uniqueness within a collection is up to the caller, see [`AppState::next_task_id`](crate::state::AppState::next_task_id)
pub type TaskId = i64;

/// The timeframe a task should be completed in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Timeframe {
    Today,
    EndOfWeek,
    EndOfMonth,
}

impl Timeframe {
    /// Every timeframe, in dashboard order
    pub const ALL: [Timeframe; 3] = [Timeframe::Today, Timeframe::EndOfWeek, Timeframe::EndOfMonth];

    /// The tag used in local snapshots and remote records
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Today => "today",
            Timeframe::EndOfWeek => "endOfWeek",
            Timeframe::EndOfMonth => "endOfMonth",
        }
    }

    /// The header of the dashboard group for this timeframe
    pub fn title(&self) -> &'static str {
        match self {
            Timeframe::Today => "TODAY",
            Timeframe::EndOfWeek => "END OF WEEK",
            Timeframe::EndOfMonth => "END OF MONTH",
        }
    }

    /// Whether completed tasks stay visible in the group for this timeframe.
    ///
    /// Only the "today" group keeps its completed tasks, so that the user can see what has been done today.
    pub fn shows_completed(&self) -> bool {
        matches!(self, Timeframe::Today)
    }
}

impl Display for Timeframe {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown timeframe {0:?} (expected one of today, endOfWeek, endOfMonth)")]
pub struct ParseTimeframeError(String);

impl FromStr for Timeframe {
    type Err = ParseTimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL.iter()
            .find(|tf| tf.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| ParseTimeframeError(s.to_string()))
    }
}


/// A to-do task
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    /// Fixed at creation
    timeframe: Timeframe,
    /// The display text of the task
    text: String,
    /// Optional longer description. Empty when the user gave none
    #[serde(default)]
    details: String,
    completed: bool,
}

impl Task {
    /// Create a new, uncompleted task
    pub fn new(id: TaskId, text: String, details: Option<String>, timeframe: Timeframe) -> Self {
        Self {
            id,
            timeframe,
            text,
            details: details.unwrap_or_default(),
            completed: false,
        }
    }

    pub fn id(&self) -> TaskId              { self.id        }
    pub fn timeframe(&self) -> Timeframe    { self.timeframe }
    pub fn text(&self) -> &str              { &self.text     }
    pub fn details(&self) -> &str           { &self.details  }
    pub fn completed(&self) -> bool         { self.completed }

    /// Mark an uncompleted task as completed, or a completed one as uncompleted
    pub fn toggle_completion(&mut self) {
        self.completed = !self.completed;
    }

    /// Whether this task belongs to the dashboard group of `timeframe`
    pub fn is_visible_in(&self, timeframe: Timeframe) -> bool {
        self.timeframe == timeframe && (timeframe.shows_completed() || !self.completed)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_is_a_noop() {
        let mut task = Task::new(1, "Buy milk".to_string(), None, Timeframe::Today);
        let original = task.clone();

        task.toggle_completion();
        assert!(task.completed());
        task.toggle_completion();
        assert_eq!(task, original);
    }

    #[test]
    fn new_task_defaults() {
        let task = Task::new(7, String::new(), None, Timeframe::EndOfMonth);
        assert_eq!(task.details(), "");
        assert_eq!(task.text(), "");
        assert!(task.completed() == false);

        let task = Task::new(8, "Call mum".to_string(), Some("before 8pm".to_string()), Timeframe::EndOfWeek);
        assert_eq!(task.details(), "before 8pm");
    }

    #[test]
    fn serialized_field_names() {
        let task = Task::new(3, "Pay rent".to_string(), None, Timeframe::EndOfWeek);
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value, serde_json::json!({
            "id": 3,
            "timeframe": "endOfWeek",
            "text": "Pay rent",
            "details": "",
            "completed": false,
        }));
    }

    #[test]
    fn missing_details_default_to_empty() {
        let task: Task = serde_json::from_str(r#"{"id": 2, "timeframe": "endOfMonth", "text": "Taxes", "completed": true}"#).unwrap();
        assert_eq!(task.details(), "");
        assert_eq!(task.timeframe(), Timeframe::EndOfMonth);
        assert!(task.completed());
    }

    #[test]
    fn unknown_timeframe_is_rejected() {
        let res: Result<Task, _> = serde_json::from_str(r#"{"id": 2, "timeframe": "someday", "text": "x", "details": "", "completed": false}"#);
        assert!(res.is_err());
        assert!("someday".parse::<Timeframe>().is_err());
        assert_eq!("endofweek".parse::<Timeframe>(), Ok(Timeframe::EndOfWeek));
        assert_eq!("today".parse::<Timeframe>(), Ok(Timeframe::Today));
    }

    #[test]
    fn visibility_rule() {
        let mut today = Task::new(1, "a".to_string(), None, Timeframe::Today);
        let mut week = Task::new(2, "b".to_string(), None, Timeframe::EndOfWeek);
        today.toggle_completion();
        assert!(today.is_visible_in(Timeframe::Today));
        assert!(today.is_visible_in(Timeframe::EndOfWeek) == false);

        assert!(week.is_visible_in(Timeframe::EndOfWeek));
        week.toggle_completion();
        assert!(week.is_visible_in(Timeframe::EndOfWeek) == false);
    }
}
