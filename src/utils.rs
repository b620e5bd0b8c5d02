//! Some utility functions

use std::fmt::Write;

use crate::list::TaskList;
use crate::state::AppState;
use crate::task::{Task, Timeframe};

/// Format a single task, as one line
pub fn format_task(task: &Task) -> String {
    let completion = if task.completed() { "✓" } else { " " };
    let mut line = format!("[{}] {:>4}  {}", completion, task.id(), task.text());
    if task.details().is_empty() == false {
        let _ = write!(line, " ({})", task.details());
    }
    line
}

/// Format the dashboard: every visible task, grouped by timeframe
pub fn format_dashboard(state: &AppState) -> String {
    let mut out = String::new();
    for timeframe in Timeframe::ALL.iter() {
        let _ = writeln!(out, "{}", timeframe.title());
        let tasks = state.tasks_in(*timeframe);
        if tasks.is_empty() {
            let _ = writeln!(out, "    (nothing)");
        }
        for task in tasks {
            let _ = writeln!(out, "    {}", format_task(task));
        }
    }
    out
}

/// Format lists, with the tasks they contain
pub fn format_lists(lists: &[TaskList], all_tasks: &[Task]) -> String {
    let mut out = String::new();
    for list in lists {
        let _ = writeln!(out, "{} [{}]", list.name(), list.symbol().name);
        for task in list.tasks(all_tasks) {
            let _ = writeln!(out, "    {}", format_task(task));
        }
    }
    out
}

/// A debug utility that pretty-prints the dashboard
pub fn print_dashboard(state: &AppState) {
    print!("{}", format_dashboard(state));
}
