use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Separates the text from the completion flag in the tasks file.
pub const DELIMITER: char = '|';

/// Actions that need a selected task.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Action {
    Edit,
    Delete,
    Complete,
}
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Complete => "mark as complete",
        };
        f.write_str(verb)
    }
}

/// Reasons a single user action is rejected. None of these are fatal: the
/// front end warns and the list stays as it was.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum TaskError {
    #[error("Please enter a task.")]
    EmptyText,
    #[error("Task text cannot contain {0:?}.")]
    ForbiddenChar(char),
    #[error("Please select a task to {0}.")]
    NoSelection(Action),
    #[error("There is no task #{position}; the list has {len}.")]
    OutOfRange { position: usize, len: usize },
    #[error("{0:?} is not a task number.")]
    InvalidPosition(String),
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),
    #[error("Unknown command {0:?}; try `help`.")]
    UnknownCommand(String),
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Task {
    text: String,
    pub completed: bool,
}
impl Task {
    pub fn new(text: &str) -> Result<Task, TaskError> {
        Ok(Task {
            text: clean_text(text)?,
            completed: false,
        })
    }
    pub fn text(&self) -> &str {
        &self.text
    }
    /// Replaces the text, keeping the completion flag.
    pub fn set_text(&mut self, text: &str) -> Result<(), TaskError> {
        self.text = clean_text(text)?;
        Ok(())
    }
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}
impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}",
            if self.completed { "x" } else { " " },
            self.text
        )
    }
}

/// Trims `raw` and checks it can be stored on a single line of the tasks file.
pub fn clean_text(raw: &str) -> Result<String, TaskError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(TaskError::EmptyText);
    }
    if let Some(c) = text
        .chars()
        .find(|c| *c == DELIMITER || *c == '\n' || *c == '\r')
    {
        return Err(TaskError::ForbiddenChar(c));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_and_starts_pending() {
        let task = Task::new("  Buy milk \t").unwrap();
        assert_eq!(task.text(), "Buy milk");
        assert!(!task.completed);
    }

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(Task::new("").unwrap_err(), TaskError::EmptyText);
        assert_eq!(Task::new("   \t ").unwrap_err(), TaskError::EmptyText);
    }

    #[test]
    fn delimiter_and_line_breaks_are_rejected() {
        assert_eq!(
            Task::new("a|b").unwrap_err(),
            TaskError::ForbiddenChar('|')
        );
        assert_eq!(
            Task::new("two\nlines").unwrap_err(),
            TaskError::ForbiddenChar('\n')
        );
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut task = Task::new("x").unwrap();
        assert!(task.toggle());
        assert!(!task.toggle());
        assert!(!task.completed);
    }

    #[test]
    fn set_text_keeps_completion() {
        let mut task = Task::new("old").unwrap();
        task.toggle();
        task.set_text(" new ").unwrap();
        assert_eq!(task.text(), "new");
        assert!(task.completed);
        assert_eq!(task.set_text(" "), Err(TaskError::EmptyText));
        assert_eq!(task.text(), "new");
    }

    #[test]
    fn display_uses_checkbox() {
        let mut task = Task::new("Call Bob").unwrap();
        assert_eq!(task.to_string(), "[ ] Call Bob");
        task.toggle();
        assert_eq!(task.to_string(), "[x] Call Bob");
    }

    #[test]
    fn warnings_read_like_the_dialogs() {
        assert_eq!(
            TaskError::NoSelection(Action::Complete).to_string(),
            "Please select a task to mark as complete."
        );
        assert_eq!(
            TaskError::OutOfRange {
                position: 4,
                len: 2
            }
            .to_string(),
            "There is no task #4; the list has 2."
        );
    }
}
