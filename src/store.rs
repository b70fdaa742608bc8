//! The in-memory task list.
//!
//! Indices are 0-based positions. Operations that target a task take an
//! `Option<usize>`: `None` means nothing is selected. A failed operation
//! leaves the list untouched.

use serde::Serialize;

use crate::pattern::{Matchable, Pattern};
use crate::task::{Action, Task, TaskError};

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct TaskList {
    tasks: Vec<Task>,
}
impl TaskList {
    pub fn new() -> TaskList {
        TaskList { tasks: vec![] }
    }
    pub fn len(&self) -> usize {
        self.tasks.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Appends an already validated task.
    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Appends a pending task and returns its index.
    pub fn append(&mut self, text: &str) -> Result<usize, TaskError> {
        self.tasks.push(Task::new(text)?);
        Ok(self.tasks.len() - 1)
    }

    pub fn remove_at(&mut self, index: Option<usize>) -> Result<Task, TaskError> {
        let index = self.target(index, Action::Delete)?;
        Ok(self.tasks.remove(index))
    }

    /// Flips completion and returns the new state.
    pub fn toggle_at(&mut self, index: Option<usize>) -> Result<bool, TaskError> {
        let index = self.target(index, Action::Complete)?;
        Ok(self.tasks[index].toggle())
    }

    pub fn replace_at(&mut self, index: Option<usize>, text: &str) -> Result<(), TaskError> {
        let index = self.target(index, Action::Edit)?;
        self.tasks[index].set_text(text)
    }

    /// Empties the list and returns how many tasks were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.tasks.len();
        self.tasks.clear();
        dropped
    }

    /// Tasks matching `pattern`, with their indices.
    pub fn find(&self, pattern: &Pattern) -> Result<Vec<(usize, &Task)>, TaskError> {
        let matcher = pattern.compile()?;
        Ok(self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.matches(&matcher))
            .collect())
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    fn target(&self, index: Option<usize>, action: Action) -> Result<usize, TaskError> {
        match index {
            None => Err(TaskError::NoSelection(action)),
            Some(i) if i >= self.tasks.len() => Err(TaskError::OutOfRange {
                position: i.saturating_add(1),
                len: self.tasks.len(),
            }),
            Some(i) => Ok(i),
        }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
