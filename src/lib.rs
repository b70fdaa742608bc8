//! checkoff is a small local-first to-do list
//!
//! - tasks are short lines of text with a done flag
//! - the list is kept in `tasks.txt`, one `text|True` / `text|False` line per task,
//!   rewritten after every change
//! - the application is a Larch program: a pure `update` over the owned task list
//!   returning one effect (persist, warn, confirm, show) for the `Session` to carry out
//!
pub mod app;
pub mod flatfile;
pub mod larch;
pub mod logging;
pub mod pattern;
pub mod store;
pub mod task;

pub use app::{Cmd, Effect, Frontend, Outcome, Session, TodoApp};
pub use pattern::Pattern;
pub use store::TaskList;
pub use task::{Action, Task, TaskError};
