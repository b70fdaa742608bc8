//! The to-do application as a Larch program, and the [`Session`] runtime
//! that carries out its effects.

use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{debug, info};

use crate::flatfile;
use crate::larch::LarchMinimal;
use crate::pattern::Pattern;
use crate::store::TaskList;
use crate::task::{Task, TaskError};

const CLEAR_QUESTION: &str = "Are you sure you want to clear all tasks?";

pub const SHELL_HELP: &str = "\
commands:
  add <text>         append a task
  edit <n> <text>    replace the text of task n
  delete <n>         remove task n
  toggle <n>         mark task n complete or pending (alias: done)
  clear              remove every task
  list               show all tasks (alias: ls)
  find <keyword>     show tasks containing keyword
  grep <regex>       show tasks matching regex
  help               this text
  quit               leave (alias: exit)
";

/// Indices are 0-based; `None` means no task was selected.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Cmd {
    Add(String),
    Edit(Option<usize>, String),
    Delete(Option<usize>),
    Toggle(Option<usize>),
    Clear { confirmed: bool },
    List,
    Find(Pattern),
}

#[derive(Debug, Eq, PartialEq)]
pub enum Effect {
    /// The model changed and must be written out.
    Persist,
    Warn(TaskError),
    /// Ask first; run `then` on yes.
    Confirm { question: &'static str, then: Cmd },
    Show(String),
}

pub struct Flags {
    pub path: PathBuf,
}

pub struct TodoApp;

impl LarchMinimal for TodoApp {
    type Flags = Flags;
    type Model = TaskList;
    type Msg = Cmd;
    type Effect = Effect;
    type View = String;

    fn init(flags: Self::Flags) -> Result<Self::Model, anyhow::Error> {
        flatfile::load(&flags.path)
            .with_context(|| format!("failed to load tasks from {}", flags.path.display()))
    }

    fn update(cmd: Self::Msg, mut model: Self::Model) -> (Self::Model, Self::Effect) {
        let result = match cmd {
            Cmd::Add(text) => model.append(&text).map(|_| ()),
            Cmd::Edit(index, text) => model.replace_at(index, &text),
            Cmd::Delete(index) => model.remove_at(index).map(|_| ()),
            Cmd::Toggle(index) => model.toggle_at(index).map(|_| ()),
            Cmd::Clear { confirmed: false } => {
                let effect = Effect::Confirm {
                    question: CLEAR_QUESTION,
                    then: Cmd::Clear { confirmed: true },
                };
                return (model, effect);
            }
            Cmd::Clear { confirmed: true } => {
                model.clear();
                Ok(())
            }
            Cmd::List => {
                let view = Self::view(&model);
                return (model, Effect::Show(view));
            }
            Cmd::Find(pattern) => {
                let found = model.find(&pattern).map(render_rows);
                let effect = match found {
                    Ok(view) => Effect::Show(view),
                    Err(e) => Effect::Warn(e),
                };
                return (model, effect);
            }
        };
        let effect = match result {
            Ok(()) => Effect::Persist,
            Err(e) => Effect::Warn(e),
        };
        (model, effect)
    }

    fn view(model: &Self::Model) -> Self::View {
        render_list(model)
    }
}

pub fn render_list(list: &TaskList) -> String {
    render_rows(list.iter().enumerate())
}

fn render_rows<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = (usize, &'a Task)>,
{
    let mut out = String::from("");
    for (index, task) in rows {
        out.push_str(&format!("{:>3}. {}\n", index + 1, task));
    }
    if out.is_empty() {
        out.push_str("No tasks.\n");
    }
    out
}

/// Turns a 1-based task number typed by the user into an index.
pub fn parse_position(raw: &str) -> Result<usize, TaskError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(TaskError::InvalidPosition(raw.to_string())),
    }
}

fn optional_position(raw: &str) -> Result<Option<usize>, TaskError> {
    if raw.is_empty() {
        Ok(None)
    } else {
        parse_position(raw).map(Some)
    }
}

/// One line typed into the interactive shell.
#[derive(Debug, Eq, PartialEq)]
pub enum ShellLine {
    Cmd(Cmd),
    Help,
    Quit,
    Empty,
}

pub fn parse_shell_line(line: &str) -> Result<ShellLine, TaskError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let cmd = match verb {
        "" => return Ok(ShellLine::Empty),
        "help" | "?" => return Ok(ShellLine::Help),
        "quit" | "exit" => return Ok(ShellLine::Quit),
        "add" => Cmd::Add(rest.to_string()),
        "edit" => {
            let (position, text) = match rest.split_once(char::is_whitespace) {
                Some((position, text)) => (position, text),
                None => (rest, ""),
            };
            Cmd::Edit(optional_position(position)?, text.to_string())
        }
        "delete" | "rm" => Cmd::Delete(optional_position(rest)?),
        "toggle" | "done" => Cmd::Toggle(optional_position(rest)?),
        "clear" => Cmd::Clear { confirmed: false },
        "list" | "ls" => Cmd::List,
        "find" => Cmd::Find(Pattern::Keyword(rest.to_string())),
        "grep" => Cmd::Find(Pattern::Regex(rest.to_string())),
        other => return Err(TaskError::UnknownCommand(other.to_string())),
    };
    Ok(ShellLine::Cmd(cmd))
}

/// Where warnings, prompts and listings go.
pub trait Frontend {
    fn warn(&mut self, err: &TaskError);
    fn confirm(&mut self, question: &str) -> bool;
    fn show(&mut self, view: &str);
    /// Called after a change has been saved.
    fn changed(&mut self, _tasks: &TaskList) {}
}

/// How a dispatched command ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Outcome {
    Saved,
    Rejected,
    Cancelled,
    Displayed,
}

/// Owns the task list, writes it back after every change, and routes
/// everything user-facing through a [`Frontend`].
pub struct Session<F: Frontend> {
    path: PathBuf,
    tasks: TaskList,
    frontend: F,
}

impl<F: Frontend> Session<F> {
    pub fn open<P: Into<PathBuf>>(path: P, frontend: F) -> anyhow::Result<Session<F>> {
        let path = path.into();
        let tasks = TodoApp::init(Flags { path: path.clone() })?;
        Ok(Session {
            path,
            tasks,
            frontend,
        })
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    pub fn frontend(&self) -> &F {
        &self.frontend
    }
    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    pub fn dispatch(&mut self, cmd: Cmd) -> anyhow::Result<Outcome> {
        let mut cmd = cmd;
        loop {
            debug!("event=dispatch module=app cmd={:?}", cmd);
            let model = std::mem::take(&mut self.tasks);
            let (model, effect) = TodoApp::update(cmd, model);
            self.tasks = model;
            match effect {
                Effect::Persist => {
                    flatfile::save(&self.path, &self.tasks).with_context(|| {
                        format!("failed to save tasks to {}", self.path.display())
                    })?;
                    self.frontend.changed(&self.tasks);
                    return Ok(Outcome::Saved);
                }
                Effect::Warn(err) => {
                    info!("event=rejected module=app reason={:?}", err);
                    self.frontend.warn(&err);
                    return Ok(Outcome::Rejected);
                }
                Effect::Confirm { question, then } => {
                    if !self.frontend.confirm(question) {
                        info!("event=cancelled module=app");
                        return Ok(Outcome::Cancelled);
                    }
                    cmd = then;
                }
                Effect::Show(view) => {
                    self.frontend.show(&view);
                    return Ok(Outcome::Displayed);
                }
            }
        }
    }
}
