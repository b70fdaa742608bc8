//! The tasks file: one `text|True` or `text|False` line per task.
//!
//! There is no escaping, so task text may not contain the delimiter or a
//! line break (enforced by [`Task::new`]).

use std::fs::File;
use std::io::{self, prelude::*, BufReader, BufWriter};
use std::path::Path;

use log::{debug, info, warn};
use thiserror::Error;

use crate::store::TaskList;
use crate::task::{Task, TaskError, DELIMITER};

/// Where the task list lives, relative to the working directory.
pub const TASKS_FILE: &str = "tasks.txt";

const TRUE: &str = "True";
const FALSE: &str = "False";

/// Why a stored line could not be turned back into a task.
#[derive(Debug, Eq, PartialEq, Error)]
pub enum MalformedLine {
    #[error("missing `{}` delimiter", DELIMITER)]
    MissingDelimiter,
    #[error("empty task text")]
    EmptyText,
    #[error("task text contains {0:?}")]
    ForbiddenChar(char),
    #[error("not valid UTF-8")]
    InvalidUtf8,
}

pub fn format_line(task: &Task) -> String {
    format!(
        "{}{}{}",
        task.text(),
        DELIMITER,
        if task.completed { TRUE } else { FALSE }
    )
}

/// Splits on the first delimiter; the flag is set only by an exact `True`.
pub fn parse_line(line: &str) -> Result<Task, MalformedLine> {
    let (text, flag) = line
        .trim()
        .split_once(DELIMITER)
        .ok_or(MalformedLine::MissingDelimiter)?;
    let mut task = Task::new(text).map_err(|e| match e {
        TaskError::ForbiddenChar(c) => MalformedLine::ForbiddenChar(c),
        _ => MalformedLine::EmptyText,
    })?;
    if flag != TRUE && flag != FALSE {
        debug!(
            "event=load_flag module=flatfile status=unexpected flag={:?}",
            flag
        );
    }
    task.completed = flag == TRUE;
    Ok(task)
}

/// Reads the task list. A missing file is an empty list.
pub fn load(path: &Path) -> io::Result<TaskList> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(
                "event=load module=flatfile status=missing path={}",
                path.display()
            );
            return Ok(TaskList::new());
        }
        Err(e) => return Err(e),
    };
    let reader = BufReader::new(file);
    let mut list = TaskList::new();
    for (number, raw) in reader.split(b'\n').enumerate() {
        let parsed = match String::from_utf8(raw?) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => parse_line(&line),
            Err(_) => Err(MalformedLine::InvalidUtf8),
        };
        match parsed {
            Ok(task) => list.push(task),
            Err(e) => warn!(
                "event=load_skip module=flatfile line={} reason={}",
                number + 1,
                e
            ),
        }
    }
    info!(
        "event=load module=flatfile status=ok path={} tasks={}",
        path.display(),
        list.len()
    );
    Ok(list)
}

/// Overwrites `path` with the whole list.
pub fn save(path: &Path, list: &TaskList) -> io::Result<()> {
    let mut buf = BufWriter::new(File::create(path)?);
    for task in list {
        writeln!(buf, "{}", format_line(task))?;
    }
    buf.flush()?;
    info!(
        "event=save module=flatfile status=ok path={} tasks={}",
        path.display(),
        list.len()
    );
    Ok(())
}
