//! checkoff: keep a to-do list in `tasks.txt` from the terminal.
//!
//! Each subcommand is one user action against the list. `checkoff shell`
//! keeps the list open and takes actions line by line.
//!
use std::io::{self, prelude::*};

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

use checkoff::app::{parse_position, parse_shell_line, render_list, ShellLine, SHELL_HELP};
use checkoff::flatfile::TASKS_FILE;
use checkoff::logging;
use checkoff::{Cmd, Frontend, Outcome, Pattern, Session, TaskError, TaskList};

/// Talks to the user over stdin/stdout/stderr.
#[derive(Default)]
struct Terminal;

impl Frontend for Terminal {
    fn warn(&mut self, err: &TaskError) {
        eprintln!("warning: {}", err);
    }
    fn confirm(&mut self, question: &str) -> bool {
        eprint!("{} [y/N] ", question);
        io::stderr().flush().ok();
        let mut answer = String::new();
        match io::stdin().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
    fn show(&mut self, view: &str) {
        print!("{}", view);
    }
    fn changed(&mut self, tasks: &TaskList) {
        print!("{}", render_list(tasks));
    }
}

fn cli() -> App<'static, 'static> {
    let position = Arg::with_name("N")
        .help("Task number as shown by `list`")
        .index(1);
    App::new("checkoff")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Simon Janes <spjanes@protonmail.com>")
        .about("A to-do list kept in ./tasks.txt")
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log more (repeat for more detail)"),
        )
        .subcommand(SubCommand::with_name("list").about("Show all tasks"))
        .subcommand(
            SubCommand::with_name("add").about("Add a task").arg(
                Arg::with_name("TEXT")
                    .help("Task text")
                    .multiple(true)
                    .index(1),
            ),
        )
        .subcommand(
            SubCommand::with_name("edit")
                .about("Replace the text of a task")
                .arg(position.clone())
                .arg(
                    Arg::with_name("TEXT")
                        .help("New task text")
                        .multiple(true)
                        .index(2),
                ),
        )
        .subcommand(
            SubCommand::with_name("delete")
                .about("Delete a task")
                .arg(position.clone()),
        )
        .subcommand(
            SubCommand::with_name("toggle")
                .visible_alias("complete")
                .about("Mark a task complete, or pending again")
                .arg(position),
        )
        .subcommand(
            SubCommand::with_name("clear").about("Delete every task").arg(
                Arg::with_name("yes")
                    .short("y")
                    .long("yes")
                    .help("Do not ask for confirmation"),
            ),
        )
        .subcommand(
            SubCommand::with_name("find")
                .about("Show tasks matching a keyword")
                .arg(
                    Arg::with_name("regex")
                        .short("r")
                        .long("regex")
                        .help("Treat the pattern as a regular expression"),
                )
                .arg(
                    Arg::with_name("PATTERN")
                        .help("Keyword or regex")
                        .multiple(true)
                        .index(1),
                ),
        )
        .subcommand(SubCommand::with_name("export").about("Print the list as YAML"))
        .subcommand(SubCommand::with_name("shell").about("Edit the list interactively"))
}

fn joined(args: &ArgMatches, name: &str) -> String {
    args.values_of(name)
        .map(|words| words.collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

fn position_arg(args: &ArgMatches) -> Result<Option<usize>, TaskError> {
    args.value_of("N").map(parse_position).transpose()
}

fn command_for(matches: &ArgMatches) -> Result<Cmd, TaskError> {
    let cmd = match matches.subcommand() {
        ("add", Some(args)) => Cmd::Add(joined(args, "TEXT")),
        ("edit", Some(args)) => Cmd::Edit(position_arg(args)?, joined(args, "TEXT")),
        ("delete", Some(args)) => Cmd::Delete(position_arg(args)?),
        ("toggle", Some(args)) => Cmd::Toggle(position_arg(args)?),
        ("clear", Some(args)) => Cmd::Clear {
            confirmed: args.is_present("yes"),
        },
        ("find", Some(args)) => {
            let needle = joined(args, "PATTERN");
            if args.is_present("regex") {
                Cmd::Find(Pattern::Regex(needle))
            } else {
                Cmd::Find(Pattern::Keyword(needle))
            }
        }
        _ => Cmd::List,
    };
    Ok(cmd)
}

/// Rejected actions exit 1; everything else, a declined prompt included, exits 0.
fn exit_status(outcome: Outcome) -> i32 {
    match outcome {
        Outcome::Rejected => 1,
        Outcome::Saved | Outcome::Cancelled | Outcome::Displayed => 0,
    }
}

fn run_shell(session: &mut Session<Terminal>) -> anyhow::Result<()> {
    print!("{}", render_list(session.tasks()));
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match parse_shell_line(&line) {
            Ok(ShellLine::Cmd(cmd)) => {
                session.dispatch(cmd)?;
            }
            Ok(ShellLine::Help) => print!("{}", SHELL_HELP),
            Ok(ShellLine::Quit) => break,
            Ok(ShellLine::Empty) => {}
            Err(err) => session.frontend_mut().warn(&err),
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    let level = logging::level_for_verbosity(matches.occurrences_of("verbose"));
    let _logger = logging::init_logging(level).map_err(anyhow::Error::msg)?;

    let mut session = Session::open(TASKS_FILE, Terminal::default())?;
    match matches.subcommand_name() {
        Some("shell") => return run_shell(&mut session),
        Some("export") => {
            print!("{}", session.tasks().to_yaml()?);
            return Ok(());
        }
        _ => {}
    }

    let outcome = match command_for(&matches) {
        Ok(cmd) => session.dispatch(cmd)?,
        Err(err) => {
            session.frontend_mut().warn(&err);
            Outcome::Rejected
        }
    };
    match exit_status(outcome) {
        0 => Ok(()),
        code => std::process::exit(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cmd, TaskError> {
        let matches = cli().get_matches_from_safe(args.iter().copied()).unwrap();
        command_for(&matches)
    }

    #[test]
    fn no_subcommand_lists() {
        assert_eq!(parse(&["checkoff"]), Ok(Cmd::List));
        assert_eq!(parse(&["checkoff", "list"]), Ok(Cmd::List));
    }

    #[test]
    fn add_joins_words() {
        assert_eq!(
            parse(&["checkoff", "add", "Buy", "oat", "milk"]),
            Ok(Cmd::Add("Buy oat milk".into()))
        );
        assert_eq!(parse(&["checkoff", "add"]), Ok(Cmd::Add("".into())));
    }

    #[test]
    fn numbers_are_one_based_and_optional() {
        assert_eq!(
            parse(&["checkoff", "edit", "2", "Call", "Alice"]),
            Ok(Cmd::Edit(Some(1), "Call Alice".into()))
        );
        assert_eq!(parse(&["checkoff", "delete"]), Ok(Cmd::Delete(None)));
        assert_eq!(
            parse(&["checkoff", "delete", "3"]),
            Ok(Cmd::Delete(Some(2)))
        );
        assert_eq!(
            parse(&["checkoff", "edit", "x", "text"]),
            Err(TaskError::InvalidPosition("x".into()))
        );
        assert_eq!(
            parse(&["checkoff", "toggle", "0"]),
            Err(TaskError::InvalidPosition("0".into()))
        );
    }

    #[test]
    fn complete_is_an_alias_for_toggle() {
        assert_eq!(
            parse(&["checkoff", "complete", "1"]),
            Ok(Cmd::Toggle(Some(0)))
        );
        assert_eq!(parse(&["checkoff", "toggle", "1"]), Ok(Cmd::Toggle(Some(0))));
    }

    #[test]
    fn clear_asks_unless_yes() {
        assert_eq!(
            parse(&["checkoff", "clear"]),
            Ok(Cmd::Clear { confirmed: false })
        );
        assert_eq!(
            parse(&["checkoff", "clear", "-y"]),
            Ok(Cmd::Clear { confirmed: true })
        );
        assert_eq!(
            parse(&["checkoff", "clear", "--yes"]),
            Ok(Cmd::Clear { confirmed: true })
        );
    }

    #[test]
    fn find_picks_pattern_kind() {
        assert_eq!(
            parse(&["checkoff", "find", "oat", "milk"]),
            Ok(Cmd::Find(Pattern::Keyword("oat milk".into())))
        );
        assert_eq!(
            parse(&["checkoff", "find", "--regex", "^Call"]),
            Ok(Cmd::Find(Pattern::Regex("^Call".into())))
        );
    }

    #[test]
    fn verbose_flag_counts() {
        let matches = cli()
            .get_matches_from_safe(vec!["checkoff", "-vv", "list"])
            .unwrap();
        assert_eq!(matches.occurrences_of("verbose"), 2);
        assert_eq!(matches.subcommand_name(), Some("list"));
    }

    #[test]
    fn only_rejections_fail_the_process() {
        assert_eq!(exit_status(Outcome::Rejected), 1);
        assert_eq!(exit_status(Outcome::Cancelled), 0);
        assert_eq!(exit_status(Outcome::Saved), 0);
        assert_eq!(exit_status(Outcome::Displayed), 0);
    }
}
