//! The session loop: render, read a command, act, re-render on change.

use super::commands::{SessionCommand, SessionLine};
use crate::error::TrackerError;
use crate::render;
use crate::session::{Action, Column, Session};
use clap::{CommandFactory, Parser};
use colored::*;
use log::{debug, info};
use std::io::{self, BufRead, Write};

/// Split a command line into words. Single or double quotes group words.
pub fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("unterminated {} quote", q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// What the loop should do after one line.
enum Step {
    Continue,
    Quit,
}

/// Print the whole screen: activity log and dashboard.
fn render_screen<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    let display = &session.config().display;
    write!(out, "{}", render::screen(session.records(), &session.statistics(), display))
}

fn report_error<W: Write>(err: &TrackerError, out: &mut W) -> io::Result<()> {
    match err {
        TrackerError::Validation(warning) => writeln!(out, "{}", warning.to_string().yellow()),
        other => writeln!(out, "{}", other.to_string().red()),
    }
}

fn handle_line<W: Write>(session: &mut Session, line: &str, out: &mut W) -> io::Result<Step> {
    let words = match split_line(line) {
        Ok(words) => words,
        Err(e) => {
            writeln!(out, "{}", e.red())?;
            return Ok(Step::Continue);
        }
    };
    if words.is_empty() {
        return Ok(Step::Continue);
    }

    let command = match SessionLine::try_parse_from(&words) {
        Ok(parsed) => parsed.command,
        Err(e) => {
            write!(out, "{}", e)?;
            return Ok(Step::Continue);
        }
    };
    debug!("Session command: {:?}", command);

    let action = match command {
        SessionCommand::Quit => return Ok(Step::Quit),
        SessionCommand::Help => {
            write!(out, "{}", SessionLine::command().render_help())?;
            return Ok(Step::Continue);
        }
        SessionCommand::List => {
            write!(
                out,
                "{}",
                render::activity_log(session.records(), &session.config().display)
            )?;
            return Ok(Step::Continue);
        }
        SessionCommand::Stats { json } => {
            let stats = session.statistics();
            if json {
                match serde_json::to_string_pretty(&stats) {
                    Ok(text) => writeln!(out, "{}", text)?,
                    Err(e) => writeln!(out, "{}", e.to_string().red())?,
                }
            } else {
                write!(out, "{}", render::dashboard(&stats, &session.config().display))?;
            }
            return Ok(Step::Continue);
        }
        SessionCommand::Categories => {
            write!(out, "{}", render::categories(session.categories()))?;
            return Ok(Step::Continue);
        }
        SessionCommand::Add {
            category,
            description,
            custom,
            priority,
        } => Action::Add(session.new_form(&category, &description, custom, priority)),
        SessionCommand::Import { file } => Action::Import(file),
        SessionCommand::Export { file } => Action::Export(file),
        SessionCommand::Apply { file } => Action::Apply(file),
        SessionCommand::Reset => Action::Reset,
        SessionCommand::Edit { id, column, value } => match column.parse::<Column>() {
            Ok(column) => Action::Edit { id, column, value },
            Err(warning) => {
                report_error(&TrackerError::from(warning), out)?;
                return Ok(Step::Continue);
            }
        },
    };

    match session.apply(action) {
        Ok(outcome) => {
            writeln!(out, "{}", outcome.message().green())?;
            if outcome.changed_store() {
                out.write_all(b"\n")?;
                render_screen(session, out)?;
            }
        }
        Err(e) => report_error(&e, out)?,
    }
    Ok(Step::Continue)
}

/// Run a session until `quit` or end of input.
///
/// Renders once up front, then re-renders after every action that changed
/// the store.
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, out: &mut W, prompt: bool) -> io::Result<()> {
    write!(out, "{}", render::header())?;
    out.write_all(b"\n")?;
    render_screen(session, out)?;

    let mut lines = input.lines();
    loop {
        if prompt {
            write!(out, "{} ", ">".cyan().bold())?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        if let Step::Quit = handle_line(session, &line?, out)? {
            break;
        }
    }

    info!("Session loop finished");
    Ok(())
}
