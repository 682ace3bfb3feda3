//! Line-oriented interactive loop.
//!
//! A plain line is submitted as the query. Lines starting with `:` are
//! commands: `:history` / `:h` lists recent lookups, `:N` re-runs history
//! entry N, `:help` shows usage, and `:quit` / `:q` (or end of input) exits.

use std::io::Write;

use colored::*;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::session::{is_plausible_address, SessionController, SubmitOutcome};

use super::render::{render_history, render_state};

const HELP: &str = "\
Enter an IPv4 or IPv6 address (e.g. 23.90.66.53) to look it up.
  :history, :h   list recent lookups
  :N             look up history entry N again
  :help          show this message
  :quit, :q      exit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit the line as the query
    Submit(String),
    /// List recent lookups
    ShowHistory,
    /// Re-run the history entry at this 1-based position
    Select(usize),
    /// Show usage
    Help,
    /// Leave the loop
    Quit,
    /// A `:` command that is not recognized
    Unknown(String),
}

/// Parses one input line.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix(':') else {
        return Command::Submit(line.to_string());
    };

    match rest.trim() {
        "history" | "h" => Command::ShowHistory,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => match other.parse::<usize>() {
            Ok(n) if n > 0 => Command::Select(n),
            _ => Command::Unknown(trimmed.to_string()),
        },
    }
}

fn prompt<W: Write>(out: &mut W) -> std::io::Result<()> {
    write!(out, "{} ", "ip>".blue().bold())?;
    out.flush()
}

fn report<W: Write>(
    session: &SessionController,
    out: &mut W,
    outcome: SubmitOutcome,
) -> std::io::Result<()> {
    match outcome {
        SubmitOutcome::Ignored => Ok(()),
        SubmitOutcome::Busy => writeln!(out, "{}", "A lookup is already running.".yellow()),
        _ => write!(out, "{}", render_state(&session.state())),
    }
}

/// Runs the interactive loop until `:quit` or end of input.
///
/// Output goes to `out`; logging stays on stderr.
pub async fn run_repl<R, W>(
    session: &SessionController,
    input: R,
    out: &mut W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", HELP.dimmed())?;
    let mut lines = input.lines();

    loop {
        prompt(out)?;
        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::ShowHistory => write!(out, "{}", render_history(&session.history()))?,
            Command::Unknown(cmd) => {
                writeln!(out, "{} {} (try :help)", "Unknown command".yellow(), cmd)?
            }
            Command::Submit(query) => {
                if is_plausible_address(query.trim()) {
                    writeln!(out, "{}", "Querying global registries...".dimmed())?;
                }
                session.set_query(query);
                let outcome = session.submit().await;
                report(session, out, outcome)?;
            }
            Command::Select(n) => {
                let history = session.history();
                match history.get(n - 1) {
                    Some(entry) => {
                        writeln!(out, "{} {}", "Looking up".dimmed(), entry.ip)?;
                        let outcome = session.select_history(&entry.ip).await;
                        report(session, out, outcome)?;
                    }
                    None => writeln!(
                        out,
                        "{} {} (history has {})",
                        "No history entry".yellow(),
                        n,
                        history.len()
                    )?,
                }
            }
        }
    }

    Ok(())
}
