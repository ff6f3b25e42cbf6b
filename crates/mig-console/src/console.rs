//! Top-level `mig>` prompt.
//!
//! Dispatches to the action reader and the command reader. A failed
//! sub-session is reported and the prompt stays open.

use std::io::Write;

use mig_client::MigClient;
use tracing::warn;

use crate::action::ActionSession;
use crate::command::CommandReader;
use crate::error::Result;
use crate::line::LineSource;
use crate::order::{help_text, parse_line, OrderSpec, ParsedLine};

pub const PROMPT: &str = "mig> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellOrder {
    Action,
    Command,
    Exit,
    Help,
}

pub const SHELL_ORDERS: &[OrderSpec<ShellOrder>] = &[
    OrderSpec {
        word: "action",
        order: ShellOrder::Action,
        usage: "action <id>",
        summary: "enter action reader mode for action <id>",
    },
    OrderSpec {
        word: "command",
        order: ShellOrder::Command,
        usage: "command <id>",
        summary: "enter command reader mode for command <id>",
    },
    OrderSpec {
        word: "exit",
        order: ShellOrder::Exit,
        usage: "exit",
        summary: "leave the console",
    },
    OrderSpec {
        word: "help",
        order: ShellOrder::Help,
        usage: "help",
        summary: "show this help",
    },
];

/// Run the top-level prompt until `exit` or end of input.
pub async fn run_shell(
    client: &MigClient,
    lines: &mut dyn LineSource,
    commands: &dyn CommandReader,
    out: &mut (dyn Write + Send),
) -> Result<()> {
    writeln!(
        out,
        "MIG console. Type help for the list of orders, exit or ctrl+d to leave."
    )?;
    loop {
        let line = match lines.read_line(PROMPT) {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                break;
            }
        };

        let outcome = match parse_line(SHELL_ORDERS, &line) {
            ParsedLine::Empty => continue,
            ParsedLine::Unknown(word) => {
                writeln!(out, "Unknown order '{word}'. Try `help`.")?;
                Ok(())
            }
            ParsedLine::Known { order, .. } => match order {
                ShellOrder::Exit => break,
                ShellOrder::Help => {
                    out.write_all(help_text(SHELL_ORDERS).as_bytes())?;
                    Ok(())
                }
                ShellOrder::Action => enter_action(client, &line, lines, commands, out).await,
                ShellOrder::Command => commands.enter(&line, client, out).await,
            },
        };
        if let Err(e) = outcome {
            warn!(error = %e, "sub-session failed");
            writeln!(out, "error: {e}")?;
        }
        lines.add_history(&line);
    }
    writeln!(out)?;
    Ok(())
}

async fn enter_action(
    client: &MigClient,
    line: &str,
    lines: &mut dyn LineSource,
    commands: &dyn CommandReader,
    out: &mut (dyn Write + Send),
) -> Result<()> {
    let mut session = ActionSession::from_order_line(client.clone(), line).await?;
    session.run(lines, commands, out).await
}
