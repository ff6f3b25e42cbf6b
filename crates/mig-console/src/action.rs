//! Action reader: an interactive session over one action record.
//!
//! The session owns the current [`ActionRecord`] and reads orders from a
//! [`LineSource`] until `exit` or end of input. Collaborator failures
//! (refresh, search, command sub-session) end the whole session and come
//! back tagged with the failing [`Operation`]; unknown orders only print a
//! message.

use std::io::Write;

use mig_client::{ActionRecord, MigClient};
use tracing::{info, warn};

use crate::aggregate::{found_report, latest_command_per_agent};
use crate::command::CommandReader;
use crate::error::{ConsoleError, Operation, OperationContext, Result};
use crate::line::LineSource;
use crate::order::{help_text, parse_line, Order, ParsedLine, ACTION_ORDERS};
use crate::render::{self, JsonStyle};

pub const PROMPT: &str = "action> ";

/// What the loop does after an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct ActionSession {
    client: MigClient,
    action_id: u64,
    current: ActionRecord,
}

impl ActionSession {
    /// Load action `action_id` and build a session around it.
    pub async fn open(client: MigClient, action_id: u64) -> Result<Self> {
        let current = client
            .fetch_action(action_id)
            .await
            .during(Operation::GetAction)?;
        info!(action_id, name = %current.name, "action loaded");
        Ok(ActionSession {
            client,
            action_id,
            current,
        })
    }

    /// Open a session from an `action <id>` line.
    pub async fn from_order_line(client: MigClient, line: &str) -> Result<Self> {
        let action_id = parse_action_id(line)?;
        Self::open(client, action_id).await
    }

    pub fn current(&self) -> &ActionRecord {
        &self.current
    }

    pub fn action_id(&self) -> u64 {
        self.action_id
    }

    /// Print the banner and process orders until `exit` or end of input.
    pub async fn run(
        &mut self,
        lines: &mut dyn LineSource,
        commands: &dyn CommandReader,
        out: &mut (dyn Write + Send),
    ) -> Result<()> {
        out.write_all(render::banner(&self.current).as_bytes())?;
        loop {
            let line = match lines.read_line(PROMPT) {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    writeln!(out, "error: {e}")?;
                    break;
                }
            };

            let flow = match self.handle_line(&line, commands, out).await {
                Ok(flow) => flow,
                Err(e) => {
                    warn!(action_id = self.action_id, error = %e, "action reader aborted");
                    return Err(e);
                }
            };
            if flow == Flow::Exit {
                break;
            }
            if !line.trim().is_empty() {
                lines.add_history(&line);
            }
        }
        writeln!(out)?;
        info!(action_id = self.action_id, "left action reader");
        Ok(())
    }

    /// Parse and execute one line.
    pub async fn handle_line(
        &mut self,
        line: &str,
        commands: &dyn CommandReader,
        out: &mut (dyn Write + Send),
    ) -> Result<Flow> {
        match parse_line(ACTION_ORDERS, line) {
            ParsedLine::Empty => Ok(Flow::Continue),
            ParsedLine::Unknown(word) => {
                writeln!(
                    out,
                    "Unknown order '{word}'. You are in action reader mode. Try `help`."
                )?;
                Ok(Flow::Continue)
            }
            ParsedLine::Known { order, args } => {
                self.dispatch(order, &args, line, commands, out).await
            }
        }
    }

    async fn dispatch(
        &mut self,
        order: Order,
        args: &[&str],
        line: &str,
        commands: &dyn CommandReader,
        out: &mut (dyn Write + Send),
    ) -> Result<Flow> {
        match order {
            Order::Command => commands
                .enter(line, &self.client, out)
                .await
                .during(Operation::CommandReader)?,
            Order::Counters => out.write_all(render::counters(&self.current.counters).as_bytes())?,
            Order::Exit => return Ok(Flow::Exit),
            Order::FoundSomething => self.found_anything(true, out).await?,
            Order::FoundNothing => self.found_anything(false, out).await?,
            Order::Help => out.write_all(help_text(ACTION_ORDERS).as_bytes())?,
            Order::Investigators => out.write_all(render::investigators(&self.current).as_bytes())?,
            Order::Json => self.print_json(args.first().copied(), out)?,
            Order::Meta => out.write_all(render::meta(&self.current).as_bytes())?,
            Order::Refresh => self.refresh(out).await?,
            Order::Times => out.write_all(render::times(&self.current).as_bytes())?,
        }
        Ok(Flow::Continue)
    }

    /// Re-fetch the action by the id the session was opened with.
    pub async fn refresh(&mut self, out: &mut (dyn Write + Send)) -> Result<()> {
        self.current = self
            .client
            .fetch_action(self.action_id)
            .await
            .during(Operation::GetAction)?;
        info!(action_id = self.action_id, status = %self.current.status, "action reloaded");
        writeln!(out, "Reload succeeded")?;
        Ok(())
    }

    /// List one command per agent among those that did (or did not) find something.
    pub async fn found_anything(
        &self,
        want_found: bool,
        out: &mut (dyn Write + Send),
    ) -> Result<()> {
        let results = self
            .client
            .search_commands(self.current.id, want_found)
            .await
            .during(Operation::SearchFoundAnything)?;
        let agents = latest_command_per_agent(results);
        out.write_all(found_report(&agents, want_found).as_bytes())?;
        Ok(())
    }

    fn print_json(&self, option: Option<&str>, out: &mut (dyn Write + Send)) -> Result<()> {
        match JsonStyle::from_option(option) {
            Ok(style) => {
                let text = render::json(&self.current, style).map_err(std::io::Error::from)?;
                writeln!(out, "{text}")?;
            }
            Err(unknown) => writeln!(out, "Unknown option '{unknown}'")?,
        }
        Ok(())
    }
}

/// Action id from an `action <id>` line.
pub fn parse_action_id(line: &str) -> Result<u64> {
    let raw = line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| ConsoleError::Usage("must be 'action <actionid>'".to_string()))?;
    raw.parse()
        .map_err(|_| ConsoleError::Usage(format!("action id must be numeric, got '{raw}'")))
}
