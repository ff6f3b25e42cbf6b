//! Command reader: the sub-session reached through the `command` order.

use std::io::Write;

use async_trait::async_trait;
use mig_client::{CommandResult, MigClient};

use crate::error::{ConsoleError, Operation, OperationContext, Result};

#[async_trait]
pub trait CommandReader: Send + Sync {
    /// Handle a full `command <id>` line.
    async fn enter(
        &self,
        line: &str,
        client: &MigClient,
        out: &mut (dyn Write + Send),
    ) -> Result<()>;
}

/// Fetches the command and prints a short summary of it.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandInspector;

/// Command id from a `command <id>` line.
pub fn parse_command_id(line: &str) -> Result<u64> {
    let raw = line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| ConsoleError::Usage("must be 'command <commandid>'".to_string()))?;
    raw.parse()
        .map_err(|_| ConsoleError::Usage(format!("command id must be numeric, got '{raw}'")))
}

pub fn summary(cmd: &CommandResult) -> String {
    format!(
        "Command {} ran by agent '{}' [{}]\nAction {} named '{}'\nStatus '{}'\n",
        cmd.id, cmd.agent.name, cmd.agent.id, cmd.action.id, cmd.action.name, cmd.status
    )
}

#[async_trait]
impl CommandReader for CommandInspector {
    async fn enter(
        &self,
        line: &str,
        client: &MigClient,
        out: &mut (dyn Write + Send),
    ) -> Result<()> {
        let command_id = parse_command_id(line)?;
        let cmd = client
            .fetch_command(command_id)
            .await
            .during(Operation::GetCommand)?;
        tracing::debug!(command_id, agent = %cmd.agent.name, "fetched command");
        out.write_all(summary(&cmd).as_bytes())?;
        Ok(())
    }
}
