//! Grouping of command search results by agent.

use std::collections::HashMap;

use mig_client::CommandResult;

/// One command per agent: the last one seen for that agent wins, and agents
/// are listed in the order they first appear in `results`.
pub fn latest_command_per_agent(results: Vec<CommandResult>) -> Vec<CommandResult> {
    let mut agents: Vec<CommandResult> = Vec::new();
    let mut slots: HashMap<u64, usize> = HashMap::new();
    for cmd in results {
        match slots.get(&cmd.agent.id) {
            Some(&slot) => agents[slot] = cmd,
            None => {
                slots.insert(cmd.agent.id, agents.len());
                agents.push(cmd);
            }
        }
    }
    agents
}

pub fn found_report(agents: &[CommandResult], want_found: bool) -> String {
    let mut out = format!(
        "{} agents have found {}\n",
        agents.len(),
        if want_found { "something" } else { "nothing" }
    );
    out.push_str("---- Command ID ----\t---- Agent Name & ID----\n");
    for cmd in agents {
        out.push_str(&format!(
            "{}\t{} [{}]\n",
            cmd.id, cmd.agent.name, cmd.agent.id
        ));
    }
    out
}
