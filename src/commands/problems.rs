use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::render::format_problems;
use crate::spinner::spin_while;

pub struct ProblemsCommand;

#[async_trait]
impl Command for ProblemsCommand {
    fn name(&self) -> &str {
        "/problems"
    }

    fn aliases(&self) -> &[&str] {
        &["/list"]
    }

    fn description(&self) -> &str {
        "list your submitted problems"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        // On failure the status line says why; the REPL prints it.
        if let Some(problems) = spin_while("loading", info.orchestrator.list_problems()).await {
            print!("{}", format_problems(&problems));
        }
        CommandResult::Handled
    }
}
