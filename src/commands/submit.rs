use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::spinner::spin_while;

pub struct SubmitCommand;

#[async_trait]
impl Command for SubmitCommand {
    fn name(&self) -> &str {
        "/submit"
    }

    fn aliases(&self) -> &[&str] {
        &["/s"]
    }

    fn description(&self) -> &str {
        "submit the form and fetch a solution"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        if !info.orchestrator.snapshot().form.is_complete() {
            println!("  both the problem and the answer are required");
            return CommandResult::Handled;
        }
        spin_while("solving", info.orchestrator.submit()).await;
        CommandResult::Handled
    }
}
