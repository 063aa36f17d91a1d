use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct ClearCommand;

#[async_trait]
impl Command for ClearCommand {
    fn name(&self) -> &str {
        "/clear"
    }

    fn description(&self) -> &str {
        "empty both form fields"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        info.orchestrator.clear_form();
        CommandResult::Handled
    }
}
