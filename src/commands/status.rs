use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::render::format_view;

pub struct StatusCommand;

#[async_trait]
impl Command for StatusCommand {
    fn name(&self) -> &str {
        "/status"
    }

    fn description(&self) -> &str {
        "show the form, status line and solution"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        print!("{}", format_view(&info.orchestrator.snapshot()));
        CommandResult::Handled
    }
}
