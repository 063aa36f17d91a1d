use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct ProblemCommand;

#[async_trait]
impl Command for ProblemCommand {
    fn name(&self) -> &str {
        "/problem"
    }

    fn aliases(&self) -> &[&str] {
        &["/p"]
    }

    fn description(&self) -> &str {
        "set the problem text (no text: show it)"
    }

    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult {
        if args.is_empty() {
            let view = info.orchestrator.snapshot();
            println!("  problem   {}", view.form.problem_text);
        } else {
            info.orchestrator.set_problem_text(args);
        }
        CommandResult::Handled
    }
}
