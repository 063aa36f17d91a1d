use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct AnswerCommand;

#[async_trait]
impl Command for AnswerCommand {
    fn name(&self) -> &str {
        "/answer"
    }

    fn aliases(&self) -> &[&str] {
        &["/a"]
    }

    fn description(&self) -> &str {
        "set the known answer (no text: show it)"
    }

    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult {
        if args.is_empty() {
            let view = info.orchestrator.snapshot();
            println!("  answer    {}", view.form.answer_text);
        } else {
            info.orchestrator.set_answer_text(args);
        }
        CommandResult::Handled
    }
}
