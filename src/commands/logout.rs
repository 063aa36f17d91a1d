use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::auth;

pub struct LogoutCommand;

#[async_trait]
impl Command for LogoutCommand {
    fn name(&self) -> &str {
        "/logout"
    }

    fn description(&self) -> &str {
        "forget the stored token"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        match auth::logout(info.config) {
            Ok(()) => println!("  ✓ logged out"),
            Err(e) => eprintln!("  ✗ {e:#}"),
        }
        CommandResult::Handled
    }
}
