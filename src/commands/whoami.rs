use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::auth;

pub struct WhoamiCommand;

#[async_trait]
impl Command for WhoamiCommand {
    fn name(&self) -> &str {
        "/whoami"
    }

    fn description(&self) -> &str {
        "show API endpoint, auth status and store"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        println!("  api       {}", info.api_url);
        println!("  auth      {}", auth::status(info.credentials));
        println!("  store     {}", info.db_path);
        CommandResult::Handled
    }
}
