use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::auth;

pub struct LoginCommand;

#[async_trait]
impl Command for LoginCommand {
    fn name(&self) -> &str {
        "/login"
    }

    fn description(&self) -> &str {
        "store a bearer token (paste it, or pass it inline)"
    }

    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult {
        let token = if args.is_empty() {
            print!("Paste your token: ");
            if std::io::Write::flush(&mut std::io::stdout()).is_err() {
                return CommandResult::Handled;
            }
            let mut line = String::new();
            if std::io::stdin().read_line(&mut line).is_err() {
                eprintln!("  ✗ failed to read input");
                return CommandResult::Handled;
            }
            line
        } else {
            args.to_string()
        };

        match auth::login(info.config, &token) {
            Ok(()) => println!("  ✓ token saved"),
            Err(e) => eprintln!("  ✗ login failed: {e:#}"),
        }
        CommandResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::Fixture;
    use crate::consts::TOKEN_KEY;
    use crate::service::mock::MockProblemService;

    #[tokio::test]
    async fn inline_token_is_stored() {
        let fixture = Fixture::new(MockProblemService::new());
        LoginCommand.execute("abc123", &fixture.info()).await;
        assert_eq!(fixture.config.get(TOKEN_KEY).unwrap().unwrap(), "abc123");
    }
}
