pub mod storage;

pub use storage::{StoredToken, TokenOrigin};

use anyhow::{Context, Result, bail};

use crate::config::Config;
use crate::consts::TOKEN_KEY;

/// Read-only access to the bearer token.
///
/// Called before every request, so implementations must not cache.
/// `Ok(None)` means the user is not logged in.
pub trait CredentialSource: Send + Sync {
    fn token(&self) -> Result<Option<String>>;
}

/// Store a bearer token obtained from the auth service.
///
/// Shared by the `solver login` subcommand and the `/login` REPL command.
pub fn login(config: &Config, token: &str) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        bail!("no token provided");
    }
    config
        .set(TOKEN_KEY, token)
        .context("failed to save token")?;
    Ok(())
}

/// Remove the stored bearer token.
pub fn logout(config: &Config) -> Result<()> {
    config
        .remove(TOKEN_KEY)
        .context("failed to remove token")?;
    Ok(())
}

/// Human-readable auth status for the banner and `/whoami`.
pub fn status(source: &StoredToken) -> String {
    match source.lookup() {
        Ok(Some((_, TokenOrigin::Stored))) => "token ✓".to_string(),
        Ok(Some((_, TokenOrigin::Env))) => "token (env) ✓".to_string(),
        Ok(None) => "not authenticated".to_string(),
        Err(e) => format!("unavailable ({e})"),
    }
}
