use std::sync::Arc;

use anyhow::Result;

use super::CredentialSource;
use crate::config::Config;
use crate::consts::{TOKEN_ENV_VAR, TOKEN_KEY};

/// Where a resolved token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOrigin {
    Stored,
    Env,
}

/// Reads the bearer token from the settings store on every call.
///
/// Priority: stored `token` key → environment variable.
pub struct StoredToken {
    config: Arc<Config>,
    env_var: Option<String>,
}

impl StoredToken {
    /// Stored token with the `SOLVER_TOKEN` fallback.
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_env_var(config, TOKEN_ENV_VAR)
    }

    /// Stored token with a fallback to the named environment variable.
    pub fn with_env_var(config: Arc<Config>, var: impl Into<String>) -> Self {
        Self {
            config,
            env_var: Some(var.into()),
        }
    }

    /// Stored token only, no environment fallback.
    pub fn stored_only(config: Arc<Config>) -> Self {
        Self {
            config,
            env_var: None,
        }
    }

    /// Resolve the token and report where it came from.
    pub fn lookup(&self) -> Result<Option<(String, TokenOrigin)>> {
        if let Some(token) = self.config.get(TOKEN_KEY)?
            && !token.is_empty()
        {
            return Ok(Some((token, TokenOrigin::Stored)));
        }

        if let Some(var) = &self.env_var
            && let Ok(token) = std::env::var(var)
            && !token.is_empty()
        {
            return Ok(Some((token, TokenOrigin::Env)));
        }

        Ok(None)
    }
}

impl CredentialSource for StoredToken {
    fn token(&self) -> Result<Option<String>> {
        Ok(self.lookup()?.map(|(token, _)| token))
    }
}
