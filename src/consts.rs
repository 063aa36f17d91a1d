//! Project-wide constants.

use std::path::PathBuf;

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

/// API base URL when neither `--api-url` nor the stored `api_url` is set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Create and list problems.
pub const PROBLEMS_PATH: &str = "/api/problems";
/// Ask for a worked solution.
pub const SOLVE_PATH: &str = "/api/problems/solve";

/// Config key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Config key holding the API base URL.
pub const API_URL_KEY: &str = "api_url";
/// Fallback when no token is stored.
pub const TOKEN_ENV_VAR: &str = "SOLVER_TOKEN";

// User-facing status messages.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized. Please log in again.";
pub const SUBMITTED_MESSAGE: &str = "Problem and answer submitted successfully";
pub const SUBMIT_FAILED_MESSAGE: &str = "Submission failed";
pub const SOLVE_FAILED_MESSAGE: &str = "Failed to get solution";
pub const LIST_FAILED_MESSAGE: &str = "Failed to load problems";
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Default database path: `~/.solver/solver.db`.
/// Single DB for the token and settings.
pub fn default_db_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".solver").join("solver.db"))
}
