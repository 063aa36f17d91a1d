pub mod error;
pub mod http;
pub mod mock;

pub use error::ServiceError;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A problem and its known answer, as sent to both POST endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDraft {
    pub problem_text: String,
    pub known_answer: String,
}

impl ProblemDraft {
    pub fn new(problem_text: impl Into<String>, known_answer: impl Into<String>) -> Self {
        Self {
            problem_text: problem_text.into(),
            known_answer: known_answer.into(),
        }
    }
}

/// A stored problem, as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(default)]
    pub id: Option<i64>,
    pub problem_text: String,
    #[serde(default)]
    pub known_answer: String,
    #[serde(default)]
    pub status: String,
}

/// How the service answered a well-formed exchange.
///
/// A rejection is a normal reply, not an error: the service was reached
/// and said no.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    Accepted(T),
    Rejected { detail: Option<String> },
}

/// The remote Problem Service and Solution Service.
///
/// Every call carries the bearer token it was given; implementations do
/// not look credentials up themselves.
#[async_trait]
pub trait ProblemService: Send + Sync {
    /// Store a problem. The acceptance body is not used.
    async fn create_problem(
        &self,
        token: &str,
        draft: &ProblemDraft,
    ) -> Result<Reply<()>, ServiceError>;

    /// Ask for a worked solution.
    async fn solve(&self, token: &str, draft: &ProblemDraft)
    -> Result<Reply<String>, ServiceError>;

    /// The caller's stored problems.
    async fn list_problems(&self, token: &str) -> Result<Reply<Vec<Problem>>, ServiceError>;
}
