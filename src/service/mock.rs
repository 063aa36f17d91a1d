use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::{Problem, ProblemDraft, ProblemService, Reply, ServiceError};
use crate::consts::{PROBLEMS_PATH, SOLVE_PATH};

/// One scripted answer for a mock endpoint.
#[derive(Debug, Clone)]
pub enum Scripted<T> {
    Accept(T),
    Reject(Option<String>),
    /// Behave as if the service could not be reached.
    Unreachable,
}

/// A request the mock received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateProblem { token: String, draft: ProblemDraft },
    Solve { token: String, draft: ProblemDraft },
    ListProblems { token: String },
}

/// A scripted service for tests. Replies are consumed in order per
/// endpoint; every call is recorded.
#[derive(Default)]
pub struct MockProblemService {
    create: Mutex<VecDeque<Scripted<()>>>,
    solve: Mutex<VecDeque<Scripted<String>>>,
    list: Mutex<VecDeque<Scripted<Vec<Problem>>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockProblemService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_create(self, reply: Scripted<()>) -> Self {
        self.create.lock().unwrap().push_back(reply);
        self
    }

    pub fn on_solve(self, reply: Scripted<String>) -> Self {
        self.solve.lock().unwrap().push_back(reply);
        self
    }

    pub fn on_list(self, reply: Scripted<Vec<Problem>>) -> Self {
        self.list.lock().unwrap().push_back(reply);
        self
    }

    /// Everything received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn play<T>(
    queue: &Mutex<VecDeque<Scripted<T>>>,
    endpoint: &str,
) -> Result<Reply<T>, ServiceError> {
    let next = queue.lock().unwrap().pop_front();
    match next {
        Some(Scripted::Accept(value)) => Ok(Reply::Accepted(value)),
        Some(Scripted::Reject(detail)) => Ok(Reply::Rejected { detail }),
        Some(Scripted::Unreachable) => Err(ServiceError::transport(
            endpoint,
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
        )),
        None => Err(ServiceError::malformed(
            endpoint,
            "MockProblemService: no scripted reply left",
        )),
    }
}

#[async_trait]
impl ProblemService for MockProblemService {
    async fn create_problem(
        &self,
        token: &str,
        draft: &ProblemDraft,
    ) -> Result<Reply<()>, ServiceError> {
        self.record(Call::CreateProblem {
            token: token.to_string(),
            draft: draft.clone(),
        });
        play(&self.create, PROBLEMS_PATH)
    }

    async fn solve(
        &self,
        token: &str,
        draft: &ProblemDraft,
    ) -> Result<Reply<String>, ServiceError> {
        self.record(Call::Solve {
            token: token.to_string(),
            draft: draft.clone(),
        });
        play(&self.solve, SOLVE_PATH)
    }

    async fn list_problems(&self, token: &str) -> Result<Reply<Vec<Problem>>, ServiceError> {
        self.record(Call::ListProblems {
            token: token.to_string(),
        });
        play(&self.list, PROBLEMS_PATH)
    }
}
