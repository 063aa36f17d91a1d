//! The submit → solve pipeline behind the problem form.
//!
//! [`Orchestrator`] owns the form fields, the status line and the solution,
//! and drives two dependent calls: a successful
//! [`submit_problem`](Orchestrator::submit_problem) produces an [`Accepted`]
//! draft, and only an `Accepted` draft can be solved. Every failure ends up
//! as a status message; nothing propagates to the caller.

pub mod state;

pub use state::{FormState, ViewState};

use std::sync::{Arc, Mutex};

use tracing::{debug, error, info, warn};

use crate::auth::CredentialSource;
use crate::consts::{
    GENERIC_ERROR_MESSAGE, LIST_FAILED_MESSAGE, SOLVE_FAILED_MESSAGE, SUBMIT_FAILED_MESSAGE,
    SUBMITTED_MESSAGE, UNAUTHORIZED_MESSAGE,
};
use crate::events::{Event, EventBus};
use crate::service::{Problem, ProblemDraft, ProblemService, Reply, ServiceError};

/// Why a step stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// No credential; no request was sent.
    Unauthorized,
    /// The service answered with an error status.
    Rejected,
    /// The service could not be reached or its reply could not be read.
    Transport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    Solved,
    Failed(Failure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The problem was stored; carries how the follow-up solve went.
    Submitted(SolveOutcome),
    Failed(Failure),
}

impl SubmitOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(SolveOutcome::Solved))
    }
}

/// A draft the Problem Service has accepted.
#[derive(Debug)]
pub struct Accepted {
    draft: ProblemDraft,
}

impl Accepted {
    pub fn draft(&self) -> &ProblemDraft {
        &self.draft
    }
}

/// Form state plus the two-step request pipeline.
///
/// Clones share the same state, so overlapping submissions from several
/// handles are possible; they are not serialized.
#[derive(Clone)]
pub struct Orchestrator {
    service: Arc<dyn ProblemService>,
    credentials: Arc<dyn CredentialSource>,
    state: Arc<Mutex<ViewState>>,
    events: Arc<EventBus>,
}

impl Orchestrator {
    pub fn new(service: Arc<dyn ProblemService>, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            service,
            credentials,
            state: Arc::new(Mutex::new(ViewState::default())),
            events: Arc::new(EventBus::default()),
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.lock().unwrap().clone()
    }

    pub fn set_problem_text(&self, text: impl Into<String>) {
        self.state.lock().unwrap().form.problem_text = text.into();
    }

    pub fn set_answer_text(&self, text: impl Into<String>) {
        self.state.lock().unwrap().form.answer_text = text.into();
    }

    pub fn clear_form(&self) {
        self.state.lock().unwrap().form = FormState::default();
        self.events.emit(Event::FormCleared);
    }

    /// Submit whatever is currently in the form.
    pub async fn submit(&self) -> SubmitOutcome {
        let draft = {
            let state = self.state.lock().unwrap();
            ProblemDraft::new(&state.form.problem_text, &state.form.answer_text)
        };
        self.submit_problem(draft).await
    }

    /// Store the problem, then ask for its solution.
    ///
    /// The form is cleared only once the service has accepted the draft,
    /// and the solve request uses the draft as it was before clearing.
    pub async fn submit_problem(&self, draft: ProblemDraft) -> SubmitOutcome {
        self.set_status("");

        let Some(token) = self.resolve_token() else {
            self.set_status(UNAUTHORIZED_MESSAGE);
            return SubmitOutcome::Failed(Failure::Unauthorized);
        };

        debug!(len = draft.problem_text.len(), "submitting problem");
        let reply = self.service.create_problem(&token, &draft).await;
        if let Err(failure) = self.settle(reply, SUBMIT_FAILED_MESSAGE) {
            return SubmitOutcome::Failed(failure);
        }

        info!("problem accepted");
        self.set_status(SUBMITTED_MESSAGE);
        self.clear_form();

        let solved = self.fetch_solution(Accepted { draft }).await;
        SubmitOutcome::Submitted(solved)
    }

    /// The status line keeps the submit message on success.
    async fn fetch_solution(&self, accepted: Accepted) -> SolveOutcome {
        let Some(token) = self.resolve_token() else {
            self.set_status(UNAUTHORIZED_MESSAGE);
            return SolveOutcome::Failed(Failure::Unauthorized);
        };

        let reply = self.service.solve(&token, accepted.draft()).await;
        match self.settle(reply, SOLVE_FAILED_MESSAGE) {
            Ok(solution) => {
                info!(len = solution.len(), "solution received");
                self.state.lock().unwrap().solution = Some(solution.clone());
                self.events.emit(Event::SolutionReady { solution });
                SolveOutcome::Solved
            }
            Err(failure) => SolveOutcome::Failed(failure),
        }
    }

    /// The caller's stored problems. Leaves the form and solution alone;
    /// failures go to the status line and yield `None`.
    pub async fn list_problems(&self) -> Option<Vec<Problem>> {
        let Some(token) = self.resolve_token() else {
            self.set_status(UNAUTHORIZED_MESSAGE);
            return None;
        };

        let reply = self.service.list_problems(&token).await;
        self.settle(reply, LIST_FAILED_MESSAGE).ok()
    }

    /// Read the credential. A broken store counts as logged out.
    fn resolve_token(&self) -> Option<String> {
        match self.credentials.token() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "could not read credential");
                None
            }
        }
    }

    /// Unwrap an accepted reply, or put the failure on the status line.
    fn settle<T>(
        &self,
        reply: Result<Reply<T>, ServiceError>,
        fallback: &str,
    ) -> Result<T, Failure> {
        match reply {
            Ok(Reply::Accepted(value)) => Ok(value),
            Ok(Reply::Rejected { detail }) => {
                warn!(detail = detail.as_deref().unwrap_or(""), "request rejected");
                self.set_status(detail.unwrap_or_else(|| fallback.to_string()));
                Err(Failure::Rejected)
            }
            Err(e) => {
                error!(error = %e, "request failed");
                self.set_status(GENERIC_ERROR_MESSAGE);
                Err(Failure::Transport)
            }
        }
    }

    fn set_status(&self, message: impl Into<String>) {
        let message = message.into();
        self.state.lock().unwrap().status = message.clone();
        self.events.emit(Event::StatusChanged { message });
    }
}
