use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{Problem, ProblemDraft, ProblemService, Reply, ServiceError};
use crate::consts::{PROBLEMS_PATH, SOLVE_PATH};

/// Talks to the problems API over HTTP with JSON bodies and a bearer token.
pub struct HttpProblemService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProblemService {
    /// `base_url` is the API origin, e.g. `http://localhost:8000`.
    /// No request timeout unless one is given.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send the request and read the reply body as JSON, whatever the status.
    async fn exchange(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<(StatusCode, Value), ServiceError> {
        debug!(endpoint = path, "sending request");
        let resp = request
            .send()
            .await
            .map_err(|e| ServiceError::transport(path, e))?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ServiceError::transport(path, e))?;
        debug!(endpoint = path, %status, len = bytes.len(), "response received");

        let body: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::malformed(path, format!("{status}: {e}")))?;
        Ok((status, body))
    }

    async fn post_draft(
        &self,
        path: &str,
        token: &str,
        draft: &ProblemDraft,
    ) -> Result<(StatusCode, Value), ServiceError> {
        let request = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(draft);
        self.exchange(path, request).await
    }
}

#[async_trait]
impl ProblemService for HttpProblemService {
    async fn create_problem(
        &self,
        token: &str,
        draft: &ProblemDraft,
    ) -> Result<Reply<()>, ServiceError> {
        let (status, body) = self.post_draft(PROBLEMS_PATH, token, draft).await?;
        into_reply(status, body, |_| Ok(()))
    }

    async fn solve(
        &self,
        token: &str,
        draft: &ProblemDraft,
    ) -> Result<Reply<String>, ServiceError> {
        let (status, body) = self.post_draft(SOLVE_PATH, token, draft).await?;
        into_reply(status, body, |body| {
            serde_json::from_value::<SolveResponse>(body)
                .map(|r| r.solution)
                .map_err(|e| ServiceError::malformed(SOLVE_PATH, e.to_string()))
        })
    }

    async fn list_problems(&self, token: &str) -> Result<Reply<Vec<Problem>>, ServiceError> {
        let request = self.client.get(self.url(PROBLEMS_PATH)).bearer_auth(token);
        let (status, body) = self.exchange(PROBLEMS_PATH, request).await?;
        into_reply(status, body, |body| {
            serde_json::from_value::<Vec<Problem>>(body)
                .map_err(|e| ServiceError::malformed(PROBLEMS_PATH, e.to_string()))
        })
    }
}

/// 2xx hands the body to `accept`; anything else is a rejection.
fn into_reply<T>(
    status: StatusCode,
    body: Value,
    accept: impl FnOnce(Value) -> Result<T, ServiceError>,
) -> Result<Reply<T>, ServiceError> {
    if status.is_success() {
        accept(body).map(Reply::Accepted)
    } else {
        Ok(Reply::Rejected {
            detail: rejection_detail(&body),
        })
    }
}

/// Pull a user-facing message out of an error body's `detail`.
///
/// A plain string is used as is. Validation errors arrive as a list of
/// objects with a `msg`; those are joined.
fn rejection_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}

#[derive(Deserialize)]
struct SolveResponse {
    solution: String,
}
