use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::post,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use solver::auth::StoredToken;
use solver::config::Config;
use solver::consts::{GENERIC_ERROR_MESSAGE, SUBMITTED_MESSAGE, TOKEN_KEY};
use solver::orchestrator::Orchestrator;
use solver::service::http::HttpProblemService;
use solver::service::{ProblemDraft, ProblemService, Reply, ServiceError};

/// A request as the test server saw it.
#[derive(Debug, Clone)]
struct Seen {
    method: Method,
    path: String,
    authorization: Option<String>,
    content_type: Option<String>,
    body: String,
}

type Routes = HashMap<(Method, String), (StatusCode, &'static str)>;

#[derive(Clone)]
struct ServerState {
    routes: Arc<Routes>,
    seen: Arc<Mutex<Vec<Seen>>>,
}

async fn handle(
    State(state): State<ServerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.seen.lock().unwrap().push(Seen {
        method: method.clone(),
        path: uri.path().to_string(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body,
    });

    match state.routes.get(&(method, uri.path().to_string())) {
        Some((status, body)) => (*status, body.to_string()),
        None => (
            StatusCode::NOT_FOUND,
            json!({"detail": "Not Found"}).to_string(),
        ),
    }
}

/// Serve canned replies on a random local port.
async fn spawn_server(
    routes: Vec<(Method, &'static str, StatusCode, &'static str)>,
) -> (String, Arc<Mutex<Vec<Seen>>>) {
    let routes: Routes = routes
        .into_iter()
        .map(|(method, path, status, body)| ((method, path.to_string()), (status, body)))
        .collect();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        routes: Arc::new(routes),
        seen: seen.clone(),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(handle).with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{addr}"), seen)
}

fn service(base_url: &str) -> HttpProblemService {
    HttpProblemService::new(base_url, None).unwrap()
}

fn draft() -> ProblemDraft {
    ProblemDraft::new("What is 2+2?", "4")
}

// ── Create ────────────────────────────────────────────────────────

#[tokio::test]
async fn create_sends_bearer_token_and_json_body() {
    let (url, seen) = spawn_server(vec![(
        Method::POST,
        "/api/problems",
        StatusCode::OK,
        r#"{"id": 1, "problem_text": "What is 2+2?", "known_answer": "4", "status": "pending"}"#,
    )])
    .await;

    let reply = service(&url).create_problem("tok-1", &draft()).await.unwrap();
    assert_eq!(reply, Reply::Accepted(()));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, Method::POST);
    assert_eq!(seen[0].path, "/api/problems");
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer tok-1"));
    assert!(
        seen[0]
            .content_type
            .as_deref()
            .unwrap_or("")
            .starts_with("application/json")
    );
    let body: Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(
        body,
        json!({"problem_text": "What is 2+2?", "known_answer": "4"})
    );
}

#[tokio::test]
async fn create_rejection_carries_detail() {
    let (url, _) = spawn_server(vec![(
        Method::POST,
        "/api/problems",
        StatusCode::BAD_REQUEST,
        r#"{"detail": "Bad input"}"#,
    )])
    .await;

    let reply = service(&url).create_problem("tok", &draft()).await.unwrap();
    assert_eq!(
        reply,
        Reply::Rejected {
            detail: Some("Bad input".to_string())
        }
    );
}

#[tokio::test]
async fn validation_errors_are_joined() {
    let (url, _) = spawn_server(vec![(
        Method::POST,
        "/api/problems",
        StatusCode::UNPROCESSABLE_ENTITY,
        r#"{"detail": [{"loc": ["body", "known_answer"], "msg": "field required", "type": "value_error.missing"}]}"#,
    )])
    .await;

    let reply = service(&url).create_problem("tok", &draft()).await.unwrap();
    assert_eq!(
        reply,
        Reply::Rejected {
            detail: Some("field required".to_string())
        }
    );
}

#[tokio::test]
async fn non_json_success_body_is_malformed() {
    let (url, _) = spawn_server(vec![(Method::POST, "/api/problems", StatusCode::OK, "OK")]).await;

    let err = service(&url)
        .create_problem("tok", &draft())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Malformed { .. }));
}

#[tokio::test]
async fn non_json_error_body_is_malformed() {
    let (url, _) = spawn_server(vec![(
        Method::POST,
        "/api/problems",
        StatusCode::BAD_GATEWAY,
        "<html>bad gateway</html>",
    )])
    .await;

    let err = service(&url)
        .create_problem("tok", &draft())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Malformed { .. }));
}

// ── Solve ─────────────────────────────────────────────────────────

#[tokio::test]
async fn solve_returns_solution() {
    let (url, seen) = spawn_server(vec![(
        Method::POST,
        "/api/problems/solve",
        StatusCode::OK,
        r#"{"solution": "Step 1: add.\nAnswer: 4"}"#,
    )])
    .await;

    let reply = service(&url).solve("tok", &draft()).await.unwrap();
    assert_eq!(
        reply,
        Reply::Accepted("Step 1: add.\nAnswer: 4".to_string())
    );
    assert_eq!(seen.lock().unwrap()[0].path, "/api/problems/solve");
}

#[tokio::test]
async fn solve_without_solution_field_is_malformed() {
    let (url, _) = spawn_server(vec![(
        Method::POST,
        "/api/problems/solve",
        StatusCode::OK,
        r#"{"answer": "4"}"#,
    )])
    .await;

    let err = service(&url).solve("tok", &draft()).await.unwrap_err();
    assert!(matches!(err, ServiceError::Malformed { .. }));
}

#[tokio::test]
async fn solve_server_error_is_rejection() {
    let (url, _) = spawn_server(vec![(
        Method::POST,
        "/api/problems/solve",
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"detail": "Failed to get solution"}"#,
    )])
    .await;

    let reply = service(&url).solve("tok", &draft()).await.unwrap();
    assert_eq!(
        reply,
        Reply::Rejected {
            detail: Some("Failed to get solution".to_string())
        }
    );
}

// ── List ──────────────────────────────────────────────────────────

#[tokio::test]
async fn list_parses_problems() {
    let (url, seen) = spawn_server(vec![(
        Method::GET,
        "/api/problems",
        StatusCode::OK,
        r#"[{"id": 1, "user_id": 9, "problem_text": "Test problem", "known_answer": "Test answer", "status": "pending"}]"#,
    )])
    .await;

    let reply = service(&url).list_problems("tok").await.unwrap();
    match reply {
        Reply::Accepted(problems) => {
            assert_eq!(problems.len(), 1);
            assert_eq!(problems[0].id, Some(1));
            assert_eq!(problems[0].problem_text, "Test problem");
            assert_eq!(problems[0].status, "pending");
        }
        other => panic!("expected Accepted, got {other:?}"),
    }
    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].method, Method::GET);
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn list_unauthorized_is_rejection() {
    let (url, _) = spawn_server(vec![(
        Method::GET,
        "/api/problems",
        StatusCode::UNAUTHORIZED,
        r#"{"detail": "Not authenticated"}"#,
    )])
    .await;

    let reply = service(&url).list_problems("expired").await.unwrap();
    assert_eq!(
        reply,
        Reply::Rejected {
            detail: Some("Not authenticated".to_string())
        }
    );
}

// ── Transport ─────────────────────────────────────────────────────

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // Grab a free port, then close it again.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = service(&format!("http://{addr}"))
        .create_problem("tok", &draft())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Transport { .. }));
}

#[tokio::test]
async fn timeout_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route(
        "/api/problems",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "{}"
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let service =
        HttpProblemService::new(format!("http://{addr}"), Some(Duration::from_millis(100)))
            .unwrap();
    let err = service.create_problem("tok", &draft()).await.unwrap_err();
    assert!(matches!(err, ServiceError::Transport { .. }));
}

// ── End to end ────────────────────────────────────────────────────

fn orchestrator(url: &str, token: Option<&str>) -> Orchestrator {
    let config = Arc::new(Config::in_memory().unwrap());
    if let Some(token) = token {
        config.set(TOKEN_KEY, token).unwrap();
    }
    let credentials = Arc::new(StoredToken::stored_only(config));
    Orchestrator::new(Arc::new(service(url)), credentials)
}

#[tokio::test]
async fn submit_then_solve_over_http() {
    let (url, seen) = spawn_server(vec![
        (
            Method::POST,
            "/api/problems",
            StatusCode::OK,
            r#"{"id": 5, "problem_text": "What is 2+2?", "known_answer": "4", "status": "pending"}"#,
        ),
        (
            Method::POST,
            "/api/problems/solve",
            StatusCode::OK,
            r#"{"solution": "2 + 2 = 4"}"#,
        ),
    ])
    .await;
    let orch = orchestrator(&url, Some("stored-token"));
    orch.set_problem_text("What is 2+2?");
    orch.set_answer_text("4");

    assert!(orch.submit().await.is_solved());

    let view = orch.snapshot();
    assert_eq!(view.status, SUBMITTED_MESSAGE);
    assert_eq!(view.solution.as_deref(), Some("2 + 2 = 4"));
    assert!(view.form.is_empty());

    let seen = seen.lock().unwrap();
    let paths: Vec<&str> = seen.iter().map(|s| s.path.as_str()).collect();
    assert_eq!(paths, vec!["/api/problems", "/api/problems/solve"]);
    assert_eq!(seen[0].body, seen[1].body);
    for request in seen.iter() {
        assert_eq!(request.authorization.as_deref(), Some("Bearer stored-token"));
    }
}

#[tokio::test]
async fn logged_out_makes_no_requests() {
    let (url, seen) = spawn_server(vec![]).await;
    let orch = orchestrator(&url, None);

    orch.submit_problem(draft()).await;

    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_api_sets_generic_message() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let orch = orchestrator(&format!("http://{addr}"), Some("tok"));
    orch.set_problem_text("p");
    orch.set_answer_text("a");
    orch.submit().await;

    let view = orch.snapshot();
    assert_eq!(view.status, GENERIC_ERROR_MESSAGE);
    assert_eq!(view.form.problem_text, "p");
}
