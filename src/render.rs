//! Plain-text rendering of form state, events and problem lists.

use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::events::Event;
use crate::orchestrator::ViewState;
use crate::service::Problem;

/// Text for one event, or `None` if it has nothing to show.
pub fn format_event(event: &Event) -> Option<String> {
    match event {
        Event::StatusChanged { message } if message.is_empty() => None,
        Event::StatusChanged { message } => Some(format!("  {message}")),
        Event::FormCleared => None,
        Event::SolutionReady { solution } => Some(format_solution(solution)),
    }
}

pub fn format_solution(solution: &str) -> String {
    let mut out = String::from("\n  Solution\n  --------\n");
    for line in solution.lines() {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Print every event already queued on `rx` without waiting for more.
pub fn drain_events(rx: &mut broadcast::Receiver<Event>) {
    loop {
        match rx.try_recv() {
            Ok(event) => {
                if let Some(text) = format_event(&event) {
                    println!("{text}");
                }
            }
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "renderer lagged behind events");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

/// The whole form, as `/status` shows it.
pub fn format_view(view: &ViewState) -> String {
    let mut out = String::new();
    out.push_str(&format!("  problem   {}\n", or_dash(&view.form.problem_text)));
    out.push_str(&format!("  answer    {}\n", or_dash(&view.form.answer_text)));
    out.push_str(&format!("  status    {}\n", or_dash(&view.status)));
    match &view.solution {
        Some(solution) => out.push_str(&format_solution(solution)),
        None => out.push_str("  solution  —\n"),
    }
    out
}

pub fn format_problems(problems: &[Problem]) -> String {
    if problems.is_empty() {
        return "  no problems yet\n".to_string();
    }
    let mut out = String::new();
    for problem in problems {
        let id = problem
            .id
            .map(|id| format!("#{id}"))
            .unwrap_or_else(|| "#?".to_string());
        let status: &str = if problem.status.is_empty() {
            "unknown"
        } else {
            &problem.status
        };
        out.push_str(&format!(
            "  {id:<5} [{status}] {}  => {}\n",
            first_line(&problem.problem_text),
            first_line(&problem.known_answer)
        ));
    }
    out
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() { "—" } else { s }
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}
