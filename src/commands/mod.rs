//! Built-in REPL commands prefixed with `/`.
//!
//! Commands implement the [`Command`] trait and are registered in a
//! [`CommandRegistry`]. The registry handles dispatch, alias resolution,
//! and help generation. Input that is not a command fills the form; see
//! [`fill_next_field`].

mod answer;
mod clear;
mod help;
mod login;
mod logout;
mod problem;
mod problems;
mod quit;
mod status;
mod submit;
mod whoami;

use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::StoredToken;
use crate::config::Config;
use crate::orchestrator::{Orchestrator, ViewState};

/// What commands can reach while they run.
pub struct SessionInfo<'a> {
    pub orchestrator: &'a Orchestrator,
    pub config: &'a Config,
    pub credentials: &'a StoredToken,
    pub api_url: &'a str,
    pub db_path: &'a str,
}

/// What the REPL should do after a command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Not a command; the line is form input.
    NotACommand,
    Handled,
    Quit,
}

#[async_trait]
pub trait Command: Send + Sync {
    /// Primary name, e.g. `"/submit"`.
    fn name(&self) -> &str;

    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// One-line description for `/help`.
    fn description(&self) -> &str;

    /// `args` is whatever followed the name, trimmed.
    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult;
}

pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(help::HelpCommand),
            Arc::new(problem::ProblemCommand),
            Arc::new(answer::AnswerCommand),
            Arc::new(submit::SubmitCommand),
            Arc::new(status::StatusCommand),
            Arc::new(clear::ClearCommand),
            Arc::new(problems::ProblemsCommand),
            Arc::new(whoami::WhoamiCommand),
            Arc::new(login::LoginCommand),
            Arc::new(logout::LogoutCommand),
            Arc::new(quit::QuitCommand),
        ];
        Self { commands }
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.push(command);
    }

    /// Dispatch input to a matching command, or return `NotACommand`.
    pub async fn dispatch(&self, input: &str, info: &SessionInfo<'_>) -> CommandResult {
        let input = input.trim();
        let (cmd, args) = match input.split_once(char::is_whitespace) {
            Some((cmd, args)) => (cmd, args.trim()),
            None => (input, ""),
        };

        // Bare words like `quit` only count when they are the whole line.
        if !cmd.starts_with('/') && !args.is_empty() {
            return CommandResult::NotACommand;
        }

        for command in &self.commands {
            if cmd == command.name() || command.aliases().contains(&cmd) {
                // /help needs the registry itself
                if command.name() == "/help" {
                    print!("{}", self.help_text());
                    return CommandResult::Handled;
                }
                return command.execute(args, info).await;
            }
        }

        if cmd.starts_with('/') {
            println!("unknown command: {cmd}");
            println!("type /help for available commands");
            return CommandResult::Handled;
        }

        CommandResult::NotACommand
    }

    pub fn help_text(&self) -> String {
        let entries: Vec<(String, &str)> = self
            .commands
            .iter()
            .map(|c| (format_label(c.name(), c.aliases()), c.description()))
            .collect();

        let max_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(10);

        let mut out = String::new();
        for (label, desc) in &entries {
            out.push_str(&format!("  {label:<max_width$}  {desc}\n"));
        }
        out
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// All registered names and aliases (for duplicate detection).
    pub fn all_triggers(&self) -> Vec<&str> {
        let mut triggers = Vec::new();
        for cmd in &self.commands {
            triggers.push(cmd.name());
            triggers.extend_from_slice(cmd.aliases());
        }
        triggers
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn format_label(name: &str, aliases: &[&str]) -> String {
    if aliases.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, aliases.join(", "))
    }
}

/// Which field plain input goes to next.
///
/// A full form (left behind by a rejected submission) starts over at the
/// problem.
pub fn next_field(view: &ViewState) -> &'static str {
    if view.form.problem_text.trim().is_empty() || view.form.is_complete() {
        "problem"
    } else {
        "answer"
    }
}

/// Put a line of plain input into the next empty field.
/// Returns `true` once both fields are filled and the form can be submitted.
pub fn fill_next_field(orchestrator: &Orchestrator, line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return false;
    }
    if orchestrator.snapshot().form.is_complete() {
        orchestrator.set_problem_text(line);
        orchestrator.set_answer_text("");
        return false;
    }
    match next_field(&orchestrator.snapshot()) {
        "problem" => orchestrator.set_problem_text(line),
        _ => orchestrator.set_answer_text(line),
    }
    orchestrator.snapshot().form.is_complete()
}
