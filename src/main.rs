use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use solver::auth::{self, StoredToken};
use solver::banner::{BannerInfo, print_banner};
use solver::commands::{CommandRegistry, CommandResult, SessionInfo, fill_next_field, next_field};
use solver::config::{Config, resolve_db_path};
use solver::consts::default_db_path;
use solver::orchestrator::Orchestrator;
use solver::render::{drain_events, format_problems, format_solution};
use solver::service::ProblemDraft;
use solver::service::http::HttpProblemService;
use solver::spinner::spin_while;

#[derive(Parser)]
#[command(name = "solver", version, about = "A problem in, a worked answer out.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// SQLite database holding the token and settings [default: ~/.solver/solver.db]
    #[arg(short, long, global = true)]
    db: Option<String>,

    /// API base URL (overrides the stored `api_url`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    /// Debug logging on stderr
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Submit one problem and print its solution
    Solve {
        /// The problem statement
        #[arg(short, long)]
        problem: String,
        /// The known answer
        #[arg(short, long)]
        answer: String,
    },
    /// List your submitted problems
    List,
    /// Store a bearer token issued by the auth service
    Login {
        /// Token to store (prompted for when omitted)
        #[arg(long)]
        token: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Read or change stored settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    Get { key: String },
    Set { key: String, value: String },
    Unset { key: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let db_path = resolve_db_path(cli.db, default_db_path())?;
    let config = Arc::new(Config::open(&db_path)?);

    let api_url = config.api_url(cli.api_url.as_deref())?;
    let service = Arc::new(HttpProblemService::new(
        &api_url,
        cli.timeout.map(Duration::from_secs),
    )?);
    let credentials = Arc::new(StoredToken::new(config.clone()));
    let orchestrator = Orchestrator::new(service, credentials.clone());

    match cli.command {
        Some(Command::Solve { problem, answer }) => run_solve(&orchestrator, problem, answer).await,
        Some(Command::List) => run_list(&orchestrator).await,
        Some(Command::Login { token }) => handle_login(&config, token),
        Some(Command::Logout) => {
            auth::logout(&config)?;
            println!("✓ Logged out.");
            Ok(())
        }
        Some(Command::Config { action }) => handle_config(&config, action),
        None => {
            let session = Session {
                orchestrator: &orchestrator,
                config: &config,
                credentials: &credentials,
                api_url: &api_url,
                db_path: &db_path,
            };
            repl(session).await
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "solver=debug" } else { "solver=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run_solve(orchestrator: &Orchestrator, problem: String, answer: String) -> Result<()> {
    if problem.trim().is_empty() || answer.trim().is_empty() {
        bail!("both --problem and --answer are required");
    }

    let draft = ProblemDraft::new(problem, answer);
    let outcome = spin_while("solving", orchestrator.submit_problem(draft)).await;
    let view = orchestrator.snapshot();

    if !outcome.is_solved() {
        bail!("{}", view.status);
    }
    println!("{}", view.status);
    if let Some(solution) = &view.solution {
        print!("{}", format_solution(solution));
    }
    Ok(())
}

async fn run_list(orchestrator: &Orchestrator) -> Result<()> {
    match spin_while("loading", orchestrator.list_problems()).await {
        Some(problems) => {
            print!("{}", format_problems(&problems));
            Ok(())
        }
        None => bail!("{}", orchestrator.snapshot().status),
    }
}

fn handle_login(config: &Config, token: Option<String>) -> Result<()> {
    let token = match token {
        Some(token) => token,
        None => {
            print!("Paste your token: ");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().read_line(&mut line)?;
            line
        }
    };
    auth::login(config, &token)?;
    println!("✓ Token saved.");
    Ok(())
}

fn handle_config(config: &Config, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Get { key } => println!("{}", config.require(&key)?),
        ConfigAction::Set { key, value } => config.set(&key, &value)?,
        ConfigAction::Unset { key } => config.remove(&key)?,
    }
    Ok(())
}

struct Session<'a> {
    orchestrator: &'a Orchestrator,
    config: &'a Config,
    credentials: &'a StoredToken,
    api_url: &'a str,
    db_path: &'a str,
}

async fn repl(session: Session<'_>) -> Result<()> {
    let orchestrator = session.orchestrator;
    print_banner(&BannerInfo {
        api_url: session.api_url,
        auth_status: &auth::status(session.credentials),
        db_path: session.db_path,
    });

    let registry = CommandRegistry::new();
    let mut events = orchestrator.events().subscribe();

    // Async stdin so Ctrl+C is caught at the prompt too
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\n{}> ", next_field(&orchestrator.snapshot()));
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let info = SessionInfo {
            orchestrator,
            config: session.config,
            credentials: session.credentials,
            api_url: session.api_url,
            db_path: session.db_path,
        };

        match registry.dispatch(&line, &info).await {
            CommandResult::Quit => break,
            CommandResult::Handled => {}
            CommandResult::NotACommand => {
                if fill_next_field(orchestrator, &line) {
                    // Ctrl+C abandons the wait, not the REPL
                    tokio::select! {
                        _ = spin_while("solving", orchestrator.submit()) => {}
                        _ = tokio::signal::ctrl_c() => {
                            println!("\n\ninterrupted");
                        }
                    }
                }
            }
        }

        drain_events(&mut events);
    }

    println!("goodbye.");
    Ok(())
}
