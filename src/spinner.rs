//! Terminal spinner shown while a request is in flight.

use std::io::Write;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const INTERVAL: Duration = Duration::from_millis(80);

/// Draws on stderr so stdout stays clean for piping.
pub struct Spinner {
    handle: JoinHandle<()>,
    cancel: watch::Sender<bool>,
}

impl Spinner {
    pub fn start(message: &str) -> Self {
        let (cancel, mut cancelled) = watch::channel(false);
        let message = message.to_string();

        let handle = tokio::spawn(async move {
            for frame in FRAMES.iter().cycle() {
                eprint!("\x1b[2K\r{frame} {message}");
                let _ = std::io::stderr().flush();

                tokio::select! {
                    _ = tokio::time::sleep(INTERVAL) => {}
                    _ = cancelled.changed() => break,
                }
            }
            eprint!("\x1b[2K\r");
            let _ = std::io::stderr().flush();
        });

        Self { handle, cancel }
    }

    /// Stop and clear the line.
    pub async fn stop(mut self) {
        let _ = self.cancel.send(true);
        let _ = (&mut self.handle).await;
    }
}

impl Drop for Spinner {
    // Dropped mid-flight (e.g. Ctrl+C): the task still clears its line.
    fn drop(&mut self) {
        let _ = self.cancel.send(true);
    }
}

/// Run `work` with a spinner, clearing it before returning the output.
pub async fn spin_while<F: Future>(message: &str, work: F) -> F::Output {
    let spinner = Spinner::start(message);
    let output = work.await;
    spinner.stop().await;
    output
}
