//! Terminal implementation of the page host.

use std::io::{BufRead, Write};
use std::sync::{Mutex, PoisonError};

use larder_storefront::Host;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::Notify;

/// Host backed by stdin/stdout.
///
/// Confirmations are read as `[y/N]` answers, alerts are printed and reloads
/// are logged (there is no page to reload).
#[derive(Debug, Default)]
pub struct TerminalHost {
    assume_yes: bool,
    last_alert: Mutex<Option<String>>,
    reloaded: Notify,
}

impl TerminalHost {
    /// Create a host. With `assume_yes` every confirmation is accepted
    /// without prompting.
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            last_alert: Mutex::new(None),
            reloaded: Notify::new(),
        }
    }

    /// Message of the most recent alert, if any was shown.
    pub fn last_alert(&self) -> Option<String> {
        self.last_alert
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Wait until a reload has been requested.
    pub async fn reloaded(&self) {
        self.reloaded.notified().await;
    }
}

impl Host for TerminalHost {
    #[allow(clippy::print_stdout)]
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            tracing::info!(prompt = message, "Confirmed by --yes");
            return true;
        }

        print!("{message} [y/N] ");
        if let Err(e) = std::io::stdout().flush() {
            tracing::warn!("Failed to flush prompt: {e}");
        }

        match read_answer(std::io::stdin().lock()) {
            Ok(answer) => is_yes(&answer),
            Err(e) => {
                tracing::warn!("Failed to read answer: {e}");
                false
            }
        }
    }

    #[allow(clippy::print_stdout)]
    fn alert(&self, message: &str) {
        println!("{message}");
        *self
            .last_alert
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(message.to_string());
    }

    fn reload(&self) {
        tracing::info!("Page reload requested");
        self.reloaded.notify_one();
    }
}

/// Read one line of input.
///
/// On a multi-threaded runtime the worker hands its other tasks off while
/// blocked on the terminal.
fn read_answer(mut input: impl BufRead) -> std::io::Result<String> {
    let mut read = move || -> std::io::Result<String> {
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        Ok(answer)
    };

    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(read)
        }
        _ => read(),
    }
}

/// Whether a prompt answer means yes. Anything else, including an empty
/// line, is a no.
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
