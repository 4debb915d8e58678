//! Process-level signal handling.
//!
//! SIGINT and SIGTERM terminate the process immediately with `128 + signo`.
//! Neither transport drains in-flight requests.

use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Signals that stop the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl ShutdownSignal {
    /// POSIX signal number.
    pub fn number(self) -> i32 {
        match self {
            Self::Interrupt => 2,
            Self::Terminate => 15,
        }
    }

    /// Process exit status for this signal.
    pub fn exit_code(self) -> i32 {
        128 + self.number()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        }
    }
}

/// Spawn a task that exits the process on SIGINT or SIGTERM.
///
/// The exit is synchronous, so the process is gone before another signal
/// can be observed; there is no separate force-exit step.
pub fn spawn_signal_handler() -> JoinHandle<()> {
    tokio::spawn(async {
        let signal = wait_for_signal().await;
        let code = signal.exit_code();
        info!(code, "Received exit signal {}", signal.name());
        std::process::exit(code);
    })
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
///
/// A handler that cannot be installed is logged and never fires.
pub async fn wait_for_signal() -> ShutdownSignal {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => ShutdownSignal::Interrupt,
        _ = terminate => ShutdownSignal::Terminate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_is_128_plus_signo() {
        assert_eq!(ShutdownSignal::Interrupt.exit_code(), 130);
        assert_eq!(ShutdownSignal::Terminate.exit_code(), 143);
    }

    #[test]
    fn test_signal_names() {
        assert_eq!(ShutdownSignal::Interrupt.name(), "SIGINT");
        assert_eq!(ShutdownSignal::Terminate.number(), 15);
    }
}
