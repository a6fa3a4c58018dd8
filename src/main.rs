use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::broadcast::error::RecvError;

use storefront_session::alerts::{Alert, AlertEvent, AlertKind, AlertQueue};
use storefront_session::config::Config;
use storefront_session::guard::{Access, RouteGuard};
use storefront_session::logging::init_tracing;
use storefront_session::session::{FnRefresher, RefreshError, Role, Session, SessionStore};

#[derive(Parser, Debug)]
#[command(name = "storefront-session", version)]
#[command(about = "Exercise the session readiness gate and alert queue")]
struct Cli {
    /// Path to config file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log to stderr when no log file is configured
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a route guard against a simulated session refresh
    Gate {
        /// Delay before the simulated refresh produces a token (omit to never authenticate)
        #[arg(long)]
        ready_after_ms: Option<u64>,

        /// Role the simulated session gets
        #[arg(long, default_value = "customer")]
        role: String,

        /// Role the route requires (omit for any authenticated user)
        #[arg(long)]
        require: Option<String>,

        /// Override the gate timeout from config
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Show one alert and print queue events until it is gone
    Alert {
        /// success, warning, error or info (anything else is shown as info)
        #[arg(long, default_value = "info")]
        kind: String,

        #[arg(long)]
        message: String,

        /// Override the per-kind lifetime
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load()?,
    };

    match cli.command {
        Command::Gate {
            ready_after_ms,
            role,
            require,
            timeout_ms,
        } => run_gate(config, ready_after_ms, &role, require.as_deref(), timeout_ms).await,
        Command::Alert {
            kind,
            message,
            timeout_ms,
            json,
        } => run_alert(config, &kind, message, timeout_ms, json).await,
    }
}

async fn run_gate(
    mut config: Config,
    ready_after_ms: Option<u64>,
    role: &str,
    require: Option<&str>,
    timeout_ms: Option<u64>,
) -> Result<()> {
    if let Some(ms) = timeout_ms {
        config.gate.timeout_ms = ms;
    }
    config.validate()?;

    let role = Role::parse_lossy(role);
    let refresher = FnRefresher::new(move |store: SessionStore| async move {
        let Some(delay) = ready_after_ms else {
            return Err(RefreshError::Unauthorized);
        };
        // Token arrives in the background, after the refresh call returned.
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay)).await;
            store.set(Session::new("demo-session-token", role));
        });
        Ok(())
    });

    let access = match require {
        Some(name) => Access::Role(Role::parse_lossy(name)),
        None => Access::Authenticated,
    };

    let guard = RouteGuard::from_config(SessionStore::new(), refresher, &config);
    let decision = guard.check(access).await;
    println!("{:?}", decision);
    Ok(())
}

async fn run_alert(
    config: Config,
    kind: &str,
    message: String,
    timeout_ms: Option<u64>,
    json: bool,
) -> Result<()> {
    let queue = AlertQueue::with_config(config.alerts);
    let mut events = queue.subscribe();

    let mut alert = Alert::new(AlertKind::parse_lossy(kind), message);
    if let Some(ms) = timeout_ms {
        alert = alert.with_timeout(Duration::from_millis(ms));
    }
    queue.push(alert);

    loop {
        let event = match events.recv().await {
            Ok(event) => event,
            Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => break,
        };

        print_event(&event, json);
        if matches!(event, AlertEvent::Removed { .. }) && queue.is_empty() {
            break;
        }
    }
    Ok(())
}

fn print_event(event: &AlertEvent, json: bool) {
    match event {
        AlertEvent::Added(entry) if json => {
            let line = serde_json::json!({ "event": "added", "entry": entry });
            println!("{}", line);
        }
        AlertEvent::Added(entry) => {
            println!(
                "added   {} [{}] {} ({} ms)",
                entry.id(),
                entry.kind(),
                entry.message(),
                entry.timeout().as_millis()
            );
        }
        AlertEvent::Removed { id, reason } if json => {
            let line = serde_json::json!({
                "event": "removed",
                "id": id,
                "reason": format!("{:?}", reason).to_lowercase(),
            });
            println!("{}", line);
        }
        AlertEvent::Removed { id, reason } => {
            println!("removed {} ({:?})", id, reason);
        }
    }
}
