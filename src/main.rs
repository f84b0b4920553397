//! scrape_auth - Basic-Auth protected metrics server
//!
//! Serves credentials cache metrics behind a cached Basic-Auth check, and
//! generates password hashes for its configuration.

use std::io::{self, BufRead, IsTerminal, Write};
use std::net::SocketAddr;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrape_auth::{api::create_router, auth, AppState, Config};

#[derive(Parser)]
#[command(name = "scrape_auth", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print the hash of a password read from the terminal or stdin
    Hash {
        /// SHA-1, SHA-256, SHA-512, PBKDF2WithHmacSHA1, PBKDF2WithHmacSHA256 or PBKDF2WithHmacSHA512
        #[arg(long)]
        algorithm: String,
        #[arg(long)]
        salt: String,
        /// PBKDF2 iterations
        #[arg(long)]
        iterations: Option<u32>,
        /// PBKDF2 key length in bits
        #[arg(long)]
        key_length: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Hash {
            algorithm,
            salt,
            iterations,
            key_length,
        } => hash(&algorithm, &salt, iterations, key_length),
    }
}

/// Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the authenticator and credentials cache
/// 4. Start HTTP server on configured port
/// 5. Handle graceful shutdown on SIGINT/SIGTERM
async fn serve() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scrape_auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting scrape_auth server");

    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;
    info!(
        "Configuration loaded: port={}, authentication={}",
        config.server_port,
        config
            .auth
            .as_ref()
            .map(|auth| auth.authenticator.algorithm_name())
            .unwrap_or("disabled")
    );

    let state = AppState::from_config(&config).map_err(|e| {
        error!("Invalid authentication configuration: {}", e);
        e
    })?;
    if state.auth.is_none() {
        info!("AUTH_USERNAME not set, /metrics is unauthenticated");
    }

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Reads the password twice and prints its hash.
///
/// Input is hidden on a terminal; piped stdin is read line by line.
fn hash(
    algorithm: &str,
    salt: &str,
    iterations: Option<u32>,
    key_length: Option<u32>,
) -> anyhow::Result<()> {
    let interactive = io::stdin().is_terminal();
    let mut lines = io::stdin().lock().lines();
    let password = read_confirmed_password(|label| {
        eprint!("{}", label);
        io::stderr().flush()?;
        if interactive {
            return rpassword::read_password().context("failed to read password");
        }
        let line = lines.next().context("no password on stdin")??;
        Ok(line)
    })?;

    let hash = auth::generate_hash(algorithm, salt, iterations, key_length, &password)?;
    println!("algorithm  [{}]", algorithm);
    println!("salt       [{}]", salt);
    if let Some((iterations, key_length)) =
        auth::resolve_pbkdf2_parameters(algorithm, iterations, key_length)
    {
        println!("iterations [{}]", iterations);
        println!("keyLength  [{}]", key_length);
    }
    println!("hash       [{}]", hash);
    Ok(())
}

/// Prompts for a password and its confirmation, failing if they differ.
fn read_confirmed_password<F>(mut prompt: F) -> anyhow::Result<String>
where
    F: FnMut(&str) -> anyhow::Result<String>,
{
    let password = prompt("password? ")?;
    let confirm = prompt("confirm password? ")?;
    if password != confirm {
        bail!("passwords don't match");
    }
    Ok(password)
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(inputs: &[&str]) -> impl FnMut(&str) -> anyhow::Result<String> {
        let mut inputs: Vec<String> = inputs.iter().rev().map(|s| s.to_string()).collect();
        move |_| inputs.pop().context("no more input")
    }

    #[test]
    fn test_read_confirmed_password() {
        let password = read_confirmed_password(scripted(&["secret", "secret"])).unwrap();
        assert_eq!(password, "secret");
    }

    #[test]
    fn test_read_confirmed_password_mismatch() {
        let err = read_confirmed_password(scripted(&["secret", "Secret"])).unwrap_err();
        assert_eq!(err.to_string(), "passwords don't match");
    }

    #[test]
    fn test_read_confirmed_password_short_input() {
        assert!(read_confirmed_password(scripted(&["secret"])).is_err());
    }

    #[test]
    fn test_cli_hash_arguments() {
        let cli = Cli::try_parse_from([
            "scrape_auth",
            "hash",
            "--algorithm",
            "PBKDF2WithHmacSHA256",
            "--salt",
            "salt",
            "--iterations",
            "1000",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Hash {
                algorithm,
                iterations,
                key_length,
                ..
            }) => {
                assert_eq!(algorithm, "PBKDF2WithHmacSHA256");
                assert_eq!(iterations, Some(1000));
                assert_eq!(key_length, None);
            }
            _ => panic!("expected hash command"),
        }
        assert!(Cli::try_parse_from(["scrape_auth"]).unwrap().command.is_none());
    }
}
