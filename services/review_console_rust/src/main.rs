//! Review Console Rust Service
//!
//! Operator console for the admin pick-review workflow.
//!
//! This service:
//! - Signs in against the staking backend with a bounded auth flow
//! - Polls the pending/published review queue and reconciles the draft
//! - Applies operator edits from stdin line commands
//! - Auto-saves the draft after a quiescence window, publishes on demand
//! - Fetches daily picks from the Football-AI service for generation
//!
//! Single-threaded event loop: stdin commands, the refresh tick, and the
//! auto-save deadline are multiplexed through one `tokio::select!`.

mod commands;
mod config;

use anyhow::Result;
use async_trait::async_trait;
use dotenv::dotenv;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::{Command, Flow};
use config::Config;
use review_core::auth::{AuthFlow, SessionHandle, SignInOutcome, TokenProvider};
use review_core::clients::{BackendClient, FootballAiClient};
use review_core::error::ReviewError;
use review_core::ReviewSession;

/// Headless stand-in for the wallet provider: the credential comes from the
/// environment instead of an interactive wallet.
struct EnvTokenProvider {
    token: Option<String>,
}

#[async_trait]
impl TokenProvider for EnvTokenProvider {
    async fn access_token(&self) -> Result<Option<String>, ReviewError> {
        Ok(self.token.clone())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("Starting Review Console Service...");

    let config = Config::from_env();
    let session_handle = SessionHandle::new();
    let backend = BackendClient::new(config.backend_url.clone(), session_handle.clone());
    let football_ai = FootballAiClient::new(config.football_ai_url.clone());

    let auth = AuthFlow::new(
        Arc::new(EnvTokenProvider {
            token: config.admin_token.clone(),
        }),
        backend.clone(),
    );
    match auth.sign_in().await {
        Ok(SignInOutcome::Authenticated(user)) => {
            info!(user_id = %user.id, admin = user.is_admin, "signed in");
        }
        Ok(SignInOutcome::Unauthenticated { reason }) => {
            warn!("running unauthenticated: {}", reason.as_str());
        }
        Err(e) => {
            warn!("sign-in failed, running unauthenticated: {e}");
        }
    }

    let mut session = ReviewSession::with_quiescence(Arc::new(backend), config.quiescence_window);
    session.refresh().await;
    info!(
        pending = session.pending().len(),
        published = session.published().len(),
        "review queue loaded"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut refresh = tokio::time::interval(config.refresh_interval);
    refresh.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    refresh.tick().await;

    loop {
        let deadline = session.next_autosave_deadline();
        tokio::select! {
            maybe_line = lines.next_line() => {
                let Some(line) = maybe_line? else { break };
                match Command::parse(&line) {
                    Ok(command) => {
                        if commands::execute(&mut session, &football_ai, command).await == Flow::Quit {
                            break;
                        }
                    }
                    Err(message) => println!("{message}"),
                }
            }
            _ = refresh.tick() => {
                session.refresh().await;
            }
            _ = autosave_wait(deadline) => {
                session.flush_if_due().await;
            }
        }
    }

    info!("Review console shutting down");
    Ok(())
}

/// Sleep until the auto-save deadline, or forever when nothing is scheduled.
async fn autosave_wait(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
