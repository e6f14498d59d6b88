//! Probe orchestration: session → form submit → outcome wait → classify.

pub mod login;
pub mod session;
pub mod wait;

use crate::config::Config;
use crate::report::{self, ProbeResult};
use crate::Result;
use chrono::Utc;
use session::Session;
use tracing::info;
use wait::{classify, wait_for_outcome, TerminalState};

/// Outcome of one probe invocation: the record to emit plus the terminal
/// state that ended the wait. The state is kept for logging and the process
/// exit code; the emitted schema carries only the boolean.
#[derive(Debug)]
pub struct ProbeReport {
    pub result: ProbeResult,
    pub state: TerminalState,
}

/// Run one end-to-end probe invocation.
///
/// Launch and form failures abort without a result; a timed-out wait is a
/// state, not an error, and still produces one. The browser session is closed
/// on every exit path before any error propagates.
pub async fn run(config: &Config) -> Result<ProbeReport> {
    let host = report::local_host()?;

    let session = Session::launch(&config.browser).await?;
    let driven = drive(&session, config).await;
    session.close().await;
    let (state, final_text) = driven?;

    let success = classify(&final_text, &config.signals.dashboard);
    info!(%state, success, "Probe finished");

    let result = ProbeResult::build(
        &host,
        &config.website,
        &config.target.url,
        Utc::now(),
        success,
    );
    Ok(ProbeReport { result, state })
}

async fn drive(session: &Session, config: &Config) -> Result<(TerminalState, String)> {
    info!("Navigating to: {}", config.target.url);
    session.goto(&config.target.url).await?;

    login::submit(session.page(), &config.form, &config.credentials).await?;

    wait_for_outcome(
        session,
        &config.target.url,
        &config.signals,
        config.wait.deadline(),
        config.wait.poll(),
    )
    .await
}
