//! Outcome wait state machine and classifier.
//!
//! After the form is submitted the page can resolve three ways: a full
//! navigation off the login URL, an in-page block message, or an in-page
//! account message. No single signal is reliable alone, so the wait loop
//! re-checks all three on every tick and treats the first observed signal as
//! authoritative, exiting eagerly instead of waiting out the deadline.

use crate::config::Signals;
use crate::Result;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

/// Read-only view of the current page state, one URL/text pair per poll tick.
///
/// Implemented by the live browser session and by fakes in tests.
pub trait PageView {
    fn current_url(&self) -> impl std::future::Future<Output = Result<String>>;
    fn page_text(&self) -> impl std::future::Future<Output = Result<String>>;
}

/// Terminal state of the wait loop. `Pending` is implicit: the loop keeps
/// polling until one of these holds or the deadline expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    /// Current URL no longer equals the pre-submit login URL.
    NavigatedAway,
    /// Page text contains the block indicator.
    Blocked,
    /// Page text contains the account indicator.
    AccountReached,
    /// No condition held within the deadline.
    TimedOut,
}

impl fmt::Display for TerminalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NavigatedAway => "navigated_away",
            Self::Blocked => "blocked",
            Self::AccountReached => "account_reached",
            Self::TimedOut => "timed_out",
        };
        f.write_str(name)
    }
}

/// Poll the page until a terminal condition holds or the deadline expires.
///
/// Returns the terminal state together with the page text it was observed
/// against, so the classifier sees the same snapshot that ended the wait. The
/// loop checks the deadline after each evaluation, so it overshoots by at most
/// one poll interval.
pub async fn wait_for_outcome<P: PageView>(
    page: &P,
    login_url: &str,
    signals: &Signals,
    deadline: Duration,
    poll: Duration,
) -> Result<(TerminalState, String)> {
    let blocked = signals.blocked.to_lowercase();
    let account = signals.account.to_lowercase();

    let started = Instant::now();
    loop {
        let url = page.current_url().await?;
        let text = page.page_text().await?;

        if let Some(state) = evaluate(&url, &text, login_url, &blocked, &account) {
            debug!(%state, elapsed_ms = started.elapsed().as_millis() as u64, "terminal condition observed");
            return Ok((state, text));
        }

        if started.elapsed() >= deadline {
            debug!(elapsed_ms = started.elapsed().as_millis() as u64, "wait deadline expired");
            return Ok((TerminalState::TimedOut, text));
        }

        tokio::time::sleep(poll).await;
    }
}

/// Evaluate the terminal predicates in fixed priority order:
/// NavigatedAway, then Blocked, then AccountReached.
///
/// `blocked` and `account` must already be lowercased; only the page text is
/// lowercased here, once per tick.
fn evaluate(
    url: &str,
    text: &str,
    login_url: &str,
    blocked: &str,
    account: &str,
) -> Option<TerminalState> {
    if url != login_url {
        return Some(TerminalState::NavigatedAway);
    }
    let text = text.to_lowercase();
    if text.contains(blocked) {
        return Some(TerminalState::Blocked);
    }
    if text.contains(account) {
        return Some(TerminalState::AccountReached);
    }
    None
}

/// Classify the probe outcome from the final page text.
///
/// Success iff the authenticated-dashboard indicator appears, regardless of
/// which terminal state ended the wait: a slow-but-successful login can still
/// show the dashboard after a timeout, and a block page that somehow renders
/// it still counts as reaching the authenticated view.
pub fn classify(final_text: &str, dashboard_indicator: &str) -> bool {
    final_text.contains(dashboard_indicator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const LOGIN_URL: &str = "https://login.example.com/auth";

    /// Fake page that replays a scripted sequence of (url, text) states, one
    /// per poll tick, holding the last state once the script runs out.
    struct FakePage {
        states: Vec<(String, String)>,
        tick: Mutex<usize>,
    }

    impl FakePage {
        fn new(states: &[(&str, &str)]) -> Self {
            Self {
                states: states
                    .iter()
                    .map(|(u, t)| (u.to_string(), t.to_string()))
                    .collect(),
                tick: Mutex::new(0),
            }
        }

        fn stuck(url: &str, text: &str) -> Self {
            Self::new(&[(url, text)])
        }
    }

    impl PageView for FakePage {
        async fn current_url(&self) -> crate::Result<String> {
            let mut tick = self.tick.lock().unwrap();
            let i = (*tick).min(self.states.len() - 1);
            *tick += 1;
            Ok(self.states[i].0.clone())
        }

        async fn page_text(&self) -> crate::Result<String> {
            let tick = self.tick.lock().unwrap();
            let i = tick.saturating_sub(1).min(self.states.len() - 1);
            Ok(self.states[i].1.clone())
        }
    }

    fn signals() -> Signals {
        Signals::default()
    }

    fn short() -> (Duration, Duration) {
        (Duration::from_millis(50), Duration::from_millis(2))
    }

    #[tokio::test]
    async fn test_navigated_away_is_terminal() {
        let page = FakePage::stuck("https://login.example.com/home", "Welcome");
        let (deadline, poll) = short();
        let (state, text) = wait_for_outcome(&page, LOGIN_URL, &signals(), deadline, poll)
            .await
            .unwrap();
        assert_eq!(state, TerminalState::NavigatedAway);
        assert_eq!(text, "Welcome");
    }

    #[tokio::test]
    async fn test_blocked_is_terminal() {
        let page = FakePage::stuck(LOGIN_URL, "Your access has been BLOCKED by policy");
        let (deadline, poll) = short();
        let (state, _) = wait_for_outcome(&page, LOGIN_URL, &signals(), deadline, poll)
            .await
            .unwrap();
        assert_eq!(state, TerminalState::Blocked);
    }

    #[tokio::test]
    async fn test_account_is_terminal_case_insensitive() {
        let page = FakePage::stuck(LOGIN_URL, "Your Account overview");
        let (deadline, poll) = short();
        let (state, _) = wait_for_outcome(&page, LOGIN_URL, &signals(), deadline, poll)
            .await
            .unwrap();
        assert_eq!(state, TerminalState::AccountReached);
    }

    #[tokio::test]
    async fn test_indicator_case_insensitive_both_sides() {
        // Matching is case-insensitive on the indicator as well as the page
        // text: the indicators are lowercased once up front, the text once
        // per tick.
        let signals = Signals {
            blocked: "BlOcKeD".into(),
            ..Signals::default()
        };
        let page = FakePage::stuck(LOGIN_URL, "request Blocked");
        let (deadline, poll) = short();
        let (state, _) = wait_for_outcome(&page, LOGIN_URL, &signals, deadline, poll)
            .await
            .unwrap();
        assert_eq!(state, TerminalState::Blocked);
    }

    #[tokio::test]
    async fn test_blocked_wins_over_account_in_same_text() {
        // Both in-page indicators present on the same tick: the fixed
        // priority order reports Blocked.
        let page = FakePage::stuck(LOGIN_URL, "account temporarily blocked");
        let (deadline, poll) = short();
        let (state, _) = wait_for_outcome(&page, LOGIN_URL, &signals(), deadline, poll)
            .await
            .unwrap();
        assert_eq!(state, TerminalState::Blocked);
    }

    #[tokio::test]
    async fn test_navigation_wins_over_page_text() {
        let page = FakePage::stuck("https://login.example.com/next", "account blocked");
        let (deadline, poll) = short();
        let (state, _) = wait_for_outcome(&page, LOGIN_URL, &signals(), deadline, poll)
            .await
            .unwrap();
        assert_eq!(state, TerminalState::NavigatedAway);
    }

    #[tokio::test]
    async fn test_pending_ticks_then_terminal() {
        let page = FakePage::new(&[
            (LOGIN_URL, "Signing you in"),
            (LOGIN_URL, "Signing you in"),
            (LOGIN_URL, "request blocked"),
        ]);
        let (deadline, poll) = short();
        let (state, text) = wait_for_outcome(&page, LOGIN_URL, &signals(), deadline, poll)
            .await
            .unwrap();
        assert_eq!(state, TerminalState::Blocked);
        assert_eq!(text, "request blocked");
    }

    #[tokio::test]
    async fn test_timeout_when_nothing_fires() {
        let page = FakePage::stuck(LOGIN_URL, "Please sign on");
        let deadline = Duration::from_millis(30);
        let poll = Duration::from_millis(5);
        let started = Instant::now();
        let (state, text) = wait_for_outcome(&page, LOGIN_URL, &signals(), deadline, poll)
            .await
            .unwrap();
        let elapsed = started.elapsed();
        assert_eq!(state, TerminalState::TimedOut);
        assert_eq!(text, "Please sign on");
        assert!(elapsed >= deadline);
        // Overshoot is bounded by one poll interval (plus scheduler slack).
        assert!(
            elapsed < deadline + poll + Duration::from_millis(250),
            "wait loop overshot the deadline: {:?}",
            elapsed
        );
    }

    #[test]
    fn test_classify_dashboard_present() {
        assert!(classify("Welcome to your Dashboard", "Dashboard"));
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert!(!classify("go to your dashboard", "Dashboard"));
    }

    #[test]
    fn test_classify_independent_of_block_indicator() {
        // Blocked text that still renders the dashboard classifies as success.
        assert!(classify("blocked banner ... Dashboard", "Dashboard"));
        assert!(!classify("access blocked", "Dashboard"));
    }
}
