//! # login-probe
//!
//! Synthetic login monitoring. Drives a headless browser through a third-party
//! login flow, classifies the outcome, and posts a structured event to a
//! telemetry collector.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use login_probe::{collector, probe, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> login_probe::Result<()> {
//! let config = Config::load("probe.yaml")?;
//! let report = probe::run(&config).await?;
//! println!("Success: {}", report.result.success);
//! collector::emit(&config.collector, &report.result).await?;
//! # Ok(())
//! # }
//! ```

mod config;
pub mod collector;
pub mod probe;
pub mod report;

pub use config::{
    BrowserConfig, CollectorConfig, Config, Credentials, FormSelectors, Signals, TargetUrl,
    WaitConfig,
};
pub use probe::wait::{classify, PageView, TerminalState};
pub use probe::ProbeReport;
pub use report::ProbeResult;

/// Result type for login-probe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during config loading or a probe invocation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("browser launch failed: {0}")]
    Launch(String),

    #[error("login form element not found: {0}")]
    ElementNotFound(String),

    #[error("browser error: {0}")]
    Browser(#[from] eoka::Error),

    #[error("telemetry emission failed: {0}")]
    Emission(String),
}
