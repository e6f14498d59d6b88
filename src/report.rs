use crate::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Tag identifying this probe kind in the collector's schema.
pub const TEST_TYPE: &str = "bot-login";

/// Tag identifying the metric family in the collector's schema.
pub const METRIC_TYPE: &str = "web_automation";

/// The event record emitted to the collector. Immutable once built; exactly
/// one is produced per probe invocation that reaches the wait loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Local machine identifier.
    pub host: String,
    /// Short label for the monitored site.
    pub website: String,
    /// Login page URL that was probed.
    pub website_url: String,
    /// ISO-8601 UTC wall-clock time the probe completed.
    pub timestamp: String,
    /// Redundant coarse timestamp for consumers that prefer numeric time.
    pub epoch_seconds: i64,
    /// Classifier outcome.
    pub success: bool,
    pub test_type: String,
    pub metric_type: String,
}

impl ProbeResult {
    /// Assemble the record. Pure: no side effects, no failure modes.
    pub fn build(
        host: &str,
        website: &str,
        website_url: &str,
        completed_at: DateTime<Utc>,
        success: bool,
    ) -> Self {
        Self {
            host: host.to_string(),
            website: website.to_string(),
            website_url: website_url.to_string(),
            timestamp: completed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            epoch_seconds: completed_at.timestamp(),
            success,
            test_type: TEST_TYPE.to_string(),
            metric_type: METRIC_TYPE.to_string(),
        }
    }
}

/// Resolve the local machine identifier. Failures abort the invocation before
/// a browser is ever launched.
pub fn local_host() -> Result<String> {
    let name = hostname::get()?;
    Ok(name.to_string_lossy().into_owned())
}
