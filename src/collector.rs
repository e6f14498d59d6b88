//! Telemetry emitter: one bounded POST of the serialized result.

use crate::config::CollectorConfig;
use crate::report::ProbeResult;
use crate::{Error, Result};
use tracing::{debug, info};

/// POST the result to the collector. One attempt, bounded by the configured
/// timeout; network errors, timeouts, and non-success statuses all map to
/// [`Error::Emission`]. The caller logs the failure; the probe's own
/// determination already stands and is never mutated here.
pub async fn emit(collector: &CollectorConfig, result: &ProbeResult) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(collector.timeout())
        .build()
        .map_err(|e| Error::Emission(e.to_string()))?;

    debug!("Posting result to collector: {}", collector.url);
    let response = client
        .post(&collector.url)
        .json(result)
        .send()
        .await
        .map_err(|e| Error::Emission(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Emission(format!(
            "collector returned {}",
            status
        )));
    }

    info!("Result emitted to collector ({})", status);
    Ok(())
}
