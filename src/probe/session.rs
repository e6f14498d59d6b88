use crate::config::BrowserConfig;
use crate::probe::wait::PageView;
use crate::{Error, Result};
use eoka::{Browser, Page};
use tracing::{debug, warn};

/// One browser engine instance, exclusively owned by a single probe
/// invocation. Closing consumes the session, so release happens at most once.
pub struct Session {
    browser: Browser,
    page: Page,
}

impl Session {
    /// Launch the browser and open a blank page.
    ///
    /// Launch failures are reported as [`Error::Launch`] so the scheduler can
    /// tell an infrastructure problem apart from a site-side change.
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let stealth = eoka::StealthConfig {
            headless: config.headless,
            proxy: config.proxy.clone(),
            user_agent: config.user_agent.clone(),
            viewport_width: config.viewport.as_ref().map(|v| v.width).unwrap_or(1280),
            viewport_height: config.viewport.as_ref().map(|v| v.height).unwrap_or(720),
            ..Default::default()
        };

        debug!(
            "Launching browser (headless: {}, proxy: {:?})",
            config.headless, config.proxy
        );
        let browser = Browser::launch_with_config(stealth)
            .await
            .map_err(|e| Error::Launch(e.to_string()))?;
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| Error::Launch(e.to_string()))?;

        Ok(Self { browser, page })
    }

    /// The page this session drives.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navigate the page to a URL.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        Ok(())
    }

    /// Close the browser. Shutdown failures are logged, never propagated:
    /// release runs on every exit path and must not mask the probe outcome.
    pub async fn close(self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {}", e);
        }
    }
}

impl PageView for Session {
    async fn current_url(&self) -> Result<String> {
        Ok(self.page.url().await?)
    }

    async fn page_text(&self) -> Result<String> {
        Ok(self.page.text().await?)
    }
}
