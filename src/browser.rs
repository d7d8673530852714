use crate::errors::{Result, VerifyError};
use crate::locator::{js_string, Locator};
use crate::types::BrowserConfig;
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

/// How long interactions wait for their target element to appear.
pub const DEFAULT_ELEMENT_TIMEOUT_MS: u64 = 5000;

const POLL_INTERVAL_MS: u64 = 100;

pub struct BrowserSession {
    browser: Browser,
    tab: Arc<Tab>,
    session_id: String,
}

impl BrowserSession {
    pub async fn launch(config: BrowserConfig) -> Result<Self> {
        // Create strings first to ensure they live long enough
        let window_size_arg = format!(
            "--window-size={},{}",
            config.viewport.width, config.viewport.height
        );
        let user_agent_arg = config
            .user_agent
            .as_ref()
            .map(|ua| format!("--user-agent={}", ua));

        let mut args = vec![
            OsStr::new("--no-sandbox"),
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new(&window_size_arg),
        ];

        if let Some(ref ua_arg) = user_agent_arg {
            args.push(OsStr::new(ua_arg));
        }

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .args(args)
            .build()
            .map_err(|e| VerifyError::LaunchFailed(e.to_string()))?;

        let browser =
            Browser::new(launch_options).map_err(|e| VerifyError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| VerifyError::LaunchFailed(e.to_string()))?;

        let session_id = uuid::Uuid::new_v4().to_string();
        info!(session = %session_id, headless = config.headless, "browser session launched");

        Ok(Self {
            browser,
            tab,
            session_id,
        })
    }

    pub fn id(&self) -> &str {
        &self.session_id
    }

    pub async fn navigate(&self, url: &str) -> Result<()> {
        debug!(session = %self.session_id, url, "navigating");

        self.tab
            .navigate_to(url)
            .map_err(|e| VerifyError::NavigationFailed(e.to_string()))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| VerifyError::NavigationFailed(e.to_string()))?;

        Ok(())
    }

    pub fn current_url(&self) -> String {
        self.tab.get_url()
    }

    pub async fn click(&self, locator: &Locator) -> Result<()> {
        let js = format!(
            r#"
            (function() {{
                const target = {query};
                if (!target) return false;
                target.scrollIntoView({{ block: 'center' }});
                target.click();
                return true;
            }})()
            "#,
            query = locator.query_js()
        );

        self.act(&js, locator, DEFAULT_ELEMENT_TIMEOUT_MS).await?;
        debug!(session = %self.session_id, target = %locator, "clicked");
        Ok(())
    }

    pub async fn fill(&self, locator: &Locator, value: &str) -> Result<()> {
        let js = format!(
            r#"
            (function() {{
                const target = {query};
                if (!target) return false;
                target.focus();
                // assign through the native setter so framework-controlled
                // inputs observe the new value
                const proto = target instanceof HTMLTextAreaElement
                    ? HTMLTextAreaElement.prototype
                    : HTMLInputElement.prototype;
                Object.getOwnPropertyDescriptor(proto, 'value').set.call(target, '{value}');
                target.dispatchEvent(new Event('input', {{ bubbles: true }}));
                target.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()
            "#,
            query = locator.query_js(),
            value = js_string(value)
        );

        self.act(&js, locator, DEFAULT_ELEMENT_TIMEOUT_MS).await?;
        debug!(session = %self.session_id, target = %locator, "filled");
        Ok(())
    }

    // Re-runs the interaction script until it reports success or the
    // element deadline passes.
    async fn act(&self, js: &str, locator: &Locator, timeout_ms: u64) -> Result<()> {
        let start = Instant::now();
        let timeout = Duration::from_millis(timeout_ms);

        loop {
            let result = self
                .tab
                .evaluate(js, false)
                .map_err(|e| VerifyError::JavaScriptFailed(e.to_string()))?;

            if let Some(value) = result.value {
                if value.as_bool() == Some(true) {
                    return Ok(());
                }
            }

            if start.elapsed() >= timeout {
                return Err(VerifyError::ElementNotFound(locator.to_string()));
            }

            tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
        }
    }

    /// Waits until the page URL equals `expected`, comparing normalized URLs.
    pub async fn wait_for_url(&self, expected: &str, timeout_ms: u64) -> Result<()> {
        let expected_url = Url::parse(expected)?;
        let start = Instant::now();
        let timeout = Duration::from_millis(timeout_ms);

        loop {
            let current = self.current_url();
            if Url::parse(&current)
                .map(|u| u == expected_url)
                .unwrap_or(false)
            {
                debug!(session = %self.session_id, url = %current, "url reached");
                return Ok(());
            }

            if start.elapsed() >= timeout {
                return Err(VerifyError::UrlMismatch {
                    expected: expected.to_string(),
                    actual: current,
                });
            }

            tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
        }
    }

    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        self.tab
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| VerifyError::ScreenshotFailed(e.to_string()))
    }

    /// Closes the tab and releases the browser process.
    pub async fn close(self) -> Result<()> {
        info!(session = %self.session_id, "closing browser session");
        let _ = self.tab.close(false);
        drop(self.browser);
        Ok(())
    }
}
