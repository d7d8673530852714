use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    pub headless: bool,
    pub viewport: Viewport,
    pub user_agent: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport: Viewport {
                width: 1280,
                height: 720,
            },
            user_agent: None,
        }
    }
}

/// The application under verification and where its screenshots go.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub base_url: String,
    pub artifact_dir: PathBuf,
    pub url_wait_ms: u64,
    pub login_wait_ms: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            artifact_dir: PathBuf::from("jules-scratch/verification"),
            url_wait_ms: 5000,
            login_wait_ms: 30000,
        }
    }
}

impl TargetConfig {
    pub fn page_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_defaults_are_headless_1280x720() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert_eq!(config.viewport.width, 1280);
        assert_eq!(config.viewport.height, 720);
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn target_defaults_match_the_deployed_app() {
        let target = TargetConfig::default();
        assert_eq!(target.base_url, "http://127.0.0.1:8080");
        assert_eq!(
            target.artifact_dir,
            PathBuf::from("jules-scratch/verification")
        );
        assert_eq!(target.url_wait_ms, 5000);
        assert_eq!(target.login_wait_ms, 30000);
    }

    #[test]
    fn page_url_appends_the_route() {
        let target = TargetConfig::default();
        assert_eq!(target.page_url("/"), "http://127.0.0.1:8080/");
        assert_eq!(target.page_url("/auth"), "http://127.0.0.1:8080/auth");
    }
}
