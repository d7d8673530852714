//! The fixed verification sequences the binaries run.

use crate::browser::BrowserSession;
use crate::checkpoint::CheckpointRecorder;
use crate::errors::Result;
use crate::locator::Locator;
use crate::types::TargetConfig;
use std::time::Duration;
use tracing::info;

const VALID_EMAIL: &str = "madalamanikanta7075@gmail.com";
const VALID_PASSWORD: &str = "madalamani@7075";
const BAD_EMAIL: &str = "nobody@example.com";
const BAD_PASSWORD: &str = "definitely-wrong";

// The error toast has no stable accessible name to wait on, so the
// login-error flow settles on a fixed delay before capturing.
const ERROR_SETTLE_MS: u64 = 2000;
const SUGGESTION_SETTLE_MS: u64 = 1000;

/// Landing page, then the auth page reached through the "Sign In" link.
pub async fn verify_auth_flow(
    session: &BrowserSession,
    recorder: &CheckpointRecorder,
    target: &TargetConfig,
) -> Result<()> {
    info!(session = %session.id(), "capturing auth flow");

    session.navigate(&target.page_url("/")).await?;
    recorder.capture(session, "01_landing_page").await?;

    session.click(&Locator::role("link", "Sign In")).await?;
    session
        .wait_for_url(&target.page_url("/auth"), target.url_wait_ms)
        .await?;
    recorder.capture(session, "02_auth_page").await?;

    Ok(())
}

/// Auth form submitted with bad credentials, captured once the error has
/// had time to render.
pub async fn verify_login_error(
    session: &BrowserSession,
    recorder: &CheckpointRecorder,
    target: &TargetConfig,
) -> Result<()> {
    info!(session = %session.id(), "capturing login error");

    submit_sign_in(session, target, BAD_EMAIL, BAD_PASSWORD).await?;

    tokio::time::sleep(Duration::from_millis(ERROR_SETTLE_MS)).await;
    recorder.capture(session, "03_login_error").await?;

    Ok(())
}

/// Dashboard after a successful login, then again after asking the AI
/// coach for a new study path.
pub async fn verify_dashboard_login(
    session: &BrowserSession,
    recorder: &CheckpointRecorder,
    target: &TargetConfig,
) -> Result<()> {
    info!(session = %session.id(), "capturing dashboard after login");

    submit_sign_in(session, target, VALID_EMAIL, VALID_PASSWORD).await?;

    session
        .wait_for_url(&target.page_url("/dashboard"), target.login_wait_ms)
        .await?;
    recorder.capture(session, "04_dashboard_after_login").await?;

    session
        .click(&Locator::role("button", "Generate Study Path"))
        .await?;
    tokio::time::sleep(Duration::from_millis(SUGGESTION_SETTLE_MS)).await;
    recorder
        .capture(session, "05_dashboard_new_suggestion")
        .await?;

    Ok(())
}

// Walks from the landing page through the auth form and submits it.
async fn submit_sign_in(
    session: &BrowserSession,
    target: &TargetConfig,
    email: &str,
    password: &str,
) -> Result<()> {
    session.navigate(&target.page_url("/")).await?;

    session.click(&Locator::role("link", "Sign In")).await?;
    session
        .wait_for_url(&target.page_url("/auth"), target.url_wait_ms)
        .await?;

    session.fill(&Locator::label("Email"), email).await?;
    session.fill(&Locator::label("Password"), password).await?;
    session.click(&Locator::role("button", "Sign In")).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BrowserConfig;
    use std::path::PathBuf;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("verishot-flow-{}", uuid::Uuid::new_v4()))
    }

    // Integration test; needs Chrome and the application serving
    // http://127.0.0.1:8080.
    #[tokio::test]
    #[ignore] // run with: cargo test -- --ignored
    async fn auth_flow_produces_both_checkpoints() {
        let dir = scratch_dir();
        let target = TargetConfig {
            artifact_dir: dir.clone(),
            ..Default::default()
        };
        let session = BrowserSession::launch(BrowserConfig::default())
            .await
            .expect("Failed to launch browser");
        let recorder = CheckpointRecorder::new(&target.artifact_dir);

        verify_auth_flow(&session, &recorder, &target).await.unwrap();

        assert!(recorder.artifact_path("01_landing_page").exists());
        assert!(recorder.artifact_path("02_auth_page").exists());

        session.close().await.unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
