use verishot::{flows, BrowserConfig, BrowserSession, CheckpointRecorder, TargetConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("🚀 Capturing the sign-in auth flow...");

    let target = TargetConfig::default();
    let session = BrowserSession::launch(BrowserConfig::default()).await?;
    let recorder = CheckpointRecorder::new(&target.artifact_dir);

    flows::verify_auth_flow(&session, &recorder, &target).await?;

    session.close().await?;
    println!("✅ Landing page and auth page captured");

    Ok(())
}
