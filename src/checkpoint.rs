use crate::browser::BrowserSession;
use crate::errors::Result;
use std::path::PathBuf;
use tracing::info;

/// Writes screenshot checkpoints under a fixed artifact directory.
pub struct CheckpointRecorder {
    dir: PathBuf,
}

impl CheckpointRecorder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.png", name))
    }

    /// Captures the current page and persists it as `<dir>/<name>.png`.
    pub async fn capture(&self, session: &BrowserSession, name: &str) -> Result<PathBuf> {
        let bytes = session.screenshot().await?;
        self.write(name, &bytes).await
    }

    /// Writes checkpoint bytes, replacing any artifact from a previous run.
    pub async fn write(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.artifact_path(name);
        tokio::fs::write(&path, bytes).await?;

        info!(path = %path.display(), size = bytes.len(), "checkpoint saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("verishot-test-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn artifact_paths_are_named_pngs() {
        let recorder = CheckpointRecorder::new("jules-scratch/verification");
        assert_eq!(
            recorder.artifact_path("01_landing_page"),
            PathBuf::from("jules-scratch/verification/01_landing_page.png")
        );
    }

    #[tokio::test]
    async fn write_creates_the_artifact_directory() {
        let dir = scratch_dir().join("nested");
        let recorder = CheckpointRecorder::new(&dir);

        let path = recorder.write("01_landing_page", b"png").await.unwrap();
        assert!(path.exists());

        std::fs::remove_dir_all(dir.parent().unwrap()).unwrap();
    }

    #[tokio::test]
    async fn rewriting_a_checkpoint_overwrites_the_artifact() {
        let dir = scratch_dir();
        let recorder = CheckpointRecorder::new(&dir);

        recorder.write("03_login_error", b"first").await.unwrap();
        let path = recorder.write("03_login_error", b"second").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second".to_vec());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
