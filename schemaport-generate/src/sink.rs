//! Destinations for rendered artifacts.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::action::Action;
use crate::error::GenerateResult;

/// Receives one artifact per action and packages them.
#[async_trait]
pub trait OutputSink: Send + Sync {
    /// Store the artifact of one action, returning where it went.
    async fn write(
        &self,
        execution_id: Uuid,
        action: Action,
        data: &str,
    ) -> GenerateResult<Option<PathBuf>>;

    /// Called once after every action was written.
    async fn finish(&self, execution_id: Uuid) -> GenerateResult<Option<PathBuf>>;
}

/// Writes `<root>/<execution_id>/<action>.sql`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// Create a sink rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn execution_dir(&self, execution_id: Uuid) -> PathBuf {
        self.root.join(execution_id.to_string())
    }
}

#[async_trait]
impl OutputSink for DirectorySink {
    async fn write(
        &self,
        execution_id: Uuid,
        action: Action,
        data: &str,
    ) -> GenerateResult<Option<PathBuf>> {
        let dir = self.execution_dir(execution_id);
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(format!("{}.sql", action));
        tokio::fs::write(&path, data).await?;
        debug!(action = %action, path = %path.display(), bytes = data.len(), "Wrote artifact");
        Ok(Some(path))
    }

    async fn finish(&self, execution_id: Uuid) -> GenerateResult<Option<PathBuf>> {
        let dir = self.execution_dir(execution_id);
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Some(dir))
    }
}

/// Keeps artifacts only in the response.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

#[async_trait]
impl OutputSink for NullSink {
    async fn write(&self, _: Uuid, _: Action, _: &str) -> GenerateResult<Option<PathBuf>> {
        Ok(None)
    }

    async fn finish(&self, _: Uuid) -> GenerateResult<Option<PathBuf>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_directory_sink_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(tmp.path());
        let id = Uuid::new_v4();

        let path = sink.write(id, Action::SelectSimple, "SELECT 1;\n").await.unwrap().unwrap();
        assert_eq!(path, tmp.path().join(id.to_string()).join("select_simple.sql"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "SELECT 1;\n");

        let dir = sink.finish(id).await.unwrap().unwrap();
        assert_eq!(dir, tmp.path().join(id.to_string()));
    }

    #[tokio::test]
    async fn test_null_sink() {
        let id = Uuid::new_v4();
        assert!(NullSink.write(id, Action::Create, "x").await.unwrap().is_none());
        assert!(NullSink.finish(id).await.unwrap().is_none());
    }
}
