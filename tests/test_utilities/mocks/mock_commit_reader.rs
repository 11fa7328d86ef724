use osv_scan::prelude::*;
use std::path::Path;

/// Mock CommitReader returning a fixed commit for every repository
pub struct MockCommitReader {
    commit: Option<String>,
}

impl MockCommitReader {
    pub fn returning(commit: &str) -> Self {
        Self {
            commit: Some(commit.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { commit: None }
    }
}

impl CommitReader for MockCommitReader {
    fn current_commit(&self, repo_dir: &Path) -> Result<String> {
        self.commit
            .clone()
            .ok_or_else(|| anyhow::anyhow!("no HEAD in {}", repo_dir.display()))
    }
}
