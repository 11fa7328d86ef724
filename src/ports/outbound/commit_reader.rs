use crate::shared::Result;
use std::path::Path;

/// CommitReader port - reads the checked-out commit of a repository
pub trait CommitReader {
    /// Returns the full hash of the commit currently checked out in `repo_dir`
    ///
    /// # Arguments
    /// * `repo_dir` - Working tree root (the directory containing `.git`)
    ///
    /// # Errors
    /// Returns an error if the repository cannot be opened or HEAD cannot be resolved
    fn current_commit(&self, repo_dir: &Path) -> Result<String>;
}
