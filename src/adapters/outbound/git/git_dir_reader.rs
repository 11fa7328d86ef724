use crate::ports::outbound::CommitReader;
use crate::shared::Result;
use anyhow::{anyhow, bail, Context};
use std::fs;
use std::path::{Path, PathBuf};

const GITDIR_PREFIX: &str = "gitdir:";
const SYMREF_PREFIX: &str = "ref:";
/// Symbolic refs pointing at symbolic refs are legal but rare; stop cycles here
const MAX_SYMREF_DEPTH: usize = 5;

/// GitDirReader adapter - resolves HEAD by reading the `.git` directory
///
/// Handles detached heads, loose refs, `packed-refs`, `gitdir:` indirection
/// files (submodules, worktrees) and the `commondir` of linked worktrees.
/// No objects are read.
pub struct GitDirReader;

impl GitDirReader {
    pub fn new() -> Self {
        Self
    }

    /// Locates the git directory of a working tree
    fn git_dir(repo_dir: &Path) -> Result<PathBuf> {
        let dot_git = repo_dir.join(".git");
        if dot_git.is_dir() {
            return Ok(dot_git);
        }
        if !dot_git.is_file() {
            bail!("{} is not a git repository", repo_dir.display());
        }

        let content = fs::read_to_string(&dot_git)
            .with_context(|| format!("Failed to read {}", dot_git.display()))?;
        let target = content
            .trim()
            .strip_prefix(GITDIR_PREFIX)
            .map(str::trim)
            .with_context(|| format!("{} does not contain a gitdir line", dot_git.display()))?;

        Ok(repo_dir.join(target))
    }

    /// Directory holding shared refs; differs from `git_dir` for linked worktrees
    fn common_dir(git_dir: &Path) -> PathBuf {
        match fs::read_to_string(git_dir.join("commondir")) {
            Ok(content) => git_dir.join(content.trim()),
            Err(_) => git_dir.to_path_buf(),
        }
    }

    fn resolve_ref(git_dir: &Path, refname: &str) -> Result<String> {
        let mut refname = refname.to_string();

        for _ in 0..MAX_SYMREF_DEPTH {
            let value = match Self::read_loose_ref(git_dir, &refname)? {
                Some(value) => value,
                None => return Self::read_packed_ref(git_dir, &refname),
            };
            match value.strip_prefix(SYMREF_PREFIX) {
                Some(next) => refname = next.trim().to_string(),
                None => return Self::validate_hash(&value),
            }
        }

        bail!("Too many levels of symbolic refs resolving {}", refname)
    }

    fn read_loose_ref(git_dir: &Path, refname: &str) -> Result<Option<String>> {
        // Per-worktree refs live in the git dir itself, shared refs in the common dir
        let candidates = [git_dir.join(refname), Self::common_dir(git_dir).join(refname)];
        for path in candidates {
            if path.is_file() {
                let value = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read ref {}", path.display()))?;
                return Ok(Some(value.trim().to_string()));
            }
        }
        Ok(None)
    }

    fn read_packed_ref(git_dir: &Path, refname: &str) -> Result<String> {
        let packed = Self::common_dir(git_dir).join("packed-refs");
        let content = match fs::read_to_string(&packed) {
            Ok(content) => content,
            Err(_) => bail!("Reference {} not found (unborn branch?)", refname),
        };

        content
            .lines()
            .filter(|line| !line.starts_with('#') && !line.starts_with('^'))
            .filter_map(|line| line.split_once(' '))
            .find(|(_, name)| name.trim() == refname)
            .map(|(hash, _)| Self::validate_hash(hash))
            .unwrap_or_else(|| {
                Err(anyhow!("Reference {} not found in {}", refname, packed.display()))
            })
    }

    /// Accepts SHA-1 and SHA-256 object names
    fn validate_hash(value: &str) -> Result<String> {
        let value = value.trim();
        if (value.len() == 40 || value.len() == 64) && value.bytes().all(|b| b.is_ascii_hexdigit())
        {
            Ok(value.to_ascii_lowercase())
        } else {
            bail!("'{}' is not a commit hash", value)
        }
    }
}

impl Default for GitDirReader {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitReader for GitDirReader {
    fn current_commit(&self, repo_dir: &Path) -> Result<String> {
        let git_dir = Self::git_dir(repo_dir)?;
        let head_path = git_dir.join("HEAD");
        let head = fs::read_to_string(&head_path)
            .with_context(|| format!("Failed to read {}", head_path.display()))?;
        let head = head.trim();

        let commit = match head.strip_prefix(SYMREF_PREFIX) {
            Some(refname) => Self::resolve_ref(&git_dir, refname.trim())?,
            None => Self::validate_hash(head)?,
        };

        tracing::debug!(repo = %repo_dir.display(), %commit, "resolved HEAD");
        Ok(commit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const COMMIT_A: &str = "0123456789abcdef0123456789abcdef01234567";
    const COMMIT_B: &str = "fedcba9876543210fedcba9876543210fedcba98";

    fn init_repo(head: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".git/refs/heads")).unwrap();
        fs::write(dir.path().join(".git/HEAD"), head).unwrap();
        dir
    }

    #[test]
    fn test_detached_head() {
        let repo = init_repo(&format!("{}\n", COMMIT_A));
        let commit = GitDirReader::new().current_commit(repo.path()).unwrap();
        assert_eq!(commit, COMMIT_A);
    }

    #[test]
    fn test_loose_ref() {
        let repo = init_repo("ref: refs/heads/main\n");
        fs::write(repo.path().join(".git/refs/heads/main"), format!("{}\n", COMMIT_A)).unwrap();

        let commit = GitDirReader::new().current_commit(repo.path()).unwrap();
        assert_eq!(commit, COMMIT_A);
    }

    #[test]
    fn test_packed_ref() {
        let repo = init_repo("ref: refs/heads/release\n");
        fs::write(
            repo.path().join(".git/packed-refs"),
            format!(
                "# pack-refs with: peeled fully-peeled sorted\n{} refs/heads/main\n{} refs/heads/release\n^{}\n",
                COMMIT_A, COMMIT_B, COMMIT_A
            ),
        )
        .unwrap();

        let commit = GitDirReader::new().current_commit(repo.path()).unwrap();
        assert_eq!(commit, COMMIT_B);
    }

    #[test]
    fn test_gitdir_indirection_file() {
        let root = TempDir::new().unwrap();
        let real_git = root.path().join("modules/lib");
        fs::create_dir_all(real_git.join("refs/heads")).unwrap();
        fs::write(real_git.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        fs::write(real_git.join("refs/heads/main"), COMMIT_B).unwrap();

        let checkout = root.path().join("lib");
        fs::create_dir_all(&checkout).unwrap();
        fs::write(checkout.join(".git"), "gitdir: ../modules/lib\n").unwrap();

        let commit = GitDirReader::new().current_commit(&checkout).unwrap();
        assert_eq!(commit, COMMIT_B);
    }

    #[test]
    fn test_unborn_branch_is_an_error() {
        let repo = init_repo("ref: refs/heads/main\n");
        let err = GitDirReader::new().current_commit(repo.path()).unwrap_err();
        assert!(err.to_string().contains("refs/heads/main not found"));
    }

    #[test]
    fn test_not_a_repository() {
        let dir = TempDir::new().unwrap();
        let err = GitDirReader::new().current_commit(dir.path()).unwrap_err();
        assert!(err.to_string().contains("is not a git repository"));
    }

    #[test]
    fn test_garbage_head_is_rejected() {
        let repo = init_repo("not-a-hash\n");
        let err = GitDirReader::new().current_commit(repo.path()).unwrap_err();
        assert!(err.to_string().contains("is not a commit hash"));
    }
}
