use crate::shared::paths::absolute_normalized;
use crate::shared::Result;
use anyhow::Context;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const GITIGNORE_FILENAME: &str = ".gitignore";
const GIT_DIR: &str = ".git";

/// PathMatcher - git-ignore exclusion rooted at a repository boundary
///
/// The root `.gitignore` and `.git/info/exclude` are compiled up front;
/// `.gitignore` files in subdirectories are compiled the first time a path
/// below them is matched. A deeper file overrides a shallower one, as git does.
pub struct PathMatcher {
    repo_root: PathBuf,
    root_ignore: Gitignore,
    nested: RefCell<HashMap<PathBuf, Option<Gitignore>>>,
}

impl PathMatcher {
    /// Builds a matcher for the repository enclosing `start`
    ///
    /// Falls back to `start` itself when no enclosing directory holds a `.git`.
    ///
    /// # Errors
    /// Returns an error if `start` cannot be made absolute or a root ignore
    /// file cannot be read or compiled
    pub fn for_directory(start: &Path) -> Result<Self> {
        let start = absolute_normalized(start)
            .with_context(|| format!("Failed to resolve {}", start.display()))?;
        let repo_root = find_repo_root(&start).unwrap_or(start);

        let mut builder = GitignoreBuilder::new(&repo_root);
        let candidates = [
            repo_root.join(GIT_DIR).join("info").join("exclude"),
            repo_root.join(GITIGNORE_FILENAME),
        ];
        for file in candidates.iter().filter(|file| file.is_file()) {
            if let Some(err) = builder.add(file) {
                return Err(anyhow::anyhow!("{}: {}", file.display(), err));
            }
        }
        let root_ignore = builder
            .build()
            .with_context(|| format!("Failed to compile ignore patterns in {}", repo_root.display()))?;

        tracing::debug!(
            root = %repo_root.display(),
            patterns = root_ignore.num_ignores() + root_ignore.num_whitelists(),
            "compiled root ignore patterns"
        );

        Ok(Self {
            repo_root,
            root_ignore,
            nested: RefCell::new(HashMap::new()),
        })
    }

    /// Directory all patterns are relative to
    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Returns true if `path` (absolute) is excluded by the ignore rules
    ///
    /// The repository root itself is never excluded.
    ///
    /// # Errors
    /// Returns an error if `path` lies outside the repository root, or if a
    /// nested ignore file along the way cannot be compiled (reported once; the
    /// broken file is disregarded afterwards)
    pub fn is_excluded(&self, path: &Path, is_dir: bool) -> Result<bool> {
        let relative = path.strip_prefix(&self.repo_root).with_context(|| {
            format!(
                "{} is outside of {}",
                path.display(),
                self.repo_root.display()
            )
        })?;
        if relative.as_os_str().is_empty() {
            return Ok(false);
        }

        let mut verdict = decision(&self.root_ignore, path, is_dir);

        let mut dir = self.repo_root.clone();
        if let Some(parent) = relative.parent() {
            for component in parent.components() {
                dir.push(component);
                if let Some(nested) = self.nested_decision(&dir, path, is_dir)? {
                    verdict = Some(nested);
                }
            }
        }

        Ok(verdict.unwrap_or(false))
    }

    fn nested_decision(&self, dir: &Path, path: &Path, is_dir: bool) -> Result<Option<bool>> {
        let mut cache = self.nested.borrow_mut();
        if !cache.contains_key(dir) {
            match load_nested(dir) {
                Ok(ignore) => {
                    cache.insert(dir.to_path_buf(), ignore);
                }
                Err(e) => {
                    cache.insert(dir.to_path_buf(), None);
                    return Err(e);
                }
            }
        }

        Ok(cache
            .get(dir)
            .and_then(Option::as_ref)
            .and_then(|ignore| decision(ignore, path, is_dir)))
    }
}

/// `Some(true)` ignore, `Some(false)` explicitly re-included, `None` no opinion
fn decision(ignore: &Gitignore, path: &Path, is_dir: bool) -> Option<bool> {
    let matched = ignore.matched(path, is_dir);
    if matched.is_ignore() {
        Some(true)
    } else if matched.is_whitelist() {
        Some(false)
    } else {
        None
    }
}

fn load_nested(dir: &Path) -> Result<Option<Gitignore>> {
    let file = dir.join(GITIGNORE_FILENAME);
    if !file.is_file() {
        return Ok(None);
    }

    let mut builder = GitignoreBuilder::new(dir);
    if let Some(err) = builder.add(&file) {
        return Err(anyhow::anyhow!("{}: {}", file.display(), err));
    }
    let ignore = builder
        .build()
        .with_context(|| format!("Failed to compile {}", file.display()))?;

    tracing::trace!(file = %file.display(), "compiled nested ignore file");
    Ok(Some(ignore))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(GIT_DIR).exists())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        dir
    }

    #[test]
    fn test_root_patterns_exclude_files_and_directories() {
        let dir = repo();
        let root = dir.path();
        fs::write(root.join(".gitignore"), "build/\n*.log\n").unwrap();

        let matcher = PathMatcher::for_directory(root).unwrap();

        assert!(matcher.is_excluded(&root.join("build"), true).unwrap());
        assert!(matcher.is_excluded(&root.join("debug.log"), false).unwrap());
        assert!(matcher.is_excluded(&root.join("src/trace.log"), false).unwrap());
        assert!(!matcher.is_excluded(&root.join("uv.lock"), false).unwrap());
        // Directory-only pattern does not hit a file of the same name
        assert!(!matcher.is_excluded(&root.join("build"), false).unwrap());
    }

    #[test]
    fn test_root_is_found_from_subdirectory() {
        let dir = repo();
        let root = dir.path();
        fs::write(root.join(".gitignore"), "/vendor\n").unwrap();
        fs::create_dir_all(root.join("app/vendor")).unwrap();

        let matcher = PathMatcher::for_directory(&root.join("app")).unwrap();

        assert_eq!(matcher.repo_root(), std::path::absolute(root).unwrap());
        assert!(matcher.is_excluded(&root.join("vendor"), true).unwrap());
        // Anchored pattern only applies at the repository root
        assert!(!matcher.is_excluded(&root.join("app/vendor"), true).unwrap());
    }

    #[test]
    fn test_parent_components_in_start_are_folded() {
        let dir = repo();
        let root = dir.path();
        fs::create_dir_all(root.join("app")).unwrap();

        let matcher = PathMatcher::for_directory(&root.join("app/..")).unwrap();

        assert_eq!(matcher.repo_root(), std::path::absolute(root).unwrap());
    }

    #[test]
    fn test_falls_back_to_start_directory_without_repository() {
        let dir = TempDir::new().unwrap();
        let start = dir.path().join("project");
        fs::create_dir(&start).unwrap();
        fs::write(start.join(".gitignore"), "node_modules/\n").unwrap();

        let matcher = PathMatcher::for_directory(&start).unwrap();

        assert_eq!(matcher.repo_root(), std::path::absolute(&start).unwrap());
        assert!(matcher.is_excluded(&start.join("node_modules"), true).unwrap());
    }

    #[test]
    fn test_nested_ignore_file_overrides_root() {
        let dir = repo();
        let root = dir.path();
        fs::write(root.join(".gitignore"), "*.lock\n").unwrap();
        fs::create_dir(root.join("svc")).unwrap();
        fs::write(root.join("svc/.gitignore"), "!uv.lock\nsecret.json\n").unwrap();

        let matcher = PathMatcher::for_directory(root).unwrap();

        assert!(matcher.is_excluded(&root.join("uv.lock"), false).unwrap());
        assert!(!matcher.is_excluded(&root.join("svc/uv.lock"), false).unwrap());
        assert!(matcher.is_excluded(&root.join("svc/secret.json"), false).unwrap());
        assert!(!matcher.is_excluded(&root.join("secret.json"), false).unwrap());
    }

    #[test]
    fn test_info_exclude_is_honoured() {
        let dir = repo();
        let root = dir.path();
        fs::create_dir(root.join(".git/info")).unwrap();
        fs::write(root.join(".git/info/exclude"), "scratch/\n").unwrap();

        let matcher = PathMatcher::for_directory(root).unwrap();
        assert!(matcher.is_excluded(&root.join("scratch"), true).unwrap());
    }

    #[test]
    fn test_root_itself_is_never_excluded() {
        let dir = repo();
        fs::write(dir.path().join(".gitignore"), "*\n").unwrap();

        let matcher = PathMatcher::for_directory(dir.path()).unwrap();
        let root = matcher.repo_root().to_path_buf();
        assert!(!matcher.is_excluded(&root, true).unwrap());
    }

    #[test]
    fn test_path_outside_root_is_an_error() {
        let dir = repo();
        let matcher = PathMatcher::for_directory(dir.path()).unwrap();

        let result = matcher.is_excluded(Path::new("/somewhere/else"), false);
        assert!(result.unwrap_err().to_string().contains("is outside of"));
    }
}
