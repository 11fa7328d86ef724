use std::io;
use std::path::{Component, Path, PathBuf};

/// Folds `.` and `..` components without touching the filesystem
///
/// `..` directly below the root stays at the root. Symbolic links are not
/// resolved, so `link/..` folds to the directory holding `link`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(Component::ParentDir.as_os_str()),
            },
            other => normalized.push(other.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        normalized.push(Component::CurDir.as_os_str());
    }
    normalized
}

/// Absolute, `..`-free form of `path`
///
/// # Errors
/// Returns an error if `path` is relative and the current directory is unavailable
pub fn absolute_normalized(path: &Path) -> io::Result<PathBuf> {
    std::path::absolute(path).map(|absolute| normalize(&absolute))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_components_are_folded() {
        assert_eq!(
            normalize(Path::new("/work/a/b/../../c/deps.lock")),
            PathBuf::from("/work/c/deps.lock")
        );
        assert_eq!(normalize(Path::new("/work/./app/")), PathBuf::from("/work/app"));
    }

    #[test]
    fn test_parent_of_root_is_root() {
        assert_eq!(normalize(Path::new("/../etc")), PathBuf::from("/etc"));
    }

    #[test]
    fn test_relative_paths_keep_leading_parents() {
        assert_eq!(normalize(Path::new("../x/../y")), PathBuf::from("../y"));
        assert_eq!(normalize(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    fn test_absolute_normalized_has_no_parent_components() {
        let path = absolute_normalized(Path::new("../sibling/./deps.lock")).unwrap();
        assert!(path.is_absolute());
        assert!(path
            .components()
            .all(|c| !matches!(c, Component::ParentDir | Component::CurDir)));
        assert!(path.ends_with("sibling/deps.lock"));
    }
}
