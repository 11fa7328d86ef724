use super::format_classifier::FormatClassifier;
use super::path_matcher::PathMatcher;
use crate::ports::outbound::{CommitReader, ProgressReporter};
use crate::scan_pipeline::domain::{Query, QueryBatch, Source, SourceKind};
use crate::shared::error::ScanError;
use crate::shared::paths::absolute_normalized;
use crate::shared::Result;
use std::path::Path;
use walkdir::WalkDir;

const GIT_DIR: &str = ".git";

/// Options controlling a single directory walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Descend into subdirectories
    pub recursive: bool,
    /// Do not turn `.git` directories into commit queries
    pub skip_git: bool,
    /// Honour `.gitignore` files of the enclosing repository
    pub use_gitignore: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            skip_git: false,
            use_gitignore: true,
        }
    }
}

/// TargetWalker - depth-first discovery over a directory tree
///
/// Entries are visited in file-name order so repeated scans of the same
/// tree produce the same query order.
pub struct TargetWalker<'a> {
    classifier: &'a FormatClassifier<'a>,
    commit_reader: &'a dyn CommitReader,
    reporter: &'a dyn ProgressReporter,
}

impl<'a> TargetWalker<'a> {
    pub fn new(
        classifier: &'a FormatClassifier<'a>,
        commit_reader: &'a dyn CommitReader,
        reporter: &'a dyn ProgressReporter,
    ) -> Self {
        Self {
            classifier,
            commit_reader,
            reporter,
        }
    }

    /// Walks `dir`, appending every discovered query to `batch`
    ///
    /// Per-file problems are reported and skipped.
    ///
    /// # Errors
    /// Returns an error only when a directory entry cannot be read, since the
    /// tree is then no longer enumerated faithfully
    pub fn scan_dir(&self, dir: &Path, options: WalkOptions, batch: &mut QueryBatch) -> Result<()> {
        // Entries inherit the root's form, so every source path comes out clean
        let dir = absolute_normalized(dir).map_err(|e| ScanError::PathResolution {
            path: dir.to_path_buf(),
            details: e.to_string(),
        })?;
        let dir = dir.as_path();

        let matcher = if options.use_gitignore {
            match PathMatcher::for_directory(dir) {
                Ok(matcher) => {
                    tracing::debug!(
                        root = %matcher.repo_root().display(),
                        "honouring ignore rules"
                    );
                    Some(matcher)
                }
                Err(e) => {
                    self.reporter
                        .report_error(&format!("Unable to parse git ignores: {:#}", e));
                    None
                }
            }
        } else {
            None
        };

        let mut entries = WalkDir::new(dir).sort_by_file_name().into_iter();
        let mut root = true;

        while let Some(entry) = entries.next() {
            let entry = entry.map_err(|e| ScanError::DirectoryWalk {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| dir.to_path_buf()),
                details: e.to_string(),
            })?;

            let path = entry.path().to_path_buf();
            let is_dir = entry.file_type().is_dir();

            if let Some(matcher) = matcher.as_ref().filter(|_| !root) {
                match matcher.is_excluded(&path, is_dir) {
                    Ok(true) => {
                        tracing::debug!(path = %path.display(), "excluded by ignore rules");
                        if is_dir {
                            entries.skip_current_dir();
                        }
                        continue;
                    }
                    Ok(false) => {}
                    // Over-scanning beats silently missing files
                    Err(e) => self.reporter.report(&format!(
                        "Failed to resolve gitignore for {}: {:#}",
                        path.display(),
                        e
                    )),
                }
            }

            if is_dir && entry.file_name() == GIT_DIR {
                if !options.skip_git {
                    self.scan_git(&path, batch);
                }
                entries.skip_current_dir();
                continue;
            }

            if !is_dir {
                self.classify_file(&path, batch);
            }

            if !root && !options.recursive && is_dir {
                entries.skip_current_dir();
            }
            root = false;
        }

        Ok(())
    }

    fn classify_file(&self, path: &Path, batch: &mut QueryBatch) {
        // Broken symlinks, sockets, links to directories
        if !path.is_file() {
            tracing::trace!(path = %path.display(), "skipping non-regular file");
            return;
        }

        if self.classifier.identify_manifest(path).is_some() {
            if let Err(e) = self.classifier.scan_lockfile(path, "", batch, self.reporter) {
                tracing::debug!(path = %path.display(), error = %format!("{:#}", e), "lockfile scan failed");
                self.reporter.report_error(&format!(
                    "Attempted to scan lockfile but failed: {}",
                    path.display()
                ));
            }
        }

        if let Err(e) = self.classifier.scan_sbom(path, batch, self.reporter) {
            self.reporter.report_error(&format!(
                "Failed to scan SBOM file {}: {:#}",
                path.display(),
                e
            ));
        }
    }

    /// `git_dir` is the `.git` directory; its parent is the working tree
    fn scan_git(&self, git_dir: &Path, batch: &mut QueryBatch) {
        let Some(repo_dir) = git_dir.parent() else {
            return;
        };
        let source_path = format!("{}/", repo_dir.display());

        match self.commit_reader.current_commit(repo_dir) {
            Ok(commit) => {
                self.reporter
                    .report(&format!("Scanning {} at commit {}", source_path, commit));
                batch.push(Query::commit(commit, Source::new(source_path, SourceKind::Git)));
            }
            Err(e) => self.reporter.report_error(&format!(
                "scan failed for git repository, {}: {:#}",
                git_dir.display(),
                e
            )),
        }
    }
}
