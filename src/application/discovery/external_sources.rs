use crate::ports::outbound::{ContainerPackageLister, ProgressReporter};
use crate::scan_pipeline::domain::{Ecosystem, PackageDetails, Query, QueryBatch, Source, SourceKind};
use crate::shared::error::ScanError;
use crate::shared::paths::absolute_normalized;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// Source path recorded for commits given on the command line
pub const EXPLICIT_COMMIT_SOURCE: &str = "HASH";

const DPKG_FIELD_SEPARATOR: &str = "###";

/// Splits an explicit lockfile argument into `(parse_as, path)`
///
/// `"requirements.txt:deps/prod.txt"` selects a parser; a bare path (or an
/// empty prefix such as `":uv.lock"`) leaves the choice to file-name detection.
pub fn parse_lockfile_arg(arg: &str) -> (&str, &str) {
    arg.split_once(':').unwrap_or(("", arg))
}

/// Makes an explicitly supplied path absolute and `..`-free without touching
/// the filesystem
///
/// # Errors
/// Returns `ScanError::PathResolution` if the current directory is unavailable
pub fn resolve_explicit_path(path: &str) -> Result<PathBuf> {
    absolute_normalized(Path::new(path)).map_err(|e| {
        ScanError::PathResolution {
            path: PathBuf::from(path),
            details: e.to_string(),
        }
        .into()
    })
}

/// Appends a query for a commit hash given directly by the caller
pub fn scan_explicit_commit(commit: &str, batch: &mut QueryBatch) {
    batch.push(Query::commit(
        commit,
        Source::new(EXPLICIT_COMMIT_SOURCE, SourceKind::Git),
    ));
}

/// Lists the packages of a Debian-based container image
///
/// Every non-blank output line must be `name###version`. Queries are only
/// committed to `batch` once the whole listing succeeded, since partial
/// output cannot be trusted.
///
/// # Errors
/// Returns an error if the lister fails or a line is malformed
pub fn scan_debian_container(
    image: &str,
    lister: &dyn ContainerPackageLister,
    batch: &mut QueryBatch,
    reporter: &dyn ProgressReporter,
) -> Result<()> {
    let source = Source::new(image, SourceKind::Docker);
    let mut found = Vec::new();

    lister.stream_packages(image, &mut |line: &str| {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }
        let details = parse_dpkg_line(line).ok_or_else(|| ScanError::MalformedContainerOutput {
            image: image.to_string(),
            line: line.to_string(),
        })?;
        found.push(Query::package(details, source.clone()));
        Ok(())
    })?;

    reporter.report(&format!("Scanned docker image with {} packages", found.len()));
    batch.extend(found);
    Ok(())
}

fn parse_dpkg_line(line: &str) -> Option<PackageDetails> {
    let fields: Vec<&str> = line.split(DPKG_FIELD_SEPARATOR).collect();
    match fields.as_slice() {
        [name, version] => Some(PackageDetails::new(*name, *version, Ecosystem::Debian)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_pipeline::domain::QueryTarget;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingReporter {
        messages: RefCell<Vec<String>>,
    }

    impl ProgressReporter for RecordingReporter {
        fn report(&self, message: &str) {
            self.messages.borrow_mut().push(message.to_string());
        }
        fn report_error(&self, message: &str) {
            self.messages.borrow_mut().push(message.to_string());
        }
        fn report_completion(&self, _message: &str) {}
    }

    struct CannedOutput(&'static [&'static str]);

    impl ContainerPackageLister for CannedOutput {
        fn stream_packages(
            &self,
            _image: &str,
            visit: &mut dyn FnMut(&str) -> Result<()>,
        ) -> Result<()> {
            for line in self.0 {
                visit(line)?;
            }
            Ok(())
        }
    }

    #[test]
    fn test_parse_lockfile_arg() {
        assert_eq!(parse_lockfile_arg("uv.lock"), ("", "uv.lock"));
        assert_eq!(
            parse_lockfile_arg("requirements.txt:deps/prod.txt"),
            ("requirements.txt", "deps/prod.txt")
        );
        assert_eq!(parse_lockfile_arg(":Cargo.lock"), ("", "Cargo.lock"));
        assert_eq!(
            parse_lockfile_arg("apk-installed:/lib/apk/db/installed"),
            ("apk-installed", "/lib/apk/db/installed")
        );
    }

    #[test]
    fn test_resolve_explicit_path_is_absolute() {
        let resolved = resolve_explicit_path("some/relative/uv.lock").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some/relative/uv.lock"));
    }

    #[test]
    fn test_resolve_explicit_path_folds_parent_components() {
        let resolved = resolve_explicit_path("a/b/../../c/uv.lock").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("c/uv.lock"));
        assert!(!resolved.to_string_lossy().contains(".."));
    }

    #[test]
    fn test_explicit_commit_uses_synthetic_source() {
        let mut batch = QueryBatch::new();
        scan_explicit_commit("9f8e7d", &mut batch);

        let query = &batch.queries()[0];
        assert_eq!(query.source(), &Source::new("HASH", SourceKind::Git));
        assert_eq!(
            query.target(),
            &QueryTarget::Commit {
                commit: "9f8e7d".to_string()
            }
        );
    }

    #[test]
    fn test_well_formed_container_line_yields_one_query() {
        let reporter = RecordingReporter::default();
        let mut batch = QueryBatch::new();

        scan_debian_container("debian:12", &CannedOutput(&["foo###1.0"]), &mut batch, &reporter)
            .unwrap();

        assert_eq!(batch.len(), 1);
        let query = &batch.queries()[0];
        assert_eq!(
            query.target(),
            &QueryTarget::Package(PackageDetails::new("foo", "1.0", Ecosystem::Debian))
        );
        assert_eq!(query.source(), &Source::new("debian:12", SourceKind::Docker));
        assert_eq!(
            reporter.messages.borrow().as_slice(),
            ["Scanned docker image with 1 packages"]
        );
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut batch = QueryBatch::new();
        scan_debian_container(
            "debian:12",
            &CannedOutput(&["", "  bash###5.2.15-2+b2  ", "   "]),
            &mut batch,
            &RecordingReporter::default(),
        )
        .unwrap();

        assert_eq!(batch.len(), 1);
        assert_eq!(
            batch.queries()[0].target().to_string(),
            "bash@5.2.15-2+b2 (Debian)"
        );
    }

    #[test]
    fn test_malformed_container_line_is_fatal() {
        let mut batch = QueryBatch::new();

        let err = scan_debian_container(
            "debian:12",
            &CannedOutput(&["bash###5.2", "foo"]),
            &mut batch,
            &RecordingReporter::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ScanError>(),
            Some(ScanError::MalformedContainerOutput { line, .. }) if line == "foo"
        ));
        assert!(batch.is_empty());
    }

    #[test]
    fn test_too_many_fields_is_malformed() {
        assert!(parse_dpkg_line("a###b###c").is_none());
        assert!(parse_dpkg_line("a###").is_some());
    }
}
