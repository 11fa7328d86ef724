/// Target discovery - turns directories, files, commits and images into queries
mod external_sources;
mod format_classifier;
mod path_matcher;
mod target_walker;

pub use external_sources::{
    parse_lockfile_arg, resolve_explicit_path, scan_debian_container, scan_explicit_commit,
    EXPLICIT_COMMIT_SOURCE,
};
pub use format_classifier::FormatClassifier;
pub use path_matcher::PathMatcher;
pub use target_walker::{TargetWalker, WalkOptions};
