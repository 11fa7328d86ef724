/// Version-control adapters
mod git_dir_reader;

pub use git_dir_reader::GitDirReader;
