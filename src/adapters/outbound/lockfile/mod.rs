/// Lockfile adapters - per-ecosystem grammars behind the parser registry
mod apk_installed;
mod package_lock;
mod parsers;
mod requirements;
mod toml_lockfiles;

pub use parsers::{LockfileParsers, APK_INSTALLED};
