use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum file size for security (100 MB)
/// This prevents DoS attacks via excessively large files
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that a path exists and is a regular file (not a directory)
///
/// Symbolic links are followed: scanned trees routinely link lockfiles
/// between workspace members.
///
/// # Errors
/// Returns an error if the path doesn't exist or is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read {} metadata for {}: {}",
            file_description,
            path.display(),
            e
        )
    })?;

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Reads a whole file after the regular-file and size checks
pub fn read_bounded(path: &Path, file_description: &str) -> Result<Vec<u8>> {
    validate_regular_file(path, file_description)?;
    fs::read(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} {}: {}", file_description, path.display(), e))
}

/// Same as [`read_bounded`], decoded as UTF-8
pub fn read_bounded_to_string(path: &Path, file_description: &str) -> Result<String> {
    let bytes = read_bounded(path, file_description)?;
    String::from_utf8(bytes)
        .map_err(|_| anyhow::anyhow!("{} {} is not valid UTF-8", file_description, path.display()))
}
