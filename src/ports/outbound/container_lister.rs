use crate::shared::Result;

/// ContainerPackageLister port - enumerates packages installed in an image
///
/// Output is streamed: implementations call `visit` for every line as soon
/// as it is read. An error from `visit` stops the listing and is returned
/// unchanged.
pub trait ContainerPackageLister {
    /// Streams `name###version` lines from the image's package manager
    ///
    /// # Errors
    /// Returns an error if the container cannot be started, exits
    /// unsuccessfully, or `visit` rejects a line
    fn stream_packages(&self, image: &str, visit: &mut dyn FnMut(&str) -> Result<()>)
        -> Result<()>;
}
