use osv_scan::prelude::*;

/// Mock ContainerPackageLister replaying canned dpkg-query output
#[derive(Default)]
pub struct MockContainerLister {
    lines: Vec<String>,
}

impl MockContainerLister {
    pub fn with_lines(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl ContainerPackageLister for MockContainerLister {
    fn stream_packages(
        &self,
        _image: &str,
        visit: &mut dyn FnMut(&str) -> Result<()>,
    ) -> Result<()> {
        for line in &self.lines {
            visit(line)?;
        }
        Ok(())
    }
}
