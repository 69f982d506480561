//! Configuration for image markup output

/// Configuration options for the image renderer
#[derive(Debug, Clone, Default)]
pub struct ImageConfig {
    /// Base path under which lazy-loading placeholder assets live
    pub placeholder_path: Option<String>,
}

impl ImageConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder base path, normalized to one trailing slash
    pub fn with_placeholder_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.placeholder_path = Some(format!("{}/", path.trim_end_matches('/')));
        self
    }
}
