//! Adapter configuration.

/// Page size used by `find` when the host does not send one.
pub const DEFAULT_LIMIT: u64 = 20;

/// Configuration for [`ResourceAdapter`](crate::ResourceAdapter) behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceConfig {
    /// Rows returned by `find` when no limit is given.
    pub default_limit: u64,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl ResourceConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default page size.
    pub fn default_limit(mut self, limit: u64) -> Self {
        self.default_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(ResourceConfig::default().default_limit, 20);
    }

    #[test]
    fn test_builder() {
        let config = ResourceConfig::new().default_limit(50);
        assert_eq!(config.default_limit, 50);
    }
}
