//! Configuration for a watch session.

use serde::{Deserialize, Serialize};

use crate::mask::EventMask;

/// Default size of the chunk buffer handed to each read. Holds several
/// records even with maximum-length names.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Configuration for a [`Watcher`](crate::Watcher).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Size of the read buffer in bytes.
    pub buffer_size: usize,

    /// Interest mask used when a watch is registered without an explicit
    /// one.
    pub mask: EventMask,

    /// Maximum depth for tree registration (None = unlimited).
    pub max_depth: Option<usize>,

    /// Whether tree registration follows symbolic links.
    pub follow_symlinks: bool,
}

impl WatchConfig {
    /// Create a config with the defaults.
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            mask: EventMask::ALL_EVENTS,
            max_depth: None,
            follow_symlinks: false,
        }
    }

    /// Set the read buffer size.
    pub fn with_buffer_size(mut self, bytes: usize) -> Self {
        self.buffer_size = bytes;
        self
    }

    /// Set the default interest mask.
    pub fn with_mask(mut self, mask: EventMask) -> Self {
        self.mask = mask;
        self
    }

    /// Set the maximum depth for tree registration.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Follow symbolic links during tree registration.
    pub fn follow_symlinks(mut self) -> Self {
        self.follow_symlinks = true;
        self
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_defaults() {
        let config = WatchConfig::new();
        assert_eq!(config.buffer_size, DEFAULT_BUFFER_SIZE);
        assert_eq!(config.mask, EventMask::ALL_EVENTS);
        assert_eq!(config.max_depth, None);
        assert!(!config.follow_symlinks);
    }

    #[test]
    fn test_config_builder() {
        let config = WatchConfig::new()
            .with_buffer_size(16 * 1024)
            .with_mask(EventMask::CREATE | EventMask::DELETE)
            .with_max_depth(2)
            .follow_symlinks();

        assert_eq!(config.buffer_size, 16 * 1024);
        assert_eq!(config.mask, EventMask::CREATE | EventMask::DELETE);
        assert_eq!(config.max_depth, Some(2));
        assert!(config.follow_symlinks);
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = WatchConfig::new().with_mask(EventMask::MODIFY);

        let json = serde_json::to_string(&config).unwrap();
        let back: WatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mask, config.mask);
        assert_eq!(back.buffer_size, config.buffer_size);
    }
}
