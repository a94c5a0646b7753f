//! Watch descriptor bookkeeping.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WatchError};

/// Identifier the kernel assigns to one watch.
///
/// Unique among currently active watches; invalidated when the watch is
/// removed or the watched object is deleted. Descriptors from an ended
/// session mean nothing to a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WatchDescriptor(pub(crate) i32);

impl WatchDescriptor {
    /// The raw kernel value.
    pub fn as_raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for WatchDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps live watch descriptors to the paths they were registered for.
#[derive(Debug, Default)]
pub struct WatchRegistry {
    watches: HashMap<WatchDescriptor, PathBuf>,
}

impl WatchRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a descriptor/path pair.
    pub fn register(&mut self, wd: WatchDescriptor, path: impl Into<PathBuf>) -> Result<()> {
        match self.watches.entry(wd) {
            Entry::Occupied(_) => Err(WatchError::DuplicateWatch(wd)),
            Entry::Vacant(slot) => {
                slot.insert(path.into());
                Ok(())
            }
        }
    }

    /// Look up the path a descriptor was registered for.
    pub fn resolve(&self, wd: WatchDescriptor) -> Result<&Path> {
        self.watches
            .get(&wd)
            .map(PathBuf::as_path)
            .ok_or(WatchError::UnknownWatch(wd))
    }

    /// Drop a pair, returning the stored path if the descriptor was present.
    ///
    /// Removing a descriptor that is not present is a no-op; the kernel may
    /// report removal of the same watch more than once.
    pub fn remove(&mut self, wd: WatchDescriptor) -> Option<PathBuf> {
        self.watches.remove(&wd)
    }

    /// Whether a descriptor is currently registered.
    pub fn contains(&self, wd: WatchDescriptor) -> bool {
        self.watches.contains_key(&wd)
    }

    /// Number of live watches.
    pub fn len(&self) -> usize {
        self.watches.len()
    }

    /// Whether any watches are registered.
    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }

    /// Iterate over the registered pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (WatchDescriptor, &Path)> {
        self.watches.iter().map(|(wd, path)| (*wd, path.as_path()))
    }
}
