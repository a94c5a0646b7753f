//! Error types for the watcher.

use std::io;

use thiserror::Error;

use crate::registry::WatchDescriptor;

/// Result type alias for watcher operations.
pub type Result<T> = std::result::Result<T, WatchError>;

/// Errors that can occur while watching.
#[derive(Error, Debug)]
pub enum WatchError {
    /// A system call failed. Ends the session.
    #[error("{context}: {source}")]
    System {
        /// What the watcher was doing when the call failed.
        context: String,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// An event referenced a descriptor with no registered path. The event
    /// is skipped and the session continues.
    #[error("no watch registered for descriptor {0}")]
    UnknownWatch(WatchDescriptor),

    /// The kernel byte stream could not be decoded. Ends the session, since
    /// continuing would misinterpret everything after the bad record.
    #[error("malformed event stream: {0}")]
    MalformedStream(String),

    /// The kernel handed out a descriptor the registry already holds. Ends
    /// the session: the kernel and the registry have diverged.
    #[error("watch descriptor {0} already registered")]
    DuplicateWatch(WatchDescriptor),
}

impl WatchError {
    /// A `System` error capturing the current `errno`.
    pub(crate) fn system(context: impl Into<String>) -> Self {
        Self::System {
            context: context.into(),
            source: io::Error::last_os_error(),
        }
    }

    /// OS error number, when this error carries one.
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::System { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }

    /// Whether a listen session can continue past this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnknownWatch(_))
    }
}
