//! Owned event values delivered to observers.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::decode::RawEvent;
use crate::mask::EventMask;
use crate::registry::WatchDescriptor;

/// A fully resolved filesystem event.
///
/// Unlike the raw record it is built from, an `Event` owns its name and
/// path outright: it stays valid after the read buffer is reused for the
/// next chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Watch the event originates from.
    pub wd: WatchDescriptor,

    /// Raw change mask as reported by the kernel.
    pub mask: EventMask,

    /// Correlation value shared by the two halves of a rename.
    pub cookie: u32,

    /// Name relative to the watched path, when the kernel supplied one.
    pub name: Option<OsString>,

    /// The watched path joined with `name`; empty for queue-overflow
    /// records, which belong to no watch.
    pub path: PathBuf,
}

impl Event {
    /// Build an owned event from a raw record and the path its descriptor
    /// was registered for.
    pub(crate) fn resolved(raw: RawEvent, watched: &Path) -> Self {
        let path = match &raw.name {
            Some(name) => watched.join(name),
            None => watched.to_path_buf(),
        };
        Self {
            wd: raw.wd,
            mask: raw.mask,
            cookie: raw.cookie,
            name: raw.name,
            path,
        }
    }

    /// Build an event that resolves to no watched path.
    pub(crate) fn unresolved(raw: RawEvent) -> Self {
        Self {
            wd: raw.wd,
            mask: raw.mask,
            cookie: raw.cookie,
            name: raw.name,
            path: PathBuf::new(),
        }
    }

    /// Whether the subject of the event is a directory.
    pub fn is_directory(&self) -> bool {
        self.mask.contains(EventMask::ISDIR)
    }

    /// Whether the kernel dropped events because its queue overflowed.
    pub fn is_overflow(&self) -> bool {
        self.mask.contains(EventMask::Q_OVERFLOW)
    }

    /// Whether the kernel removed the watch this event belongs to.
    pub fn is_watch_removed(&self) -> bool {
        self.mask.contains(EventMask::IGNORED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(wd: i32, mask: EventMask, name: Option<&str>) -> RawEvent {
        RawEvent {
            wd: WatchDescriptor(wd),
            mask,
            cookie: 0,
            name: name.map(OsString::from),
        }
    }

    #[test]
    fn test_resolved_joins_watched_path_and_name() {
        let event = Event::resolved(
            raw(1, EventMask::CREATE, Some("a.txt")),
            Path::new("/tmp/x"),
        );
        assert_eq!(event.path, Path::new("/tmp/x/a.txt"));
    }

    #[test]
    fn test_resolved_without_name_is_watched_path() {
        let event = Event::resolved(raw(1, EventMask::DELETE_SELF, None), Path::new("/tmp/x"));
        assert_eq!(event.path, Path::new("/tmp/x"));
    }

    #[test]
    fn test_mask_predicates() {
        let event = Event::resolved(
            raw(1, EventMask::CREATE | EventMask::ISDIR, Some("sub")),
            Path::new("/tmp/x"),
        );
        assert!(event.is_directory());
        assert!(!event.is_overflow());
        assert!(!event.is_watch_removed());
    }

    #[test]
    fn test_serde_round_trip() {
        let event = Event::resolved(
            raw(5, EventMask::MOVED_TO, Some("b.txt")),
            Path::new("/srv/in"),
        );

        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
