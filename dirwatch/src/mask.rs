//! Change masks drawn from the kernel's event vocabulary.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Bitwise combination of change kinds.
    ///
    /// Used both as the interest mask passed to watch registration and as
    /// the mask carried by every event record. A single record may report
    /// several kinds at once, so callers test combinations with
    /// [`EventMask::contains`] and [`EventMask::intersects`] rather than
    /// matching on a single value. Bits the library does not know about are
    /// preserved as-is.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct EventMask: u32 {
        /// File was accessed.
        const ACCESS = libc::IN_ACCESS;

        /// Metadata changed.
        const ATTRIB = libc::IN_ATTRIB;

        /// File opened for writing was closed.
        const CLOSE_WRITE = libc::IN_CLOSE_WRITE;

        /// File or directory not opened for writing was closed.
        const CLOSE_NOWRITE = libc::IN_CLOSE_NOWRITE;

        /// File or directory created in a watched directory.
        const CREATE = libc::IN_CREATE;

        /// File or directory deleted from a watched directory.
        const DELETE = libc::IN_DELETE;

        /// The watched path itself was deleted.
        const DELETE_SELF = libc::IN_DELETE_SELF;

        /// File was modified.
        const MODIFY = libc::IN_MODIFY;

        /// The watched path itself was moved.
        const MOVE_SELF = libc::IN_MOVE_SELF;

        /// File moved out of a watched directory.
        const MOVED_FROM = libc::IN_MOVED_FROM;

        /// File moved into a watched directory.
        const MOVED_TO = libc::IN_MOVED_TO;

        /// File or directory was opened.
        const OPEN = libc::IN_OPEN;

        /// The watch was removed, either explicitly or because the watched
        /// object went away.
        const IGNORED = libc::IN_IGNORED;

        /// Subject of the event is a directory.
        const ISDIR = libc::IN_ISDIR;

        /// The kernel event queue overflowed; events were dropped.
        const Q_OVERFLOW = libc::IN_Q_OVERFLOW;

        /// Filesystem containing the watched object was unmounted.
        const UNMOUNT = libc::IN_UNMOUNT;

        /// Registration only: don't dereference a symlink path.
        const DONT_FOLLOW = libc::IN_DONT_FOLLOW;

        /// Registration only: skip events for children unlinked from the
        /// watched directory.
        const EXCL_UNLINK = libc::IN_EXCL_UNLINK;

        /// Registration only: add to an existing watch mask instead of
        /// replacing it.
        const MASK_ADD = libc::IN_MASK_ADD;

        /// Registration only: remove the watch after one event.
        const ONESHOT = libc::IN_ONESHOT;

        /// Registration only: watch the path only if it is a directory.
        const ONLYDIR = libc::IN_ONLYDIR;

        /// Both halves of a rename.
        const MOVE = libc::IN_MOVE;

        /// Both close variants.
        const CLOSE = libc::IN_CLOSE;

        /// Every event kind the kernel can report.
        const ALL_EVENTS = libc::IN_ALL_EVENTS;
    }
}
