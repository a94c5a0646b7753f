//! # dirwatch
//!
//! Blocking inotify-based directory watching for Linux. A `Watcher` owns a
//! kernel notification channel, translates watch descriptors back into the
//! paths they were registered for, and delivers fully owned events to
//! observers in kernel order until one of them asks the session to stop.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                         Watcher                            │
//! ├────────────────────────────────────────────────────────────┤
//! │  EventChannel ──► EventStream ──► Dispatcher ──► Observer  │
//! │     (read)          (decode)          │                    │
//! │                                       ▼                    │
//! │                                 WatchRegistry              │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The channel performs one blocking read per chunk and the stream decoder
//! slices the chunk into records without any I/O of its own. The dispatcher
//! then resolves each record against the registry and invokes observers in
//! registration order. Everything runs on the calling thread; the only
//! suspension point is the read.

pub mod channel;
pub mod config;
pub mod decode;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod mask;
pub mod registry;
pub mod watcher;

pub use channel::EventChannel;
pub use config::{DEFAULT_BUFFER_SIZE, WatchConfig};
pub use decode::{EventStream, RawEvent};
pub use dispatch::{DispatchOutcome, Dispatcher, Observer};
pub use error::{Result, WatchError};
pub use event::Event;
pub use mask::EventMask;
pub use registry::{WatchDescriptor, WatchRegistry};
pub use watcher::{Watcher, WatcherState};
