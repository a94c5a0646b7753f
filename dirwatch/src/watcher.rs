//! The watcher facade and its listen loop.

use std::path::Path;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::channel::EventChannel;
use crate::config::WatchConfig;
use crate::decode::EventStream;
use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::error::{Result, WatchError};
use crate::event::Event;
use crate::mask::EventMask;
use crate::registry::{WatchDescriptor, WatchRegistry};

/// Lifecycle of a watch session.
///
/// The idle state with no kernel channel open is simply the absence of a
/// `Watcher`; construction performs that transition. A session that reached
/// `Stopped` or `Failed` does not listen again; descriptors do not carry
/// across sessions, so a new session means a new `Watcher`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    /// Channel open; watches and observers may be registered.
    Armed,
    /// Blocked inside the read/decode/dispatch loop.
    Listening,
    /// The loop exited because an observer requested it or the stream
    /// ended.
    Stopped,
    /// The loop exited with an unrecoverable error.
    Failed,
}

/// Composes the kernel channel, the registry and the dispatcher into the
/// add-watch / listen surface.
///
/// Single-threaded by design: every operation takes `&mut self`, and
/// `listen` occupies the calling thread until the session ends. Stopping
/// from outside means closing the underlying descriptor, which fails the
/// next read.
pub struct Watcher {
    channel: EventChannel,
    registry: WatchRegistry,
    dispatcher: Dispatcher,
    config: WatchConfig,
    state: WatcherState,
    buffer: Vec<u8>,
}

impl Watcher {
    /// Open a kernel channel with the default configuration.
    pub fn open() -> Result<Self> {
        Self::with_config(WatchConfig::default())
    }

    /// Open a kernel channel.
    pub fn with_config(config: WatchConfig) -> Result<Self> {
        let channel = EventChannel::open()?;
        Ok(Self::assemble(channel, config))
    }

    fn assemble(channel: EventChannel, config: WatchConfig) -> Self {
        let buffer = vec![0u8; config.buffer_size];
        Self {
            channel,
            registry: WatchRegistry::new(),
            dispatcher: Dispatcher::new(),
            config,
            state: WatcherState::Armed,
            buffer,
        }
    }

    /// Register a path using the configured default interest mask.
    pub fn watch(&mut self, path: impl AsRef<Path>) -> Result<WatchDescriptor> {
        self.add_watch(path, self.config.mask)
    }

    /// Register a single path with the kernel and record its descriptor.
    pub fn add_watch(&mut self, path: impl AsRef<Path>, mask: EventMask) -> Result<WatchDescriptor> {
        let path = path.as_ref();
        let wd = self.channel.add_watch(path, mask)?;

        // Watching the same object twice hands back the existing
        // descriptor with its mask updated; the registry already has it.
        if !self.registry.contains(wd) {
            self.registry.register(wd, path)?;
        }

        info!("watching {} as descriptor {wd}", path.display());
        Ok(wd)
    }

    /// Register `root` and every directory below it.
    ///
    /// Kernel watches do not recurse on their own, so each directory gets a
    /// watch of its own, honoring the configured depth limit and symlink
    /// policy.
    pub fn watch_tree(
        &mut self,
        root: impl AsRef<Path>,
        mask: EventMask,
    ) -> Result<Vec<WatchDescriptor>> {
        let root = root.as_ref();
        let mut descriptors = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX));

        for entry in walker {
            let entry = entry.map_err(|err| WatchError::System {
                context: format!("walking {}", root.display()),
                source: err.into(),
            })?;
            if entry.file_type().is_dir() {
                descriptors.push(self.add_watch(entry.path(), mask)?);
            }
        }

        debug!(
            "watching {} directories under {}",
            descriptors.len(),
            root.display()
        );
        Ok(descriptors)
    }

    /// Unregister a watch with the kernel and the registry.
    pub fn remove_watch(&mut self, wd: WatchDescriptor) -> Result<()> {
        self.channel.remove_watch(wd)?;
        self.registry.remove(wd);
        Ok(())
    }

    /// Subscribe an observer. Observers run in connection order; connect
    /// everything before calling [`listen`](Self::listen).
    pub fn connect_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&Event) -> DispatchOutcome + 'static,
    {
        self.dispatcher.connect(observer);
    }

    /// Current session state.
    pub fn state(&self) -> WatcherState {
        self.state
    }

    /// Number of live watches.
    pub fn watch_count(&self) -> usize {
        self.registry.len()
    }

    /// Block reading, decoding and dispatching events until an observer
    /// requests a stop, the stream ends, or a fatal error occurs.
    ///
    /// Events are delivered in the exact order the kernel produced them; a
    /// stop request ends the session immediately, leaving later records in
    /// the same chunk undelivered. A record whose descriptor is no longer
    /// registered is logged and skipped.
    pub fn listen(&mut self) -> Result<()> {
        self.state = WatcherState::Listening;
        info!("listening on {} watches", self.registry.len());

        loop {
            let read = match self.channel.read_chunk(&mut self.buffer) {
                Ok(0) => {
                    debug!("event stream ended");
                    self.state = WatcherState::Stopped;
                    return Ok(());
                }
                Ok(read) => read,
                Err(err) => {
                    self.state = WatcherState::Failed;
                    return Err(err);
                }
            };

            for record in EventStream::new(&self.buffer[..read]) {
                let raw = match record {
                    Ok(raw) => raw,
                    Err(err) => {
                        self.state = WatcherState::Failed;
                        return Err(err);
                    }
                };

                let wd = raw.wd;
                let watch_removed = raw.mask.contains(EventMask::IGNORED);

                match self.dispatcher.dispatch(&self.registry, raw) {
                    Ok(DispatchOutcome::Continue) => {}
                    Ok(DispatchOutcome::Stop) => {
                        self.state = WatcherState::Stopped;
                        return Ok(());
                    }
                    Err(err) if err.is_recoverable() => {
                        // One stale record must not end the session.
                        warn!("skipping event: {err}");
                    }
                    Err(err) => {
                        self.state = WatcherState::Failed;
                        return Err(err);
                    }
                }

                // The kernel retires the descriptor with this record; keep
                // the registry in step.
                if watch_removed {
                    self.registry.remove(wd);
                }
            }
        }
    }
}
