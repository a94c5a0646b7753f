//! Kernel notification channel.

use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::{AsRawFd, FromRawFd, RawFd};
use std::path::Path;

use tracing::debug;

use crate::error::{Result, WatchError};
use crate::mask::EventMask;
use crate::registry::WatchDescriptor;

/// Owns the inotify file descriptor and performs the blocking reads.
///
/// The channel knows nothing about paths or observers; it hands out raw
/// descriptors on registration and raw bytes on read. Pairing descriptors
/// with paths is the registry's job, which keeps both sides testable on
/// their own.
#[derive(Debug)]
pub struct EventChannel {
    fd: RawFd,
}

impl EventChannel {
    /// Establish the kernel notification channel.
    pub fn open() -> Result<Self> {
        let fd = unsafe { libc::inotify_init1(libc::IN_CLOEXEC) };
        if fd < 0 {
            return Err(WatchError::system("unable to initialize inotify"));
        }
        debug!("opened inotify channel on fd {fd}");
        Ok(Self { fd })
    }

    /// Ask the kernel to monitor `path` for the change kinds in `mask`.
    pub fn add_watch(&mut self, path: &Path, mask: EventMask) -> Result<WatchDescriptor> {
        let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| WatchError::System {
            context: format!("watch path contains NUL: {}", path.display()),
            source: io::Error::from(io::ErrorKind::InvalidInput),
        })?;

        let wd = unsafe { libc::inotify_add_watch(self.fd, c_path.as_ptr(), mask.bits()) };
        if wd < 0 {
            return Err(WatchError::system(format!(
                "unable to add watch for {}",
                path.display()
            )));
        }
        Ok(WatchDescriptor(wd))
    }

    /// Stop monitoring the watch behind `wd`.
    ///
    /// The kernel acknowledges with an `IGNORED` record on the event stream.
    pub fn remove_watch(&mut self, wd: WatchDescriptor) -> Result<()> {
        let rc = unsafe { libc::inotify_rm_watch(self.fd, wd.as_raw()) };
        if rc < 0 {
            return Err(WatchError::system(format!("unable to remove watch {wd}")));
        }
        Ok(())
    }

    /// Perform one blocking read of up to `buffer.len()` bytes.
    ///
    /// Returns the number of whole bytes the kernel delivered; zero means
    /// the stream is closed and no further events will arrive. A read
    /// interrupted by a signal is retried transparently; any other failure
    /// is fatal.
    pub fn read_chunk(&self, buffer: &mut [u8]) -> Result<usize> {
        loop {
            let count = unsafe { libc::read(self.fd, buffer.as_mut_ptr().cast(), buffer.len()) };
            if count >= 0 {
                return Ok(count as usize);
            }

            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(WatchError::System {
                context: "reading events failed".to_string(),
                source: err,
            });
        }
    }
}

impl AsRawFd for EventChannel {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl FromRawFd for EventChannel {
    /// Wrap an existing readable descriptor.
    ///
    /// The channel takes ownership and closes the descriptor on drop. Any
    /// descriptor that delivers the kernel record format works; tests use
    /// this to drive the read loop from a pipe.
    unsafe fn from_raw_fd(fd: RawFd) -> Self {
        Self { fd }
    }
}

impl Drop for EventChannel {
    fn drop(&mut self) {
        // Close failures have nowhere to be reported here.
        unsafe {
            libc::close(self.fd);
        }
    }
}
