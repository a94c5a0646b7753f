//! Watch a directory tree and print events until the watched root goes
//! away.
//!
//! ```text
//! cargo run --example watch -- /path/to/dir
//! ```

use dirwatch::{DispatchOutcome, EventMask, Watcher};

fn main() -> dirwatch::Result<()> {
    tracing_subscriber::fmt::init();

    let root = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());

    let mut watcher = Watcher::open()?;
    watcher.watch_tree(&root, EventMask::ALL_EVENTS)?;

    watcher.connect_observer(|event| {
        println!("{:?} {}", event.mask, event.path.display());
        if event.mask.intersects(EventMask::DELETE_SELF | EventMask::MOVE_SELF) {
            DispatchOutcome::Stop
        } else {
            DispatchOutcome::Continue
        }
    });

    watcher.listen()
}
