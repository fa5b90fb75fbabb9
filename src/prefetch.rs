use std::hint;
use std::ptr;

use parking_lot::{Condvar, Mutex};

/// Stride of the page touches.
pub(crate) const PAGE: usize = 4096;

/// Default distance the worker keeps ahead of the scanner.
pub(crate) const DEFAULT_AHEAD: usize = 16 * 1024 * 1024;

/// Scanner progress is published at this granularity, bounding wakeup
/// overhead to O(len / 64 KiB).
pub(crate) const PUBLISH_EVERY: usize = 64 * 1024;

struct Progress {
    scan_pos: usize,
    done: bool,
}

/// Scanner/worker rendezvous: the scanner coarsely publishes its offset,
/// the worker parks here whenever it is far enough ahead.
pub(crate) struct Shared {
    progress: Mutex<Progress>,
    wake: Condvar,
}

impl Shared {
    pub(crate) fn new(start: usize) -> Self {
        Self {
            progress: Mutex::new(Progress {
                scan_pos: start,
                done: false,
            }),
            wake: Condvar::new(),
        }
    }

    #[inline]
    pub(crate) fn publish(&self, pos: usize) {
        let mut progress = self.progress.lock();

        if pos > progress.scan_pos {
            progress.scan_pos = pos;
            self.wake.notify_one();
        }
    }

    pub(crate) fn shutdown(&self) {
        self.progress.lock().done = true;
        self.wake.notify_one();
    }

    /// Worker body: touch one byte per page up to `scan_pos + ahead`, park
    /// when caught up, exit when told to.
    pub(crate) fn run(&self, data: &[u8], start: usize, ahead: usize) {
        let len = data.len();
        let mut pre = start;
        let mut sink: u8 = 0;

        loop {
            let target = {
                let mut progress = self.progress.lock();

                loop {
                    if progress.done {
                        hint::black_box(sink);
                        return;
                    }

                    let target = (progress.scan_pos + ahead).min(len);

                    if pre < target {
                        break target;
                    }

                    self.wake.wait(&mut progress);
                }
            };

            while pre < target {
                // Volatile so the touch cannot be elided; the load is what
                // forces the page resident.
                sink = sink.wrapping_add(unsafe { ptr::read_volatile(data.as_ptr().add(pre)) });
                pre += PAGE;
            }
        }
    }
}

/// Flags the worker down when dropped, so teardown happens on every exit
/// path out of a parse, including consumer panics.
pub(crate) struct ShutdownGuard<'a>(pub(crate) &'a Shared);

impl Drop for ShutdownGuard<'_> {
    fn drop(&mut self) {
        self.0.shutdown();
    }
}
