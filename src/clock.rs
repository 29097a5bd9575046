use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;
use parking_lot::RwLock;

/// Minutes in one in-game day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClockData {
    /// Minutes since midnight, wraps at `MINUTES_PER_DAY`.
    time: i64,
    day: i64,
}

/// Minute-resolution world clock. Sessions start at 08:00 on day 1.
///
/// Cloning shares the clock; the dispatcher and the driver thread hold
/// the same handle.
#[derive(Debug)]
pub struct WorldClock {
    inner: Arc<RwLock<ClockData>>,
}

impl Default for WorldClock {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ClockData {
                time: 8 * 60,
                day: 1,
            })),
        }
    }
}

impl Clone for WorldClock {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl WorldClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock by one minute, rolling over to the next day at
    /// midnight.
    pub fn tick(&self) {
        let mut guard = self.inner.write();
        guard.time += 1;
        if guard.time >= MINUTES_PER_DAY {
            guard.time = 0;
            guard.day += 1;
        }
    }

    pub fn hour(&self) -> i64 {
        self.inner.read().time / 60
    }

    pub fn minute(&self) -> i64 {
        self.inner.read().time % 60
    }

    pub fn day(&self) -> i64 {
        self.inner.read().day
    }

    /// Minutes since midnight.
    pub fn time(&self) -> i64 {
        self.inner.read().time
    }

    /// Sets the hour, preserving the current minute. Out-of-range input
    /// is taken at face value; callers own the bounds.
    pub fn set_hour(&self, hour: i64) {
        let mut guard = self.inner.write();
        let minute = guard.time % 60;
        guard.time = hour * 60 + minute;
    }

    /// Sets the minute, preserving the current hour.
    pub fn set_minute(&self, minute: i64) {
        let mut guard = self.inner.write();
        let hour = guard.time / 60;
        guard.time = hour * 60 + minute;
    }

    pub fn set_day(&self, day: i64) {
        self.inner.write().day = day;
    }

    /// `HH:MM` rendering of the current time.
    pub fn formatted_time(&self) -> String {
        let guard = self.inner.read();
        format!("{:02}:{:02}", guard.time / 60, guard.time % 60)
    }
}

/// Drives `WorldClock::tick` on a fixed real-time interval from a
/// background thread.
///
/// The tick must not outlive the session: `stop` (or dropping the
/// driver) flips the stop flag and joins the thread.
pub struct ClockDriver {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ClockDriver {
    /// One real second per in-game minute.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

    /// Starts ticking the clock every `interval`.
    pub fn start(clock: WorldClock, interval: Duration) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let thread_running = Arc::clone(&running);
        let handle = thread::spawn(move || {
            // Sleep in small slices so stop requests are honored promptly
            // even with long tick intervals.
            const SLICE: Duration = Duration::from_millis(10);
            let mut elapsed = Duration::ZERO;
            while thread_running.load(Ordering::Acquire) {
                thread::sleep(SLICE.min(interval));
                elapsed += SLICE.min(interval);
                if elapsed >= interval {
                    elapsed = Duration::ZERO;
                    clock.tick();
                }
            }
            debug!("clock driver stopped");
        });
        Self {
            running,
            handle: Some(handle),
        }
    }

    /// Requests the driver to stop and waits for the thread to exit.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ClockDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
