#![allow(async_fn_in_trait)]

use chrono::{NaiveDateTime, TimeDelta};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, mutex::Mutex};
use embassy_time::{Duration, Instant, Timer, WithTimeout};

use crate::fmt::FmtDateTime;

/// Wall-clock collaborator. `None` until the first synchronization; the
/// scheduler's startup sequence guarantees telemetry never sees `None` in
/// steady state.
pub trait Clock {
    async fn now(&self) -> Option<NaiveDateTime>;
}

impl<C: Clock> Clock for &C {
    async fn now(&self) -> Option<NaiveDateTime> {
        (**self).now().await
    }
}

#[derive(Debug, Eq, PartialEq)]
pub struct SyncTimeout;

#[cfg(feature = "defmt")]
impl defmt::Format for SyncTimeout {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "SyncTimeout");
    }
}

/// Calendar clock anchored to the monotonic uptime counter.
///
/// `synchronize` records what the wall clock read at system boot; `now`
/// projects that anchor forward by the current uptime. Re-synchronizing
/// moves the anchor and logs the observed drift.
pub struct SystemClock {
    boot_time: Mutex<CriticalSectionRawMutex, Option<NaiveDateTime>>,
}

impl SystemClock {
    pub const fn new() -> Self {
        SystemClock {
            boot_time: Mutex::new(None),
        }
    }

    pub async fn synchronize(&self, now: NaiveDateTime) {
        let uptime = Instant::now();
        let new_boot_time = now - TimeDelta::seconds(uptime.as_secs() as i64);
        let mut guard = self.boot_time.lock().await;
        match *guard {
            Some(current_boot_time) => {
                if current_boot_time != new_boot_time {
                    *guard = Some(new_boot_time);
                    let drift = new_boot_time - current_boot_time;
                    info!(
                        "clock re-synchronized: {} (drift: {} s)",
                        FmtDateTime(&now),
                        drift.num_seconds()
                    );
                }
            }
            None => {
                *guard = Some(new_boot_time);
                info!("clock synchronized: {}", FmtDateTime(&now));
            }
        }
    }

    /// Startup precondition: block until the clock has been synchronized,
    /// polling in 500 ms slices. `Err(SyncTimeout)` once `max_wait` is
    /// exceeded; the caller is expected to restart the device.
    pub async fn wait_synchronized(&self, max_wait: Duration) -> Result<NaiveDateTime, SyncTimeout> {
        async {
            loop {
                if let Some(now) = self.now().await {
                    return now;
                }
                Timer::after_millis(500).await;
            }
        }
        .with_timeout(max_wait)
        .await
        .map_err(|_| SyncTimeout)
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        SystemClock::new()
    }
}

impl Clock for SystemClock {
    async fn now(&self) -> Option<NaiveDateTime> {
        let guard = self.boot_time.lock().await;
        guard.map(|boot_time| boot_time + TimeDelta::seconds(Instant::now().as_secs() as i64))
    }
}
