use embassy_futures::yield_now;
use embassy_time::{Duration, Instant, Timer};
use embedded_hal::digital::OutputPin;

use crate::{actuator::ActuatorBank, control, sensor::Sensor, store::RemoteStore, telemetry, time::Clock};

pub const TELEMETRY_INTERVAL: Duration = Duration::from_secs(10);
pub const IDLE_SLICE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy)]
pub struct BridgeConfig {
    /// Minimum spacing between telemetry attempts.
    pub telemetry_interval: Duration,
    /// Yield between passes so the store transport is never saturated.
    pub idle_slice: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        BridgeConfig {
            telemetry_interval: TELEMETRY_INTERVAL,
            idle_slice: IDLE_SLICE,
        }
    }
}

/// The main loop: one cooperative task interleaving the control and
/// telemetry phases. All collaborator handles are injected at construction
/// and live for the life of the process.
pub struct Bridge<S, P, D, C>
where
    S: RemoteStore,
    P: OutputPin,
    D: Sensor,
    C: Clock,
{
    store: S,
    bank: ActuatorBank<P>,
    sensor: D,
    clock: C,
    config: BridgeConfig,
    last_push_attempt: Instant,
}

impl<S, P, D, C> Bridge<S, P, D, C>
where
    S: RemoteStore,
    P: OutputPin,
    D: Sensor,
    C: Clock,
{
    pub fn new(store: S, bank: ActuatorBank<P>, sensor: D, clock: C, config: BridgeConfig) -> Self {
        Bridge {
            store,
            bank,
            sensor,
            clock,
            config,
            // First push becomes eligible one interval after start.
            last_push_attempt: Instant::now(),
        }
    }

    pub async fn run(mut self) {
        loop {
            yield_now().await;
            self.pass().await;
            Timer::after(self.config.idle_slice).await;
        }
    }

    /// One scheduler pass: control phase, then telemetry phase. No failure
    /// in either phase stops subsequent passes.
    pub async fn pass(&mut self) {
        if self.store.is_ready().await {
            control::sync_all(&mut self.store, &mut self.bank).await;
        }

        if self.last_push_attempt.elapsed() > self.config.telemetry_interval {
            // Reset on attempt, not success: a skipped cycle waits a full
            // interval before the next one.
            self.last_push_attempt = Instant::now();
            if let Err(e) = telemetry::push_sample(&mut self.store, &mut self.sensor, &self.clock).await {
                warn!("telemetry cycle skipped: {:?}", e);
            }
        }
    }
}
