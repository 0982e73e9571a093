use core::fmt::Write;

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::{
    sensor::{Sensor, SensorError},
    store::{Path, RemoteStore},
    time::Clock,
};

#[derive(Debug, PartialEq)]
pub enum TelemetryError {
    Sensor(SensorError),
    /// The sensor produced a NaN field; the cycle is skipped.
    InvalidReading,
    /// Startup precondition violated: the wall clock has never been
    /// synchronized. Never expected in steady state.
    ClockNotSynchronized,
}

#[cfg(feature = "defmt")]
impl defmt::Format for TelemetryError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            TelemetryError::Sensor(e) => defmt::write!(f, "Sensor({:?})", e),
            TelemetryError::InvalidReading => defmt::write!(f, "InvalidReading"),
            TelemetryError::ClockNotSynchronized => defmt::write!(f, "ClockNotSynchronized"),
        }
    }
}

impl From<SensorError> for TelemetryError {
    fn from(err: SensorError) -> Self {
        TelemetryError::Sensor(err)
    }
}

/// Base path for one sample. Second granularity makes every sample's path
/// unique, so telemetry writes are append-only in practice.
pub fn sample_path(at: NaiveDateTime) -> Path {
    let mut path = Path::new();
    let _ = write!(
        path,
        "DHT11/{:04}-{:02}-{:02}/{:02}/{:02}/{:02}",
        at.year(),
        at.month(),
        at.day(),
        at.hour(),
        at.minute(),
        at.second()
    );
    path
}

/// One telemetry phase: sample, timestamp, push.
///
/// The two field writes are independent: a failure on one is logged and
/// dropped without blocking the other, and nothing is retried — the next
/// interval produces a fresh path anyway.
pub async fn push_sample<S: RemoteStore, D: Sensor, C: Clock>(
    store: &mut S,
    sensor: &mut D,
    clock: &C,
) -> Result<(), TelemetryError> {
    let measurement = sensor.sample().await?;
    if !measurement.is_valid() {
        warn!("sensor returned NaN, skipping this cycle");
        return Err(TelemetryError::InvalidReading);
    }

    let now = clock.now().await.ok_or(TelemetryError::ClockNotSynchronized)?;
    let base = sample_path(now);

    write_field(store, &base, "temperature", measurement.temperature).await;
    write_field(store, &base, "humidity", measurement.humidity).await;

    info!(
        "pushed {}: {} °C, {} %RH",
        base.as_str(),
        measurement.temperature,
        measurement.humidity
    );
    Ok(())
}

async fn write_field<S: RemoteStore>(store: &mut S, base: &Path, field: &str, value: f32) {
    let mut path = base.clone();
    let _ = write!(path, "/{}", field);
    if let Err(e) = store.write_float(path.as_str(), value).await {
        warn!("telemetry write {} failed, sample field dropped: {:?}", field, e);
    }
}
