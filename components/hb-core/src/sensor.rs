#![allow(async_fn_in_trait)]

/// One temperature/humidity reading. Drivers report a failed conversion as
/// NaN in either field, matching the DHT-class sensor convention.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    pub temperature: f32, // °C
    pub humidity: f32,    // %RH
}

impl Measurement {
    pub fn is_valid(&self) -> bool {
        !self.temperature.is_nan() && !self.humidity.is_nan()
    }
}

#[derive(Debug, Eq, PartialEq)]
pub enum SensorError {
    Bus,
    Timeout,
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            SensorError::Bus => defmt::write!(f, "Bus"),
            SensorError::Timeout => defmt::write!(f, "Timeout"),
        }
    }
}

pub trait Sensor {
    async fn sample(&mut self) -> Result<Measurement, SensorError>;
}
