#![allow(async_fn_in_trait)]

/// Remote paths are short and bounded; 64 bytes covers the longest
/// telemetry path with room to spare.
pub const PATH_CAPACITY: usize = 64;

pub type Path = heapless::String<PATH_CAPACITY>;

#[derive(Debug, Eq, PartialEq)]
pub enum StoreError {
    Timeout,
    Transport,
    Missing,
}

#[cfg(feature = "defmt")]
impl defmt::Format for StoreError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            StoreError::Timeout => defmt::write!(f, "Timeout"),
            StoreError::Transport => defmt::write!(f, "Transport"),
            StoreError::Missing => defmt::write!(f, "Missing"),
        }
    }
}

impl From<embassy_time::TimeoutError> for StoreError {
    fn from(_err: embassy_time::TimeoutError) -> Self {
        StoreError::Timeout
    }
}

/// Client handle for the hierarchical remote key-value store.
///
/// The bridge holds exactly one handle and serializes all calls against it;
/// reconnection and session renewal are the implementor's concern. `is_ready`
/// gates the control phase each pass, so it must be cheap.
pub trait RemoteStore {
    async fn is_ready(&mut self) -> bool;

    /// Read an integer leaf. `Err(Missing)` for an absent path.
    async fn read_int(&mut self, path: &str) -> Result<i64, StoreError>;

    /// Write a float leaf, overwriting whatever is there.
    async fn write_float(&mut self, path: &str, value: f32) -> Result<(), StoreError>;
}
