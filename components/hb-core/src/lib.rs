#![cfg_attr(target_os = "none", no_std)]

pub(crate) mod fmt;

pub mod actuator;
pub mod bridge;
pub mod control;
pub mod sensor;
pub mod store;
pub mod telemetry;
pub mod time;

#[cfg(test)]
pub(crate) mod testing;
