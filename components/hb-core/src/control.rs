use core::fmt::Write;

use embedded_hal::digital::OutputPin;

use crate::{
    actuator::{ActuatorBank, ActuatorId},
    store::{Path, RemoteStore},
};

pub fn control_path(id: ActuatorId) -> Path {
    let mut path = Path::new();
    // Longest id is 5 bytes, well inside PATH_CAPACITY.
    let _ = write!(path, "Controls/{}/state", id.name());
    path
}

/// One control phase: mirror the remotely commanded state onto every line.
///
/// A failed read leaves that actuator exactly as it was; there is no retry
/// within the pass and no implicit reset to off. Nonzero values command on.
pub async fn sync_all<S: RemoteStore, P: OutputPin>(store: &mut S, bank: &mut ActuatorBank<P>) {
    for id in ActuatorId::ALL {
        let path = control_path(id);
        match store.read_int(path.as_str()).await {
            Ok(value) => {
                if bank.apply(id, value != 0).is_err() {
                    warn!("{} line write failed", id.name());
                }
            }
            Err(e) => {
                debug!("{} control read failed: {:?}, state left unchanged", id.name(), e);
            }
        }
    }
}
