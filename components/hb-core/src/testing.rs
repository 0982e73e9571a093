//! Host-side fakes for the collaborator traits. Every fake hands out a
//! cloneable handle to its state so tests can keep observing after the
//! bridge has taken ownership of the collaborator itself.

use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, BTreeSet},
    rc::Rc,
};

use chrono::NaiveDateTime;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::{
    sensor::{Measurement, Sensor, SensorError},
    store::{RemoteStore, StoreError},
};

/// A GPIO line whose level stays readable through cloned handles.
#[derive(Clone)]
pub struct FakePin {
    level: Rc<Cell<bool>>,
}

impl FakePin {
    pub fn new(level: bool) -> Self {
        FakePin {
            level: Rc::new(Cell::new(level)),
        }
    }

    pub fn level(&self) -> bool {
        self.level.get()
    }
}

impl ErrorType for FakePin {
    type Error = core::convert::Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.level.set(true);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Read(String),
    Write(String),
}

#[derive(Default)]
struct StoreInner {
    ready: bool,
    ints: BTreeMap<String, i64>,
    failing_reads: BTreeSet<String>,
    failing_writes: BTreeSet<String>,
    writes: Vec<(String, f32)>,
    ops: Vec<StoreOp>,
}

/// Observation/scripting handle for a [`FakeStore`].
#[derive(Clone)]
pub struct StoreState {
    inner: Rc<RefCell<StoreInner>>,
}

impl StoreState {
    pub fn set_ready(&self, ready: bool) {
        self.inner.borrow_mut().ready = ready;
    }

    pub fn set_int(&self, path: &str, value: i64) {
        self.inner.borrow_mut().ints.insert(path.into(), value);
    }

    pub fn fail_reads_of(&self, path: &str) {
        self.inner.borrow_mut().failing_reads.insert(path.into());
    }

    pub fn clear_read_failures(&self) {
        self.inner.borrow_mut().failing_reads.clear();
    }

    pub fn fail_writes_of(&self, path: &str) {
        self.inner.borrow_mut().failing_writes.insert(path.into());
    }

    /// Successfully written (path, value) pairs, in order.
    pub fn writes(&self) -> Vec<(String, f32)> {
        self.inner.borrow().writes.clone()
    }

    /// Paths of all attempted reads, in order.
    pub fn reads(&self) -> Vec<String> {
        self.inner
            .borrow()
            .ops
            .iter()
            .filter_map(|op| match op {
                StoreOp::Read(path) => Some(path.clone()),
                StoreOp::Write(_) => None,
            })
            .collect()
    }

    /// Full operation log, reads and writes interleaved as issued.
    pub fn ops(&self) -> Vec<StoreOp> {
        self.inner.borrow().ops.clone()
    }
}

/// In-memory remote store. Reads miss with [`StoreError::Missing`] unless a
/// value was scripted; scripted failures return [`StoreError::Transport`].
pub struct FakeStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl FakeStore {
    pub fn new() -> (Self, StoreState) {
        let inner = Rc::new(RefCell::new(StoreInner {
            ready: true,
            ..StoreInner::default()
        }));
        (
            FakeStore { inner: inner.clone() },
            StoreState { inner },
        )
    }
}

impl RemoteStore for FakeStore {
    async fn is_ready(&mut self) -> bool {
        self.inner.borrow().ready
    }

    async fn read_int(&mut self, path: &str) -> Result<i64, StoreError> {
        let mut inner = self.inner.borrow_mut();
        inner.ops.push(StoreOp::Read(path.into()));
        if inner.failing_reads.contains(path) {
            return Err(StoreError::Transport);
        }
        inner.ints.get(path).copied().ok_or(StoreError::Missing)
    }

    async fn write_float(&mut self, path: &str, value: f32) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        inner.ops.push(StoreOp::Write(path.into()));
        if inner.failing_writes.contains(path) {
            return Err(StoreError::Transport);
        }
        inner.writes.push((path.into(), value));
        Ok(())
    }
}

enum SensorScript {
    Always(Measurement),
    Failing(SensorError),
}

/// Sensor fake: a fixed reading or a fixed failure, plus a sample counter.
#[derive(Clone)]
pub struct FakeSensor {
    script: Rc<SensorScript>,
    samples: Rc<Cell<usize>>,
}

impl FakeSensor {
    pub fn always(measurement: Measurement) -> Self {
        FakeSensor {
            script: Rc::new(SensorScript::Always(measurement)),
            samples: Rc::new(Cell::new(0)),
        }
    }

    pub fn failing(error: SensorError) -> Self {
        FakeSensor {
            script: Rc::new(SensorScript::Failing(error)),
            samples: Rc::new(Cell::new(0)),
        }
    }

    pub fn samples_taken(&self) -> usize {
        self.samples.get()
    }
}

impl Sensor for FakeSensor {
    async fn sample(&mut self) -> Result<Measurement, SensorError> {
        self.samples.set(self.samples.get() + 1);
        match &*self.script {
            SensorScript::Always(measurement) => Ok(*measurement),
            SensorScript::Failing(SensorError::Bus) => Err(SensorError::Bus),
            SensorScript::Failing(SensorError::Timeout) => Err(SensorError::Timeout),
        }
    }
}

/// Settable wall clock.
#[derive(Clone)]
pub struct FakeClock {
    now: Rc<Cell<Option<NaiveDateTime>>>,
}

impl FakeClock {
    pub fn at(now: NaiveDateTime) -> Self {
        FakeClock {
            now: Rc::new(Cell::new(Some(now))),
        }
    }

    pub fn unsynchronized() -> Self {
        FakeClock {
            now: Rc::new(Cell::new(None)),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(Some(now));
    }
}

impl crate::time::Clock for FakeClock {
    async fn now(&self) -> Option<NaiveDateTime> {
        self.now.get()
    }
}
