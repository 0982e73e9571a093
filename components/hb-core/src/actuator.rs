use embedded_hal::digital::OutputPin;

/// The closed set of binary outputs the bridge drives. The discriminant
/// order fixes the pin order handed to [`ActuatorBank::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorId {
    Led1,
    Led2,
    Led3,
    Led4,
    Led5,
    Motor,
}

impl ActuatorId {
    pub const ALL: [ActuatorId; 6] = [
        ActuatorId::Led1,
        ActuatorId::Led2,
        ActuatorId::Led3,
        ActuatorId::Led4,
        ActuatorId::Led5,
        ActuatorId::Motor,
    ];

    /// Device id as it appears in remote store paths.
    pub fn name(self) -> &'static str {
        match self {
            ActuatorId::Led1 => "LED1",
            ActuatorId::Led2 => "LED2",
            ActuatorId::Led3 => "LED3",
            ActuatorId::Led4 => "LED4",
            ActuatorId::Led5 => "LED5",
            ActuatorId::Motor => "MOTOR",
        }
    }

    /// The motor enable line is wired active-low: a commanded "on" drives
    /// the line low. Everything else is straight-through.
    pub fn polarity(self) -> Polarity {
        match self {
            ActuatorId::Motor => Polarity::ActiveLow,
            _ => Polarity::ActiveHigh,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    /// Physical line level for a commanded logical state.
    pub fn line_level(self, on: bool) -> bool {
        match self {
            Polarity::ActiveHigh => on,
            Polarity::ActiveLow => !on,
        }
    }
}

/// The six output lines, one per [`ActuatorId`], in `ActuatorId::ALL` order.
///
/// There is no cached desired state: the pin level itself is the source of
/// truth, so re-applying the same command is a no-op at the hardware level.
pub struct ActuatorBank<P: OutputPin> {
    lines: [P; 6],
}

impl<P: OutputPin> ActuatorBank<P> {
    pub fn new(lines: [P; 6]) -> Self {
        ActuatorBank { lines }
    }

    /// Drive one actuator to the commanded logical state, honoring its
    /// polarity.
    pub fn apply(&mut self, id: ActuatorId, on: bool) -> Result<(), P::Error> {
        let line = &mut self.lines[id.index()];
        if id.polarity().line_level(on) {
            line.set_high()
        } else {
            line.set_low()
        }
    }
}
