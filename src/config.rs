use crate::registers::BitTimingReg;
use crate::status::OperationMode;
use embedded_time::rate::Hertz;
use log::debug;
use serde::{Deserialize, Serialize};

pub const MAX_SYNC_JUMP_WIDTH: u8 = 3;

pub const MAX_TIME_SEGMENT_2: u8 = 7;

pub const MAX_TIME_SEGMENT_1: u8 = 15;

/// Entire controller configuration applied by [crate::can::Controller::configure]
#[derive(Default, Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Mode entered once all registers are written
    pub mode: OperationMode,

    /// Baud rate prescaler, time quantum is `(prescaler + 1)` clock cycles
    pub prescaler: u8,

    pub bit_timing: BitTiming,

    /// Enable bits of acceptance filters 1-4 in bits 0-3
    pub filter_enable: u8,
}

/// Field of the bit timing register
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimingField {
    SyncJumpWidth,
    TimeSegment2,
    TimeSegment1,
}

/// Invalid bit timing or bit rate
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimingError {
    /// Value exceeds the width of its register field
    OutOfRange { field: TimingField, value: u8 },
    /// Bit rate (Hz) can't be derived exactly from the clock with any prescaler
    UnreachableBitRate(u32),
}

/// Bit timing parameters, all values are register values (time quanta minus one)
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitTiming {
    /// Synchronization jump width, 0-3
    pub sjw: u8,
    /// Phase segment 2, 0-7
    pub ts2: u8,
    /// Propagation and phase segment 1, 0-15
    pub ts1: u8,
}

impl BitTiming {
    /// Creates validated bit timing parameters
    pub fn new(sjw: u8, ts2: u8, ts1: u8) -> Result<Self, TimingError> {
        let timing = Self { sjw, ts2, ts1 };
        timing.validate()?;

        Ok(timing)
    }

    /// Checks every field against its register width
    pub fn validate(&self) -> Result<(), TimingError> {
        let checks = [
            (TimingField::SyncJumpWidth, self.sjw, MAX_SYNC_JUMP_WIDTH),
            (TimingField::TimeSegment2, self.ts2, MAX_TIME_SEGMENT_2),
            (TimingField::TimeSegment1, self.ts1, MAX_TIME_SEGMENT_1),
        ];

        for (field, value, max) in checks {
            if value > max {
                debug!("Bit timing field {field:?} = {value} exceeds {max}");
                return Err(TimingError::OutOfRange { field, value });
            }
        }

        Ok(())
    }

    /// Maps register values to configuration
    pub(crate) fn from_register(register: u16) -> Self {
        let reg = BitTimingReg::from_register(register);

        Self {
            sjw: reg.sjw(),
            ts2: reg.ts2(),
            ts1: reg.ts1(),
        }
    }

    /// Encodes the timing to the 16 bit register value, fields must be validated
    pub(crate) fn as_register(&self) -> u16 {
        BitTimingReg::new()
            .with_sjw(self.sjw)
            .with_ts2(self.ts2)
            .with_ts1(self.ts1)
            .as_register()
    }

    /// Number of time quanta per bit: sync segment plus both phase segments
    pub fn quanta_per_bit(&self) -> u32 {
        1 + (self.ts1 as u32 + 1) + (self.ts2 as u32 + 1)
    }

    /// Resulting bit rate for the given controller clock and prescaler
    pub fn bit_rate(&self, clock: Hertz, prescaler: u8) -> Hertz {
        Hertz(clock.0 / ((prescaler as u32 + 1) * self.quanta_per_bit()))
    }

    /// Calculates the prescaler register value reaching `bit_rate` exactly
    pub fn prescaler_for(&self, clock: Hertz, bit_rate: Hertz) -> Result<u8, TimingError> {
        let unreachable = TimingError::UnreachableBitRate(bit_rate.0);

        let quanta_rate = bit_rate.0.checked_mul(self.quanta_per_bit()).ok_or(unreachable)?;
        if quanta_rate == 0 || clock.0 % quanta_rate != 0 {
            debug!("Bit rate {} Hz not reachable from {} Hz clock", bit_rate.0, clock.0);
            return Err(unreachable);
        }

        match clock.0 / quanta_rate {
            divisor @ 1..=256 => Ok((divisor - 1) as u8),
            divisor => {
                debug!("Prescaler divisor {divisor} out of range for {} Hz", bit_rate.0);
                Err(unreachable)
            }
        }
    }
}
