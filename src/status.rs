use crate::registers::{ErrorStatusReg, StatusReg};
use core::convert::TryFrom;
use serde::{Deserialize, Serialize};

/// Operating mode of the controller
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationMode {
    /// Controller disabled, configuration registers writable
    Configuration,
    /// Internal loop back, transmitted frames are received again
    Loopback,
    /// Low power sleep mode
    Sleep,
    /// Normal operation on the bus
    Normal,
}

impl Default for OperationMode {
    fn default() -> Self {
        Self::Normal
    }
}

/// Unrecognized mode requested by the caller or reported by the hardware
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ModeError {
    /// Mode code passed by the caller is not one of 0..=3
    InvalidMode(u8),
    /// Status register reports no single known mode bit
    UnknownState(u8),
}

impl OperationMode {
    /// Decodes the one-hot mode bits in the lowest nibble of the status register
    pub(crate) fn from_status(register: u32) -> Result<Self, ModeError> {
        let bits = (register & 0xF) as u8;

        match bits {
            0b0001 => Ok(Self::Configuration),
            0b0010 => Ok(Self::Loopback),
            0b0100 => Ok(Self::Sleep),
            0b1000 => Ok(Self::Normal),
            other => Err(ModeError::UnknownState(other)),
        }
    }

    /// Mode select register pattern, `None` for configuration mode which is entered by disabling only
    pub(crate) fn as_mode_select(&self) -> Option<u8> {
        match self {
            Self::Configuration => None,
            Self::Loopback => Some(0b0000_0010),
            Self::Sleep => Some(0b0000_0001),
            Self::Normal => Some(0b0000_0000),
        }
    }
}

/// Maps raw mode codes 0 = configuration, 1 = loopback, 2 = sleep, 3 = normal
impl TryFrom<u8> for OperationMode {
    type Error = ModeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Configuration),
            1 => Ok(Self::Loopback),
            2 => Ok(Self::Sleep),
            3 => Ok(Self::Normal),
            other => Err(ModeError::InvalidMode(other)),
        }
    }
}

/// Fault confinement state reported in the status register
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorState {
    /// Controller is in configuration mode
    ConfigurationMode = 0b00,
    ErrorActive = 0b01,
    BusOff = 0b10,
    ErrorPassive = 0b11,
}

impl ErrorState {
    pub(crate) fn from_register(estat: u8) -> Self {
        match estat & 0b11 {
            0b00 => Self::ConfigurationMode,
            0b01 => Self::ErrorActive,
            0b10 => Self::BusOff,
            _ => Self::ErrorPassive,
        }
    }
}

/// Snapshot of the status register
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ControllerStatus {
    /// Current operating mode, error if the mode bits are not one-hot
    pub mode: Result<OperationMode, ModeError>,

    /// TX FIFO can't take another frame
    pub tx_fifo_full: bool,

    /// High priority buffer holds an untransmitted frame
    pub tx_hpb_full: bool,

    /// One of the error counters reached 96
    pub error_warning: bool,

    pub error_state: ErrorState,
}

impl ControllerStatus {
    pub(crate) fn from_register(register: u32) -> Self {
        let status = StatusReg::from_register(register);

        Self {
            mode: OperationMode::from_status(register),
            tx_fifo_full: status.txfll(),
            tx_hpb_full: status.txbfll(),
            error_warning: status.errwrn(),
            error_state: ErrorState::from_register(status.estat()),
        }
    }
}

/// Transmit path
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TxBuffer {
    Fifo,
    /// High priority buffer
    Hpb,
}

/// Selects one of the two error counters
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorCounter {
    Transmit,
    Receive,
}

impl ErrorCounter {
    /// Byte offset within the error counter register
    pub(crate) fn byte_offset(&self) -> u64 {
        match self {
            Self::Transmit => 0,
            Self::Receive => 1,
        }
    }
}

/// Both error counters, maintained by the hardware
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorCounters {
    pub transmit: u8,
    pub receive: u8,
}

impl ErrorCounters {
    pub(crate) fn from_register(register: [u8; 2]) -> Self {
        Self {
            transmit: register[0],
            receive: register[1],
        }
    }
}

/// Bus errors latched in the error status register
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorStatus {
    pub ack_error: bool,
    pub bit_error: bool,
    pub stuff_error: bool,
    pub form_error: bool,
    pub crc_error: bool,
}

impl ErrorStatus {
    pub(crate) fn from_register(register: u8) -> Self {
        let status = ErrorStatusReg::from(register);

        Self {
            ack_error: status.acker(),
            bit_error: status.berr(),
            stuff_error: status.ster(),
            form_error: status.fmer(),
            crc_error: status.crcer(),
        }
    }

    /// Encodes the flags as register byte, set flags are cleared when written
    pub(crate) fn as_register(&self) -> u8 {
        ErrorStatusReg::new()
            .with_acker(self.ack_error)
            .with_berr(self.bit_error)
            .with_ster(self.stuff_error)
            .with_fmer(self.form_error)
            .with_crcer(self.crc_error)
            .into()
    }

    /// True if any error flag is latched
    pub fn any(&self) -> bool {
        self.ack_error || self.bit_error || self.stuff_error || self.form_error || self.crc_error
    }
}
