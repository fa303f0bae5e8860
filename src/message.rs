//!# Frame codec
//! Packs identifiers, data length codes and payload words into the FIFO register layout
//! and unpacks them again from the receive registers.
//!
//! ```
//!# use axi_can::message::IdentifierField;
//!# use embedded_can::{Id, StandardId};
//!#
//! let id = Id::Standard(StandardId::new(0x123).unwrap());
//! let field = IdentifierField::new(id, false);
//!
//! assert_eq!(0x123 << 21, field.as_register());
//! assert_eq!((id, false), IdentifierField::from_register(0x123 << 21).id());
//! ```
use crate::registers::{DlcReg, IdentifierReg, Register};
use crate::status::TxBuffer;
use byteorder::{BigEndian, ByteOrder};
use embedded_can::{ExtendedId, Id, StandardId};
use log::debug;

pub const STANDARD_IDENTIFIER_MASK: u16 = 0x7FF;

pub const EXTENDED_IDENTIFIER_MASK: u32 = 0x3FFFF;

pub const MAX_DLC: u8 = 15;

/// Data length code exceeds its 4 bit field
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DlcError {
    TooLarge(u8),
}

/// Validated data length code
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Dlc(u8);

impl Dlc {
    pub fn new(value: u8) -> Result<Self, DlcError> {
        if value > MAX_DLC {
            debug!("DLC {value} does not fit into 4 bits");
            return Err(DlcError::TooLarge(value));
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Register value, the code occupies the top nibble
    pub fn as_register(&self) -> u32 {
        DlcReg::new().with_dlc(self.0).as_register()
    }

    /// Decodes the code from the top nibble, reserved bits are ignored
    pub fn from_register(register: u32) -> Self {
        Self(DlcReg::from_register(register).dlc())
    }

    /// Number of payload bytes carried on the wire
    pub fn payload_length(&self) -> usize {
        (self.0 as usize).min(8)
    }
}

/// Content of an identifier register
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct IdentifierField(pub(crate) IdentifierReg);

impl IdentifierField {
    /// Encodes identifier and remote flag.
    ///
    /// Standard frames carry the remote request in bit 20. Extended frames set the
    /// identifier extension flag and, for remote frames, both bit 20 and bit 0.
    pub fn new(identifier: Id, remote: bool) -> Self {
        let reg = match identifier {
            Id::Standard(sid) => IdentifierReg::new().with_idh(sid.as_raw()).with_srrrtr(remote),
            Id::Extended(eid) => IdentifierReg::new()
                .with_idh((eid.as_raw() >> 18) as u16 & STANDARD_IDENTIFIER_MASK)
                .with_srrrtr(remote)
                .with_ide(true)
                .with_idl(eid.as_raw() & EXTENDED_IDENTIFIER_MASK)
                .with_rtr(remote),
        };

        Self(reg)
    }

    pub fn from_register(register: u32) -> Self {
        Self(IdentifierReg::from_register(register))
    }

    pub fn as_register(&self) -> u32 {
        self.0.as_register()
    }

    pub fn is_extended(&self) -> bool {
        self.0.ide()
    }

    pub fn is_remote(&self) -> bool {
        if self.0.ide() {
            self.0.rtr()
        } else {
            self.0.srrrtr()
        }
    }

    /// Decodes identifier and remote flag
    pub fn id(&self) -> (Id, bool) {
        (self.identifier(), self.is_remote())
    }

    fn identifier(&self) -> Id {
        if self.0.ide() {
            let raw = ((self.0.idh() as u32) << 18) | self.0.idl();
            // 11 + 18 bits always fit into 29 bits
            Id::Extended(ExtendedId::new(raw).unwrap_or(ExtendedId::MAX))
        } else {
            Id::Standard(StandardId::new(self.0.idh()).unwrap_or(StandardId::MAX))
        }
    }
}

/// One of the two payload words of a message
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DataWord {
    /// Payload bytes 0-3
    First,
    /// Payload bytes 4-7
    Second,
}

impl DataWord {
    /// Packs the payload bytes of this word, byte 0 lands in the most significant byte
    pub fn pack(&self, payload: &[u8; 8]) -> u32 {
        BigEndian::read_u32(&payload[self.range()])
    }

    /// Copies the word back into its payload bytes
    pub fn unpack(&self, word: u32, payload: &mut [u8; 8]) {
        BigEndian::write_u32(&mut payload[self.range()], word);
    }

    fn range(&self) -> core::ops::Range<usize> {
        match self {
            Self::First => 0..4,
            Self::Second => 4..8,
        }
    }
}

/// Register set of one message slot: identifier, DLC and both data words
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MessageRegisters {
    pub identifier: Register,
    pub dlc: Register,
    pub first_word: Register,
    pub second_word: Register,
}

impl MessageRegisters {
    pub const RX_FIFO: Self = Self {
        identifier: Register::RXFIFO_ID,
        dlc: Register::RXFIFO_DLC,
        first_word: Register::RXFIFO_DW1,
        second_word: Register::RXFIFO_DW2,
    };

    pub fn transmit(buffer: TxBuffer) -> Self {
        match buffer {
            TxBuffer::Fifo => Self {
                identifier: Register::TXFIFO_ID,
                dlc: Register::TXFIFO_DLC,
                first_word: Register::TXFIFO_DW1,
                second_word: Register::TXFIFO_DW2,
            },
            TxBuffer::Hpb => Self {
                identifier: Register::TXHPB_ID,
                dlc: Register::TXHPB_DLC,
                first_word: Register::TXHPB_DW1,
                second_word: Register::TXHPB_DW2,
            },
        }
    }

    pub fn data_word(&self, which: DataWord) -> Register {
        match which {
            DataWord::First => self.first_word,
            DataWord::Second => self.second_word,
        }
    }
}
