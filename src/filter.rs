//!# Acceptance filters
//! The controller offers four acceptance filters, each a mask/ID register pair. A received frame
//! passes a filter if all identifier bits selected by the mask match. With no filter enabled
//! every frame is accepted.
//!
//! ```
//!# use axi_can::filter::Filter;
//!# use embedded_can::{Id, ExtendedId};
//!
//! // ID to match
//! let id = Id::Extended(ExtendedId::new(0xC672).unwrap());
//! // Create filter number 2
//! let mut filter = Filter::new(id, 2).unwrap();
//! // Only the upper byte of the 16 LSB needs to match
//! filter.set_mask_extended_id(0xFF00);
//! ```
use crate::message::{EXTENDED_IDENTIFIER_MASK, STANDARD_IDENTIFIER_MASK};
use crate::registers::{AcceptanceFilterReg, IdentifierReg, Register};
use core::convert::TryFrom;
use embedded_can::Id;

/// Highest valid value of the filter enable register
pub const MAX_FILTER_ENABLE: u8 = 0b1111;

/// Invalid filter configuration
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Enable mask sets bits beyond the four filters
    OutOfRange(u8),
    /// Filter number not within 1-4
    InvalidFilter(u8),
}

/// One of the four acceptance filters
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FilterNumber {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl TryFrom<u8> for FilterNumber {
    type Error = FilterError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(FilterError::InvalidFilter(other)),
        }
    }
}

impl FilterNumber {
    /// Acceptance filter mask register
    pub fn mask_register(&self) -> Register {
        match self {
            Self::One => Register::AFMR1,
            Self::Two => Register::AFMR2,
            Self::Three => Register::AFMR3,
            Self::Four => Register::AFMR4,
        }
    }

    /// Acceptance filter ID register
    pub fn id_register(&self) -> Register {
        match self {
            Self::One => Register::AFIR1,
            Self::Two => Register::AFIR2,
            Self::Three => Register::AFIR3,
            Self::Four => Register::AFIR4,
        }
    }

    /// Bit of this filter in the enable register
    pub fn enable_bit(&self) -> u8 {
        1 << (*self as u8 - 1)
    }
}

/// Decoded filter enable register
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct FilterEnable(u8);

impl FilterEnable {
    /// Creates the enable mask, bit 0 enables filter 1
    pub fn new(mask: u8) -> Result<Self, FilterError> {
        if mask > MAX_FILTER_ENABLE {
            return Err(FilterError::OutOfRange(mask));
        }

        Ok(Self(mask))
    }

    pub(crate) fn from_register(register: u8) -> Self {
        let reg = AcceptanceFilterReg::from(register);
        let mut mask = 0;

        for (enabled, number) in [
            (reg.uaf1(), FilterNumber::One),
            (reg.uaf2(), FilterNumber::Two),
            (reg.uaf3(), FilterNumber::Three),
            (reg.uaf4(), FilterNumber::Four),
        ] {
            if enabled {
                mask |= number.enable_bit();
            }
        }

        Self(mask)
    }

    pub fn is_enabled(&self, number: FilterNumber) -> bool {
        self.0 & number.enable_bit() != 0
    }

    pub fn with(self, number: FilterNumber, enabled: bool) -> Self {
        if enabled {
            Self(self.0 | number.enable_bit())
        } else {
            Self(self.0 & !number.enable_bit())
        }
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}

/// Mask/ID pair of one acceptance filter
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Filter {
    pub(crate) number: FilterNumber,
    /// mask register bitfield
    pub(crate) mask_bits: IdentifierReg,
    /// ID register bitfield
    pub(crate) filter_bits: IdentifierReg,
}

impl Filter {
    /// Create new filter matching the given identifier, all bits masked
    pub fn new(identifier: Id, number: u8) -> Result<Self, FilterError> {
        let number = FilterNumber::try_from(number)?;

        let mut filter = Self {
            number,
            mask_bits: IdentifierReg::new(),
            filter_bits: IdentifierReg::new(),
        };
        filter.set_id(identifier);

        match identifier {
            Id::Standard(_) => filter.set_mask_standard_id(STANDARD_IDENTIFIER_MASK),
            Id::Extended(_) => filter.set_mask_extended_id(0x1FFF_FFFF),
        }

        Ok(filter)
    }

    /// Filter built from raw register contents
    pub(crate) fn from_registers(number: FilterNumber, mask: u32, id: u32) -> Self {
        Self {
            number,
            mask_bits: IdentifierReg::from_register(mask),
            filter_bits: IdentifierReg::from_register(id),
        }
    }

    pub fn number(&self) -> FilterNumber {
        self.number
    }

    /// Mask register value
    pub fn mask_register(&self) -> u32 {
        self.mask_bits.as_register()
    }

    /// ID register value
    pub fn id_register(&self) -> u32 {
        self.filter_bits.as_register()
    }

    /// Set mask for extended Id, bits above 29 are ignored
    pub fn set_mask_extended_id(&mut self, mask: u32) {
        self.mask_bits.set_idl(mask & EXTENDED_IDENTIFIER_MASK);
        self.mask_bits.set_idh((mask >> 18) as u16 & STANDARD_IDENTIFIER_MASK);
    }

    /// Set mask for standard Id, bits above 11 are ignored
    pub fn set_mask_standard_id(&mut self, mask: u16) {
        self.mask_bits.set_idh(mask & STANDARD_IDENTIFIER_MASK);
    }

    /// Set filter and mask so that only messages with Standard Id match
    pub fn match_standard_only(&mut self) {
        self.mask_bits.set_ide(true);
        self.filter_bits.set_ide(false);
    }

    /// Set filter and mask so that only messages with Extended Id match
    pub fn match_extended_only(&mut self) {
        self.mask_bits.set_ide(true);
        self.filter_bits.set_ide(true);
    }

    /// Match only remote (`true`) or only data (`false`) frames
    pub fn match_remote(&mut self, remote: bool) {
        if self.filter_bits.ide() {
            self.mask_bits.set_rtr(true);
            self.filter_bits.set_rtr(remote);
        } else {
            self.mask_bits.set_srrrtr(true);
            self.filter_bits.set_srrrtr(remote);
        }
    }

    fn set_id(&mut self, identifier: Id) {
        match identifier {
            Id::Standard(sid) => self.filter_bits.set_idh(sid.as_raw()),
            Id::Extended(eid) => {
                self.filter_bits.set_idl(eid.as_raw() & EXTENDED_IDENTIFIER_MASK);
                self.filter_bits.set_idh((eid.as_raw() >> 18) as u16 & STANDARD_IDENTIFIER_MASK);
                self.filter_bits.set_ide(true);
            }
        }
    }
}
