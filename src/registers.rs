#![allow(unused_braces, unused_parens)]
use byteorder::{BigEndian, ByteOrder};
use modular_bitfield_msb::prelude::*;

/// Register map of the AXI CAN controller, discriminants are the offsets relative to the base address
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms, non_camel_case_types)]
#[repr(u64)]
pub enum Register {
    /// Software reset register, also carries the controller enable bit
    SRR = 0x00,
    /// Mode select register
    MSR = 0x04,
    /// Baud rate prescaler register
    BRPR = 0x08,
    /// Bit timing register
    BTR = 0x0C,
    /// Error counter register, TEC in the first byte and REC in the second
    ECR = 0x10,
    /// Error status register
    ESR = 0x14,
    /// Status register
    SR = 0x18,
    TXFIFO_ID = 0x30,
    TXFIFO_DLC = 0x34,
    TXFIFO_DW1 = 0x38,
    TXFIFO_DW2 = 0x3C,
    TXHPB_ID = 0x40,
    TXHPB_DLC = 0x44,
    TXHPB_DW1 = 0x48,
    TXHPB_DW2 = 0x4C,
    RXFIFO_ID = 0x50,
    RXFIFO_DLC = 0x54,
    RXFIFO_DW1 = 0x58,
    RXFIFO_DW2 = 0x5C,
    /// Acceptance filter enable register
    AFR = 0x60,
    AFMR1 = 0x64,
    AFIR1 = 0x68,
    AFMR2 = 0x6C,
    AFIR2 = 0x70,
    AFMR3 = 0x74,
    AFIR3 = 0x78,
    AFMR4 = 0x7C,
    AFIR4 = 0x80,
}

impl Register {
    /// Offset relative to the controller base address
    pub const fn offset(self) -> u64 {
        self as u64
    }

    /// Absolute address for a controller at `base`, wraps around at the end of the address space
    pub const fn address(self, base: u64) -> u64 {
        base.wrapping_add(self.offset())
    }
}

#[bitfield]
#[derive(Default, Copy, Clone, Debug)]
#[repr(u8)]
/// First byte of the software reset register
pub struct ResetReg {
    #[skip]
    __: B6,
    /// Controller held in configuration while set
    pub cen: bool,
    /// Software reset bit
    pub srst: bool,
}

#[bitfield]
#[derive(Default, Copy, Clone, Debug)]
#[repr(u8)]
/// First byte of the mode select register
pub struct ModeSelectReg {
    #[skip]
    __: B6,
    /// Loop back mode request
    pub lback: bool,
    /// Sleep mode request
    pub sleep: bool,
}

#[bitfield(bits = 16)]
#[derive(Default, Copy, Clone, Debug)]
/// Lower half of the bit timing register
pub struct BitTimingReg {
    #[skip]
    __: B7,
    /// Synchronization jump width
    pub sjw: B2,
    /// Time segment 2
    pub ts2: B3,
    /// Time segment 1
    pub ts1: B4,
}

impl BitTimingReg {
    pub(crate) fn from_register(value: u16) -> Self {
        let mut bytes = [0u8; 2];
        BigEndian::write_u16(&mut bytes, value);
        Self::from_bytes(bytes)
    }

    pub(crate) fn as_register(self) -> u16 {
        BigEndian::read_u16(&self.into_bytes())
    }
}

#[bitfield]
#[derive(Default, Copy, Clone, Debug)]
#[repr(u8)]
/// First byte of the error status register, all flags are cleared by writing 1
pub struct ErrorStatusReg {
    #[skip]
    __: B3,
    /// ACK error
    pub acker: bool,
    /// Bit error
    pub berr: bool,
    /// Stuff error
    pub ster: bool,
    /// Form error
    pub fmer: bool,
    /// CRC error
    pub crcer: bool,
}

#[bitfield(bits = 32)]
#[derive(Default, Copy, Clone, Debug)]
/// Status register
pub struct StatusReg {
    #[skip]
    __: B23,
    /// Error state of the controller
    pub estat: B2,
    /// An error counter reached the warning limit of 96
    pub errwrn: bool,
    /// High priority transmit buffer full
    pub txbfll: bool,
    /// Transmit FIFO full
    pub txfll: bool,
    /// One-hot operating mode: CONFIG, LBACK, SLEEP, NORMAL from bit 0 upwards
    pub mode: B4,
}

impl StatusReg {
    pub(crate) fn from_register(value: u32) -> Self {
        Self::from_bytes(u32_bytes(value))
    }

    #[cfg(test)]
    pub(crate) fn as_register(self) -> u32 {
        BigEndian::read_u32(&self.into_bytes())
    }
}

#[bitfield(bits = 32)]
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
/// Identifier register of the TX FIFO, TX HPB and RX FIFO.
/// Acceptance filter mask and ID registers share the layout.
pub struct IdentifierReg {
    /// Standard identifier or the 11 MSB of an extended identifier
    pub idh: B11,
    /// Remote request of standard frames, substitute remote request of extended frames
    pub srrrtr: bool,
    /// Identifier extension flag
    pub ide: bool,
    /// 18 LSB of an extended identifier
    pub idl: B18,
    /// Remote request of extended frames
    pub rtr: bool,
}

impl IdentifierReg {
    pub(crate) fn from_register(value: u32) -> Self {
        Self::from_bytes(u32_bytes(value))
    }

    pub(crate) fn as_register(self) -> u32 {
        BigEndian::read_u32(&self.into_bytes())
    }
}

#[bitfield(bits = 32)]
#[derive(Default, Copy, Clone, Debug)]
/// Data length code register of the TX FIFO, TX HPB and RX FIFO
pub struct DlcReg {
    /// Data length code
    pub dlc: B4,
    #[skip]
    __: B28,
}

impl DlcReg {
    pub(crate) fn from_register(value: u32) -> Self {
        Self::from_bytes(u32_bytes(value))
    }

    pub(crate) fn as_register(self) -> u32 {
        BigEndian::read_u32(&self.into_bytes())
    }
}

#[bitfield]
#[derive(Default, Copy, Clone, Debug)]
#[repr(u8)]
/// First byte of the acceptance filter register
pub struct AcceptanceFilterReg {
    #[skip]
    __: B4,
    pub uaf4: bool,
    pub uaf3: bool,
    pub uaf2: bool,
    pub uaf1: bool,
}

fn u32_bytes(value: u32) -> [u8; 4] {
    let mut bytes = [0u8; 4];
    BigEndian::write_u32(&mut bytes, value);
    bytes
}
