//! # In-memory register file for doc examples
//!
//! This code can be removed by disabling the `example` feature
use crate::channel::RegisterChannel;
use crate::registers::Register;
use core::convert::TryFrom;
use core::ops::Range;

const REGISTER_FILE_SIZE: usize = 0x100;

/// Register file of a single controller at base address 0x0, covering offsets 0x00-0xFF.
/// Accesses outside that range fail with [OutOfRange].
///
/// The status register reports normal mode. A write to the second TX FIFO data word
/// loops the TX FIFO message back into the RX FIFO registers.
#[derive(Debug)]
pub struct ExampleChannel {
    registers: [u8; REGISTER_FILE_SIZE],
}

impl Default for ExampleChannel {
    fn default() -> Self {
        let mut registers = [0u8; REGISTER_FILE_SIZE];
        registers[Register::SR.offset() as usize] = 0b1000;

        Self { registers }
    }
}

/// Access beyond the example register file
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OutOfRange {
    pub address: u64,
    pub length: usize,
}

impl ExampleChannel {
    fn range(address: u64, length: usize) -> Result<Range<usize>, OutOfRange> {
        let error = OutOfRange { address, length };

        let start = usize::try_from(address).map_err(|_| error)?;
        let end = start.checked_add(length).ok_or(error)?;
        if end > REGISTER_FILE_SIZE {
            return Err(error);
        }

        Ok(start..end)
    }
}

impl RegisterChannel for ExampleChannel {
    type Error = OutOfRange;

    fn read(&mut self, address: u64, buffer: &mut [u8]) -> Result<(), Self::Error> {
        let range = Self::range(address, buffer.len())?;
        buffer.copy_from_slice(&self.registers[range]);

        Ok(())
    }

    fn write(&mut self, address: u64, data: &[u8]) -> Result<(), Self::Error> {
        let range = Self::range(address, data.len())?;
        self.registers[range].copy_from_slice(data);

        if address == Register::TXFIFO_DW2.offset() {
            let tx = Register::TXFIFO_ID.offset() as usize;
            let rx = Register::RXFIFO_ID.offset() as usize;
            self.registers.copy_within(tx..tx + 16, rx);
        }

        Ok(())
    }
}
