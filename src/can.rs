//!# CAN Controller device
//!
//!```
//!# use axi_can::can::Controller;
//!# use axi_can::config::Configuration;
//!# use axi_can::example::ExampleChannel;
//!#
//! let channel = ExampleChannel::default();
//!
//! // Initialize controller object for the register block at 0x0
//! let mut can_controller = Controller::new(channel, 0x0);
//!
//! // Use default configuration settings
//! let can_config = Configuration::default();
//!
//! // Configure CAN controller
//! can_controller.configure(&can_config).unwrap();
//! ```

use crate::channel::{AccessError, RegisterChannel};
use crate::config::{BitTiming, Configuration, TimingError};
use crate::filter::{Filter, FilterEnable, FilterError, FilterNumber};
use crate::frame::CanFrame;
use crate::message::{DataWord, Dlc, DlcError, IdentifierField, MessageRegisters};
use crate::registers::{ModeSelectReg, Register, ResetReg, StatusReg};
use crate::status::{
    ControllerStatus, ErrorCounter, ErrorCounters, ErrorStatus, ModeError, OperationMode, TxBuffer,
};
use byteorder::{ByteOrder, LittleEndian};
use core::convert::TryFrom;
use embedded_can::Id;
use embedded_time::rate::Hertz;
use log::debug;

/// Possible CAN errors during Configuration/Transmission/Reception
#[derive(Debug, PartialEq)]
pub enum CanError<E> {
    /// Register channel error
    BusErr(AccessError<E>),
    /// Invalid requested or reported operating mode
    Mode(ModeError),
    /// Invalid bit timing or bit rate
    Timing(TimingError),
    /// Invalid data length code
    Dlc(DlcError),
    /// Invalid acceptance filter settings
    Filter(FilterError),
}

impl<E> From<AccessError<E>> for CanError<E> {
    fn from(value: AccessError<E>) -> Self {
        CanError::BusErr(value)
    }
}

impl<E> From<ModeError> for CanError<E> {
    fn from(value: ModeError) -> Self {
        CanError::Mode(value)
    }
}

impl<E> From<TimingError> for CanError<E> {
    fn from(value: TimingError) -> Self {
        CanError::Timing(value)
    }
}

impl<E> From<DlcError> for CanError<E> {
    fn from(value: DlcError) -> Self {
        CanError::Dlc(value)
    }
}

impl<E> From<FilterError> for CanError<E> {
    fn from(value: FilterError) -> Self {
        CanError::Filter(value)
    }
}

type BusResult<T, C> = Result<T, AccessError<<C as RegisterChannel>::Error>>;

type CanResult<T, C> = Result<T, CanError<<C as RegisterChannel>::Error>>;

/// Main AXI CAN controller device
pub struct Controller<C: RegisterChannel> {
    /// Register access channel
    channel: C,

    /// Address of the register block within the channel
    base: u64,
}

impl<C: RegisterChannel> Controller<C> {
    pub fn new(channel: C, base: u64) -> Self {
        Self { channel, base }
    }

    /// Base address of the register block
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Returns the register channel
    pub fn release(self) -> C {
        self.channel
    }

    /// Configures the controller with the given settings.
    /// The whole configuration is validated before the first register is written.
    /// Any mode other than configuration mode leaves the controller enabled.
    pub fn configure(&mut self, config: &Configuration) -> CanResult<(), C> {
        config.bit_timing.validate()?;
        let filter_enable = FilterEnable::new(config.filter_enable)?;

        self.select_mode(OperationMode::Configuration)?;

        self.set_prescaler(config.prescaler)?;
        self.write_bit_timing(&config.bit_timing)?;
        self.write_register(Register::AFR, filter_enable.bits())?;

        self.select_mode(config.mode)?;
        if config.mode != OperationMode::Configuration {
            self.set_enable(true)?;
        }

        debug!("Controller at {:#x} configured: {config:?}", self.base);
        Ok(())
    }

    /// Reset internal registers to default
    pub fn reset(&mut self) -> BusResult<(), C> {
        self.write_register(Register::SRR, ResetReg::new().with_srst(true).into())
    }

    /// Writes the controller enable bit
    pub fn set_enable(&mut self, enabled: bool) -> BusResult<(), C> {
        self.write_register(Register::SRR, ResetReg::new().with_cen(!enabled).into())
    }

    /// Disables the controller and writes the mode bits of the given mode.
    /// Configuration mode needs no mode bits, disabling the controller enters it.
    pub fn select_mode(&mut self, mode: OperationMode) -> BusResult<(), C> {
        self.set_enable(false)?;

        if let Some(pattern) = mode.as_mode_select() {
            let reg = ModeSelectReg::from(pattern);
            debug!("Requesting {mode:?} (lback={}, sleep={})", reg.lback(), reg.sleep());

            self.write_register(Register::MSR, reg.into())?;
        }

        Ok(())
    }

    /// Selects the mode by raw code, see [OperationMode::try_from]
    pub fn select_mode_code(&mut self, code: u8) -> CanResult<(), C> {
        let mode = OperationMode::try_from(code)?;
        self.select_mode(mode)?;

        Ok(())
    }

    /// Reads the current operating mode from the status register
    pub fn query_mode(&mut self) -> CanResult<OperationMode, C> {
        let status = self.read32(Register::SR)?;

        let mode = OperationMode::from_status(status).map_err(|error| {
            debug!("Status register {status:#x} reports no known mode");
            error
        })?;

        Ok(mode)
    }

    /// Writes the baud rate prescaler
    pub fn set_prescaler(&mut self, value: u8) -> BusResult<(), C> {
        self.write_register(Register::BRPR, value)
    }

    /// Reads the baud rate prescaler
    pub fn query_prescaler(&mut self) -> BusResult<u8, C> {
        self.read_register(Register::BRPR)
    }

    /// Validates and writes the bit timing register
    pub fn set_bit_timing(&mut self, sjw: u8, ts2: u8, ts1: u8) -> CanResult<(), C> {
        let timing = BitTiming::new(sjw, ts2, ts1)?;
        self.write_bit_timing(&timing)?;

        Ok(())
    }

    /// Reads and decodes the bit timing register
    pub fn query_bit_timing(&mut self) -> BusResult<BitTiming, C> {
        let mut buffer = [0u8; 2];
        self.read(Register::BTR, &mut buffer)?;

        Ok(BitTiming::from_register(LittleEndian::read_u16(&buffer)))
    }

    /// Writes prescaler and bit timing reaching `bit_rate` from the controller `clock`
    pub fn set_bit_rate(&mut self, clock: Hertz, bit_rate: Hertz, timing: BitTiming) -> CanResult<(), C> {
        timing.validate()?;
        let prescaler = timing.prescaler_for(clock, bit_rate)?;

        self.set_prescaler(prescaler)?;
        self.write_bit_timing(&timing)?;

        Ok(())
    }

    /// Writes identifier and remote flag to the TX FIFO
    pub fn set_tx_id(&mut self, identifier: Id, remote: bool) -> BusResult<(), C> {
        let field = IdentifierField::new(identifier, remote);
        self.write32(Register::TXFIFO_ID, field.as_register())
    }

    /// Writes the data length code to the TX FIFO
    pub fn set_tx_dlc(&mut self, dlc: u8) -> CanResult<(), C> {
        let dlc = Dlc::new(dlc)?;
        self.write32(Register::TXFIFO_DLC, dlc.as_register())?;

        Ok(())
    }

    /// Writes one payload word to the TX FIFO
    pub fn set_tx_data_word(&mut self, which: DataWord, data: u32) -> BusResult<(), C> {
        let register = MessageRegisters::transmit(TxBuffer::Fifo).data_word(which);
        self.write32(register, data)
    }

    /// Queues the frame in the TX FIFO
    pub fn send_message(&mut self, frame: &CanFrame) -> CanResult<(), C> {
        self.write_message(TxBuffer::Fifo, frame)
    }

    /// Places the frame in the high priority transmit buffer
    pub fn send_hpb_message(&mut self, frame: &CanFrame) -> CanResult<(), C> {
        self.write_message(TxBuffer::Hpb, frame)
    }

    /// Reads identifier and remote flag of the frame at the RX FIFO head
    pub fn query_rx_id(&mut self) -> BusResult<(Id, bool), C> {
        let register = self.read32(Register::RXFIFO_ID)?;

        Ok(IdentifierField::from_register(register).id())
    }

    /// Reads the data length code of the frame at the RX FIFO head
    pub fn query_rx_dlc(&mut self) -> BusResult<u8, C> {
        let register = self.read32(Register::RXFIFO_DLC)?;

        Ok(Dlc::from_register(register).value())
    }

    /// Reads one payload word of the frame at the RX FIFO head
    pub fn query_rx_data_word(&mut self, which: DataWord) -> BusResult<u32, C> {
        self.read32(MessageRegisters::RX_FIFO.data_word(which))
    }

    /// Reads the frame at the RX FIFO head
    pub fn receive_message(&mut self) -> BusResult<CanFrame, C> {
        let registers = MessageRegisters::RX_FIFO;

        let identifier = IdentifierField::from_register(self.read32(registers.identifier)?);
        let dlc = Dlc::from_register(self.read32(registers.dlc)?);
        let first = self.read32(registers.first_word)?;
        let second = self.read32(registers.second_word)?;

        Ok(CanFrame::from_parts(identifier, dlc, [first, second]))
    }

    /// Reads one of the error counters
    pub fn query_error_count(&mut self, kind: ErrorCounter) -> BusResult<u8, C> {
        let mut buffer = [0u8; 1];
        let address = Register::ECR.address(self.base) + kind.byte_offset();

        self.channel.read(address, &mut buffer).map_err(AccessError::ChannelError)?;

        Ok(buffer[0])
    }

    /// Reads both error counters at once
    pub fn query_error_counters(&mut self) -> BusResult<ErrorCounters, C> {
        let mut buffer = [0u8; 2];
        self.read(Register::ECR, &mut buffer)?;

        Ok(ErrorCounters::from_register(buffer))
    }

    /// Reads the latched bus errors
    pub fn query_error_status(&mut self) -> BusResult<ErrorStatus, C> {
        let register = self.read_register(Register::ESR)?;

        Ok(ErrorStatus::from_register(register))
    }

    /// Clears the set flags of `status`
    pub fn clear_error_status(&mut self, status: &ErrorStatus) -> BusResult<(), C> {
        self.write_register(Register::ESR, status.as_register())
    }

    /// Returns true if the given transmit buffer is full
    pub fn query_tx_full(&mut self, target: TxBuffer) -> BusResult<bool, C> {
        let status = StatusReg::from_register(self.read32(Register::SR)?);

        Ok(match target {
            TxBuffer::Fifo => status.txfll(),
            TxBuffer::Hpb => status.txbfll(),
        })
    }

    /// Reads and decodes the status register
    pub fn query_status(&mut self) -> BusResult<ControllerStatus, C> {
        let register = self.read32(Register::SR)?;

        Ok(ControllerStatus::from_register(register))
    }

    /// Writes the acceptance filter enable bits, bit 0 enables filter 1
    pub fn set_filter_enable(&mut self, mask: u8) -> CanResult<(), C> {
        let enable = FilterEnable::new(mask).map_err(|error| {
            debug!("Filter enable mask {mask:#b} exceeds four filters");
            error
        })?;

        self.write_register(Register::AFR, enable.bits())?;
        Ok(())
    }

    /// Reads the acceptance filter enable bits
    pub fn query_filter_enable(&mut self) -> BusResult<FilterEnable, C> {
        let register = self.read_register(Register::AFR)?;

        Ok(FilterEnable::from_register(register))
    }

    /// Writes mask and ID of the filter and enables it.
    /// The filter is disabled while its registers are modified. If writing mask or ID fails,
    /// the filter stays disabled.
    pub fn set_filter(&mut self, filter: &Filter) -> BusResult<(), C> {
        let number = filter.number();
        let enable = self.query_filter_enable()?;

        self.write_register(Register::AFR, enable.with(number, false).bits())?;

        self.write32(number.mask_register(), filter.mask_register())?;
        self.write32(number.id_register(), filter.id_register())?;

        self.write_register(Register::AFR, enable.with(number, true).bits())?;

        Ok(())
    }

    /// Disables the given filter, other filters keep their state
    pub fn disable_filter(&mut self, number: FilterNumber) -> BusResult<(), C> {
        let enable = self.query_filter_enable()?;
        self.write_register(Register::AFR, enable.with(number, false).bits())
    }

    /// Reads mask and ID registers of the given filter
    pub fn query_filter(&mut self, number: FilterNumber) -> BusResult<Filter, C> {
        let mask = self.read32(number.mask_register())?;
        let id = self.read32(number.id_register())?;

        Ok(Filter::from_registers(number, mask, id))
    }

    /// Writes a validated bit timing
    fn write_bit_timing(&mut self, timing: &BitTiming) -> BusResult<(), C> {
        let mut buffer = [0u8; 2];
        LittleEndian::write_u16(&mut buffer, timing.as_register());

        self.write(Register::BTR, &buffer)
    }

    /// Writes ID, DLC and both data words of the frame, in that order
    fn write_message(&mut self, target: TxBuffer, frame: &CanFrame) -> CanResult<(), C> {
        let registers = MessageRegisters::transmit(target);
        let dlc = frame.length_code()?;
        let words = frame.data_words();

        self.write32(registers.identifier, frame.identifier_field().as_register())?;
        self.write32(registers.dlc, dlc.as_register())?;
        self.write32(registers.first_word, words[0])?;
        self.write32(registers.second_word, words[1])?;

        debug!("Frame {:?} written to {target:?}", frame.identifier);
        Ok(())
    }

    /// Writes a single register byte
    fn write_register(&mut self, register: Register, value: u8) -> BusResult<(), C> {
        self.write(register, &[value])
    }

    /// 4-byte register write
    fn write32(&mut self, register: Register, value: u32) -> BusResult<(), C> {
        let mut buffer = [0u8; 4];
        LittleEndian::write_u32(&mut buffer, value);

        self.write(register, &buffer)
    }

    /// Reads a single register byte
    fn read_register(&mut self, register: Register) -> BusResult<u8, C> {
        let mut buffer = [0u8; 1];
        self.read(register, &mut buffer)?;

        Ok(buffer[0])
    }

    /// 4-byte register read
    fn read32(&mut self, register: Register) -> BusResult<u32, C> {
        let mut buffer = [0u8; 4];
        self.read(register, &mut buffer)?;

        Ok(LittleEndian::read_u32(&buffer))
    }

    fn write(&mut self, register: Register, data: &[u8]) -> BusResult<(), C> {
        self.channel
            .write(register.address(self.base), data)
            .map_err(AccessError::ChannelError)
    }

    fn read(&mut self, register: Register, buffer: &mut [u8]) -> BusResult<(), C> {
        self.channel
            .read(register.address(self.base), buffer)
            .map_err(AccessError::ChannelError)
    }
}
