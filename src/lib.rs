#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![cfg_attr(feature = "strict", deny(warnings))]
#![allow(clippy::identity_op)]

//! # Library for AXI CAN controllers
//!
//! Register-level driver for AXI CAN controllers whose register block is reachable through a
//! positioned byte channel, e.g. an XDMA character device.
//!
//! Crate currently offer the following features:
//! * Operating mode selection and status decoding
//! * Bit timing and bit rate configuration
//! * Standard and extended ID formats, data and remote frames
//! * TX FIFO, TX high priority buffer and RX FIFO access
//! * Acceptance filters and error counters
//! * no_std support (disable the `std` feature)
//!
//!## CAN Tx/Rx example
//!
//!```
//!use axi_can::example::ExampleChannel;
//!use axi_can::can::Controller;
//!use axi_can::config::*;
//!use axi_can::frame::CanFrame;
//!use axi_can::status::OperationMode;
//!use embedded_can::{Frame, Id, StandardId};
//!
//!let channel = ExampleChannel::default();
//!let mut controller = Controller::new(channel, 0x0);
//!
//! // configure CAN controller
//!controller
//!    .configure(&Configuration {
//!        mode: OperationMode::Loopback,
//!        prescaler: 4,
//!        bit_timing: BitTiming { sjw: 0, ts2: 2, ts1: 15 },
//!        filter_enable: 0,
//!    })
//!    .unwrap();
//!
//! // Create message frame
//!let can_id = Id::Standard(StandardId::new(0x55).unwrap());
//!let frame = CanFrame::new(can_id, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
//!
//!// Transmit CAN message
//!controller.send_message(&frame).unwrap();
//!
//!// Receive CAN message
//!let received = controller.receive_message().unwrap();
//!assert_eq!(can_id, received.id());
//!assert_eq!([1, 2, 3, 4, 5, 6, 7, 8], received.data());
//!```

pub mod can;
pub mod channel;
pub mod config;
pub mod status;

pub mod filter;
pub mod frame;
pub mod message;

#[cfg(feature = "example")]
pub mod example;
#[cfg(test)]
pub(crate) mod mocks;
pub mod registers;
#[cfg(test)]
mod tests;
