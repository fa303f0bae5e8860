use crate::status::{
    ControllerStatus, ErrorCounter, ErrorCounters, ErrorState, ErrorStatus, ModeError, OperationMode,
};
use core::convert::TryFrom;
use OperationMode::{Configuration, Loopback, Normal, Sleep};

#[test]
fn test_operation_mode_from_status() {
    assert_eq!(Ok(Configuration), OperationMode::from_status(0b0001));
    assert_eq!(Ok(Loopback), OperationMode::from_status(0b0010));
    assert_eq!(Ok(Sleep), OperationMode::from_status(0b0100));
    assert_eq!(Ok(Normal), OperationMode::from_status(0b1000));

    assert_eq!(Ok(Normal), OperationMode::from_status(0xFFFF_FFF8));
}

#[test]
fn test_operation_mode_from_status_unknown() {
    for bits in [0b0000, 0b0011, 0b0101, 0b1001, 0b1111] {
        assert_eq!(Err(ModeError::UnknownState(bits as u8)), OperationMode::from_status(bits));
    }
}

#[test]
fn test_operation_mode_try_from_code() {
    assert_eq!(Ok(Configuration), OperationMode::try_from(0));
    assert_eq!(Ok(Loopback), OperationMode::try_from(1));
    assert_eq!(Ok(Sleep), OperationMode::try_from(2));
    assert_eq!(Ok(Normal), OperationMode::try_from(3));
    assert_eq!(Err(ModeError::InvalidMode(4)), OperationMode::try_from(4));
    assert_eq!(Err(ModeError::InvalidMode(255)), OperationMode::try_from(255));
}

#[test]
fn test_operation_mode_as_mode_select() {
    assert_eq!(None, Configuration.as_mode_select());
    assert_eq!(Some(0b10), Loopback.as_mode_select());
    assert_eq!(Some(0b01), Sleep.as_mode_select());
    assert_eq!(Some(0b00), Normal.as_mode_select());
}

#[test]
fn test_controller_status_from_register() {
    let status = ControllerStatus::from_register(0b0_0010_0001);
    assert_eq!(Ok(Configuration), status.mode);
    assert!(!status.tx_fifo_full);
    assert!(status.tx_hpb_full);
    assert!(!status.error_warning);
    assert_eq!(ErrorState::ConfigurationMode, status.error_state);

    assert_eq!(
        ErrorState::ErrorActive,
        ControllerStatus::from_register(0b0_1000_1000).error_state
    );
    assert_eq!(
        ErrorState::BusOff,
        ControllerStatus::from_register(0b1_0000_1000).error_state
    );
    assert_eq!(
        ErrorState::ErrorPassive,
        ControllerStatus::from_register(0b1_1000_1000).error_state
    );

    assert_eq!(
        Err(ModeError::UnknownState(0)),
        ControllerStatus::from_register(0b0_0100_0000).mode
    );
    assert!(ControllerStatus::from_register(0b0_0100_0000).error_warning);
}

#[test]
fn test_error_counter_byte_offset() {
    assert_eq!(0, ErrorCounter::Transmit.byte_offset());
    assert_eq!(1, ErrorCounter::Receive.byte_offset());
}

#[test]
fn test_error_counters_from_register() {
    assert_eq!(
        ErrorCounters {
            transmit: 0x10,
            receive: 0x80
        },
        ErrorCounters::from_register([0x10, 0x80])
    );
}

#[test]
fn test_error_status_from_register() {
    assert!(ErrorStatus::from_register(0b0001_0000).ack_error);
    assert!(ErrorStatus::from_register(0b0000_1000).bit_error);
    assert!(ErrorStatus::from_register(0b0000_0100).stuff_error);
    assert!(ErrorStatus::from_register(0b0000_0010).form_error);
    assert!(ErrorStatus::from_register(0b0000_0001).crc_error);

    assert!(!ErrorStatus::from_register(0b1110_0000).any());
    assert!(ErrorStatus::from_register(0b0000_0001).any());
}

#[test]
fn test_error_status_as_register() {
    assert_eq!(0, ErrorStatus::default().as_register());
    assert_eq!(0b0001_1111, ErrorStatus::from_register(0xFF).as_register());
    assert_eq!(
        0b0000_1010,
        ErrorStatus {
            bit_error: true,
            form_error: true,
            ..Default::default()
        }
        .as_register()
    );
}
