use crate::config::{BitTiming, Configuration, TimingError, TimingField};
use crate::status::OperationMode;
use embedded_time::rate::Hertz;

#[test]
fn test_bit_timing_register_round_trip() {
    for sjw in 0..=3 {
        for ts2 in 0..=7 {
            for ts1 in 0..=15 {
                let timing = BitTiming::new(sjw, ts2, ts1).unwrap();
                let register = timing.as_register();

                assert_eq!(ts1 as u16, register & 0xF);
                assert_eq!(ts2 as u16, (register >> 4) & 0x7);
                assert_eq!(sjw as u16, (register >> 7) & 0x3);
                assert_eq!(timing, BitTiming::from_register(register));
            }
        }
    }
}

#[test]
fn test_bit_timing_as_register() {
    assert_eq!(0x0000, BitTiming::default().as_register());
    assert_eq!(0x01FF, BitTiming { sjw: 3, ts2: 7, ts1: 15 }.as_register());
    assert_eq!(0x0180, BitTiming { sjw: 3, ts2: 0, ts1: 0 }.as_register());
    assert_eq!(0x0070, BitTiming { sjw: 0, ts2: 7, ts1: 0 }.as_register());
}

#[test]
fn test_bit_timing_from_register_ignores_reserved_bits() {
    assert_eq!(
        BitTiming { sjw: 1, ts2: 2, ts1: 3 },
        BitTiming::from_register(0xFE00 | 0x00A3)
    );
}

#[test]
fn test_bit_timing_out_of_range() {
    for (sjw, ts2, ts1, field, value) in [
        (4, 0, 0, TimingField::SyncJumpWidth, 4),
        (0, 8, 0, TimingField::TimeSegment2, 8),
        (0, 0, 16, TimingField::TimeSegment1, 16),
        (255, 255, 255, TimingField::SyncJumpWidth, 255),
    ] {
        assert_eq!(
            TimingError::OutOfRange { field, value },
            BitTiming::new(sjw, ts2, ts1).unwrap_err()
        );
    }
}

#[test]
fn test_quanta_per_bit() {
    assert_eq!(3, BitTiming::default().quanta_per_bit());
    assert_eq!(25, BitTiming { sjw: 3, ts2: 7, ts1: 15 }.quanta_per_bit());
}

#[test]
fn test_prescaler_for() {
    let timing = BitTiming::new(0, 6, 15).unwrap();

    assert_eq!(Ok(0), timing.prescaler_for(Hertz(24_000_000), Hertz(1_000_000)));
    assert_eq!(Ok(1), timing.prescaler_for(Hertz(24_000_000), Hertz(500_000)));
    assert_eq!(Ok(3), timing.prescaler_for(Hertz(24_000_000), Hertz(250_000)));
    assert_eq!(Ok(99), timing.prescaler_for(Hertz(24_000_000), Hertz(10_000)));
}

#[test]
fn test_prescaler_for_round_trip() {
    let timing = BitTiming::new(1, 3, 10).unwrap();
    let clock = Hertz(80_000_000);

    for bit_rate in [1_000_000, 500_000, 250_000, 125_000, 100_000] {
        let prescaler = timing.prescaler_for(clock, Hertz(bit_rate)).unwrap();
        assert_eq!(bit_rate, timing.bit_rate(clock, prescaler).0);
    }
}

#[test]
fn test_prescaler_for_unreachable() {
    let timing = BitTiming::new(0, 6, 15).unwrap();

    // not an integer divisor
    assert_eq!(
        Err(TimingError::UnreachableBitRate(700_000)),
        timing.prescaler_for(Hertz(24_000_000), Hertz(700_000))
    );
    // prescaler would exceed 256
    assert_eq!(
        Err(TimingError::UnreachableBitRate(1_000)),
        timing.prescaler_for(Hertz(24_000_000), Hertz(1_000))
    );
    // faster than one quantum per clock
    assert_eq!(
        Err(TimingError::UnreachableBitRate(2_000_000)),
        timing.prescaler_for(Hertz(24_000_000), Hertz(2_000_000))
    );
    assert_eq!(
        Err(TimingError::UnreachableBitRate(0)),
        timing.prescaler_for(Hertz(24_000_000), Hertz(0))
    );
}

#[test]
fn test_configuration_default() {
    let config = Configuration::default();

    assert_eq!(OperationMode::Normal, config.mode);
    assert_eq!(0, config.prescaler);
    assert_eq!(BitTiming::default(), config.bit_timing);
    assert_eq!(0, config.filter_enable);
}
