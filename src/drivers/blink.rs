//! LED self-test: a fixed number of on/off blinks at power-up.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

/// Drives `led` high then low `count` times, holding each level for
/// `half_period_ms`. Leaves the LED off.
pub fn self_test<P, D>(
    led: &mut P,
    delay: &mut D,
    count: u8,
    half_period_ms: u16,
) -> Result<(), P::Error>
where
    P: OutputPin,
    D: DelayMs<u16>,
{
    for _ in 0..count {
        led.set_high()?;
        delay.delay_ms(half_period_ms);
        led.set_low()?;
        delay.delay_ms(half_period_ms);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::delay::MockNoop;
    use embedded_hal_mock::pin::{Mock as PinMock, State, Transaction};

    #[test]
    fn blinks_count_times_and_ends_low() {
        let expectations = [
            Transaction::set(State::High),
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::set(State::Low),
        ];
        let mut led = PinMock::new(&expectations);
        let mut delay = MockNoop::new();

        self_test(&mut led, &mut delay, 3, 200).unwrap();
        led.done();
    }

    #[test]
    fn zero_count_touches_nothing() {
        let expectations: [Transaction; 0] = [];
        let mut led = PinMock::new(&expectations);
        let mut delay = MockNoop::new();

        self_test(&mut led, &mut delay, 0, 200).unwrap();
        led.done();
    }
}
