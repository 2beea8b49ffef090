//! Configuration constants for the ATmega328P motor firmware

use crate::drivers::motor_driver::MotorPins;
use crate::hal::adc::{AdcPrescaler, AdcReference};
use crate::hal::Pin;

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 16_000_000;

/// UART baud rate
pub const UART_BAUD: u32 = 9600;

/// ADC reference voltage in millivolts
pub const ADC_VREF_MV: u16 = 5000;

pub const ADC_REFERENCE: AdcReference = AdcReference::Avcc;

/// 125kHz @ 16MHz
pub const ADC_PRESCALER: AdcPrescaler = AdcPrescaler::for_cpu_clock(CPU_FREQ_HZ);

/// Timer clock divider set by `Hal::init_pwm` (CSn1 only)
pub const PWM_PRESCALER: u32 = 8;

/// Fast PWM period frequency for an 8-bit counter.
pub const fn pwm_frequency_hz(cpu_hz: u32, prescaler: u32) -> u32 {
    cpu_hz / (prescaler * 256)
}

pub const PWM_FREQ_HZ: u32 = pwm_frequency_hz(CPU_FREQ_HZ, PWM_PRESCALER);

// TB6612FNG wiring
pub const MOTOR_A: MotorPins = MotorPins::new(Pin::D9, Pin::D8, Pin::D3);
pub const MOTOR_B: MotorPins = MotorPins::new(Pin::D11, Pin::D12, Pin::D5);
pub const STANDBY_PIN: Pin = Pin::D10;

// LED self-test
pub const SELF_TEST_LED: Pin = Pin::D13;
pub const SELF_TEST_BLINKS: u8 = 5;
pub const SELF_TEST_HALF_PERIOD_MS: u16 = 200;

/// One step of the demo drive sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Phase {
    pub label: &'static str,
    pub motor_a: i16,
    pub motor_b: i16,
    pub hold_ms: u16,
}

impl Phase {
    pub const fn drive(label: &'static str, motor_a: i16, motor_b: i16, hold_ms: u16) -> Self {
        Self {
            label,
            motor_a,
            motor_b,
            hold_ms,
        }
    }

    pub const fn brake(hold_ms: u16) -> Self {
        Self::drive("stop", 0, 0, hold_ms)
    }

    pub const fn is_brake(&self) -> bool {
        self.motor_a == 0 && self.motor_b == 0
    }
}

pub const DEMO_SEQUENCE: [Phase; 6] = [
    Phase::drive("forward", 128, 128, 2000),
    Phase::brake(1000),
    Phase::drive("backward", -192, -192, 2000),
    Phase::brake(1000),
    Phase::drive("turn right", 128, -128, 1000),
    Phase::brake(2000),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pwm_frequency() {
        assert_eq!(PWM_FREQ_HZ, 7812);
    }

    #[test]
    fn adc_clock_in_range() {
        assert_eq!(ADC_PRESCALER, AdcPrescaler::Div128);
        let adc_hz = CPU_FREQ_HZ / ADC_PRESCALER.divisor();
        assert!((50_000..=200_000).contains(&adc_hz));
    }

    #[test]
    fn standby_is_not_a_motor_pin() {
        for motor in [MOTOR_A, MOTOR_B] {
            assert!(!motor.contains(STANDBY_PIN));
            assert!(motor.pwm.pwm_channel().is_some());
        }
    }

    #[test]
    fn demo_sequence_is_total_nine_seconds() {
        let total: u32 = DEMO_SEQUENCE.iter().map(|p| u32::from(p.hold_ms)).sum();
        assert_eq!(total, 9000);
        assert!(DEMO_SEQUENCE.last().map_or(false, Phase::is_brake));
    }
}
