//! Busy-wait delays calibrated for the CPU clock.
//!
//! Timer0 is taken by PWM, so delays count instructions instead of timer
//! ticks. Accurate to a few percent, which is enough for multi-second motor
//! phases and LED blinking.

use embedded_hal::blocking::delay::{DelayMs, DelayUs};

use crate::config::CPU_FREQ_HZ;

/// Cycles spent per iteration of the inner loop (nop + decrement + branch).
const CYCLES_PER_ITERATION: u32 = 4;
const ITERATIONS_PER_US: u32 = CPU_FREQ_HZ / 1_000_000 / CYCLES_PER_ITERATION;

#[derive(Clone, Copy, Debug, Default)]
pub struct Delay;

impl Delay {
    pub const fn new() -> Self {
        Delay
    }

    #[inline(never)]
    fn spin(iterations: u32) {
        for _ in 0..iterations {
            avr_device::asm::nop();
        }
    }
}

impl DelayUs<u16> for Delay {
    fn delay_us(&mut self, us: u16) {
        Self::spin(u32::from(us) * ITERATIONS_PER_US);
    }
}

impl DelayMs<u16> for Delay {
    fn delay_ms(&mut self, ms: u16) {
        for _ in 0..ms {
            self.delay_us(1000);
        }
    }
}

impl DelayMs<u8> for Delay {
    fn delay_ms(&mut self, ms: u8) {
        DelayMs::<u16>::delay_ms(self, u16::from(ms));
    }
}
