//! Hardware abstraction layer for the ATmega328P.
//!
//! [`Hal`] is the single owner of the port, timer, ADC and USART registers.
//! Its operations are split by peripheral:
//!
//! - [`gpio`]: pin direction, digital read/write, `embedded-hal` pin handles
//! - [`pwm`]: timer setup and duty-cycle writes
//! - [`adc`]: reference/prescaler setup and blocking conversions
//! - [`uart`]: polled USART0 transmitter for the serial console
//!
//! The register backend is a type parameter so the same code runs on the
//! MCU ([`avr::AvrRegisters`]) and on the host ([`RegisterImage`]).

pub mod adc;
pub mod gpio;
pub mod mock;
pub mod pins;
pub mod pwm;
pub mod regs;
pub mod uart;

#[cfg(target_arch = "avr")]
pub mod avr;
#[cfg(target_arch = "avr")]
pub mod delay;

// Re-export commonly used types
pub use adc::AdcPrescaler;
pub use gpio::{DigitalOutput, PinMode};
pub use mock::RegisterImage;
pub use pins::{AdcChannel, InvalidChannel, InvalidPin, Pin, PwmChannel, Timer};
pub use regs::{Port, Reg, RegisterFile, WideReg};

#[cfg(target_arch = "avr")]
pub use avr::AvrRegisters;
#[cfg(target_arch = "avr")]
pub use delay::Delay;

/// Pin, timer, ADC and USART access over a register file.
#[derive(Debug)]
pub struct Hal<R> {
    regs: R,
}

impl<R: RegisterFile> Hal<R> {
    /// Wraps a register file; no register is touched.
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    #[inline]
    pub fn registers(&self) -> &R {
        &self.regs
    }

    #[inline]
    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    pub fn into_registers(self) -> R {
        self.regs
    }
}
