//! Digital I/O on the logical pins.

use core::convert::Infallible;

use embedded_hal::digital::v2::{OutputPin, StatefulOutputPin, ToggleableOutputPin};

use super::pins::Pin;
use super::regs::{Reg, RegisterFile};
use super::Hal;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

impl<R: RegisterFile> Hal<R> {
    /// Sets or clears the pin's DDRx bit.
    pub fn set_pin_mode(&mut self, pin: Pin, mode: PinMode) {
        let (port, bit) = pin.location();
        match mode {
            PinMode::Output => self.regs.set_bit(Reg::Ddr(port), bit),
            PinMode::Input => self.regs.clear_bit(Reg::Ddr(port), bit),
        }
    }

    pub fn pin_mode(&self, pin: Pin) -> PinMode {
        let (port, bit) = pin.location();
        if self.regs.test_bit(Reg::Ddr(port), bit) {
            PinMode::Output
        } else {
            PinMode::Input
        }
    }

    /// Sets or clears the pin's PORTx bit. On an input this switches the
    /// pull-up instead.
    pub fn write_digital(&mut self, pin: Pin, high: bool) {
        let (port, bit) = pin.location();
        if high {
            self.regs.set_bit(Reg::Out(port), bit);
        } else {
            self.regs.clear_bit(Reg::Out(port), bit);
        }
    }

    /// Level on the pin as sampled by PINx. For an output this is the
    /// driven level.
    pub fn read_digital(&self, pin: Pin) -> bool {
        let (port, bit) = pin.location();
        self.regs.test_bit(Reg::In(port), bit)
    }

    /// Level last written to the pin's PORTx bit.
    pub fn output_latch(&self, pin: Pin) -> bool {
        let (port, bit) = pin.location();
        self.regs.test_bit(Reg::Out(port), bit)
    }

    /// Configures `pin` as an output and borrows it as an `embedded-hal` pin.
    pub fn output_pin(&mut self, pin: Pin) -> DigitalOutput<'_, R> {
        self.set_pin_mode(pin, PinMode::Output);
        DigitalOutput { hal: self, pin }
    }
}

/// Output pin handle borrowed from a [`Hal`].
pub struct DigitalOutput<'a, R: RegisterFile> {
    hal: &'a mut Hal<R>,
    pin: Pin,
}

impl<'a, R: RegisterFile> DigitalOutput<'a, R> {
    pub fn pin(&self) -> Pin {
        self.pin
    }
}

impl<'a, R: RegisterFile> OutputPin for DigitalOutput<'a, R> {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.hal.write_digital(self.pin, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.hal.write_digital(self.pin, true);
        Ok(())
    }
}

impl<'a, R: RegisterFile> StatefulOutputPin for DigitalOutput<'a, R> {
    fn is_set_high(&self) -> Result<bool, Infallible> {
        Ok(self.hal.output_latch(self.pin))
    }

    fn is_set_low(&self) -> Result<bool, Infallible> {
        Ok(!self.hal.output_latch(self.pin))
    }
}

impl<'a, R: RegisterFile> ToggleableOutputPin for DigitalOutput<'a, R> {
    type Error = Infallible;

    fn toggle(&mut self) -> Result<(), Infallible> {
        let high = self.hal.output_latch(self.pin);
        self.hal.write_digital(self.pin, !high);
        Ok(())
    }
}
