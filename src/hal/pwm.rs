//! Hardware PWM on the six timer compare outputs.
//!
//! All three timers run in 8-bit fast PWM, non-inverting, with a /8 clock
//! prescaler: 16 MHz / 8 / 256 gives about 7.8 kHz on every channel.

use super::pins::{DutyRegister, Pin, PwmChannel, Timer};
use super::regs::{bits, RegisterFile};
use super::Hal;

/// TCCRnA/TCCRnB values written by [`Hal::init_pwm`].
pub const fn timer_config(timer: Timer) -> (u8, u8) {
    let com = (1 << bits::COMXA1) | (1 << bits::COMXB1);
    match timer {
        // Fast PWM, TOP = 0xFF
        Timer::Timer0 => (
            com | (1 << bits::WGM01) | (1 << bits::WGM00),
            1 << bits::CS01,
        ),
        // Fast PWM 8-bit (WGM13:0 = 0101)
        Timer::Timer1 => (
            com | (1 << bits::WGM10),
            (1 << bits::WGM12) | (1 << bits::CS11),
        ),
        // Fast PWM, TOP = 0xFF
        Timer::Timer2 => (
            com | (1 << bits::WGM21) | (1 << bits::WGM20),
            1 << bits::CS21,
        ),
    }
}

impl<R: RegisterFile> Hal<R> {
    /// Puts Timer0, Timer1 and Timer2 into fast PWM with both compare
    /// outputs connected. Only the timers' own control registers are
    /// written, so calling it again reproduces the same state.
    pub fn init_pwm(&mut self) {
        for timer in Timer::ALL {
            let (control_a, control_b) = timer_config(timer);
            self.regs.write(timer.control_a(), control_a);
            self.regs.write(timer.control_b(), control_b);
        }
    }

    /// Writes `duty` to the compare register bound to `pin`.
    ///
    /// Pins without a compare channel are ignored. The value only reaches
    /// the pin once [`init_pwm`](Self::init_pwm) has run and the channel
    /// has not been disconnected.
    pub fn write_duty(&mut self, pin: Pin, duty: u8) {
        if let Some(channel) = pin.pwm_channel() {
            self.write_channel_duty(channel, duty);
        }
    }

    pub fn write_channel_duty(&mut self, channel: PwmChannel, duty: u8) {
        match channel.duty_register() {
            DutyRegister::Narrow(reg) => self.regs.write(reg, duty),
            DutyRegister::Wide(reg) => self.regs.write_wide(reg, u16::from(duty)),
        }
    }

    /// Current compare value of `channel`.
    pub fn channel_duty(&self, channel: PwmChannel) -> u8 {
        match channel.duty_register() {
            DutyRegister::Narrow(reg) => self.regs.read(reg),
            DutyRegister::Wide(reg) => self.regs.read_wide(reg) as u8,
        }
    }

    /// Compare value bound to `pin`, `None` for pins without a channel.
    pub fn duty(&self, pin: Pin) -> Option<u8> {
        pin.pwm_channel().map(|channel| self.channel_duty(channel))
    }

    /// Detaches the timer output from `pin` so PORTx drives it again.
    ///
    /// Clears both COMnx bits of the pin's channel in TCCRnA, leaving the
    /// other channel and the waveform bits alone. No-op for pins without a
    /// compare channel.
    pub fn disconnect_pwm(&mut self, pin: Pin) {
        if let Some(channel) = pin.pwm_channel() {
            let mask = channel.com_mask();
            self.regs.modify(channel.timer().control_a(), |r| r & !mask);
        }
    }

    /// Whether the timer currently overrides the PORTx bit of `pin`.
    pub fn is_pwm_connected(&self, pin: Pin) -> bool {
        match pin.pwm_channel() {
            Some(channel) => {
                let control = self.regs.read(channel.timer().control_a());
                control & channel.com_mask() != 0
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::regs::{Reg, WideReg};
    use crate::hal::RegisterImage;

    fn hal() -> Hal<RegisterImage> {
        let mut hal = Hal::new(RegisterImage::new());
        hal.init_pwm();
        hal
    }

    #[test]
    fn timer_registers_after_init() {
        let hal = hal();
        let regs = hal.registers();
        assert_eq!(regs.read(Reg::Tccr0a), 0xA3);
        assert_eq!(regs.read(Reg::Tccr0b), 0x02);
        assert_eq!(regs.read(Reg::Tccr1a), 0xA1);
        assert_eq!(regs.read(Reg::Tccr1b), 0x0A);
        assert_eq!(regs.read(Reg::Tccr2a), 0xA3);
        assert_eq!(regs.read(Reg::Tccr2b), 0x02);
    }

    #[test]
    fn duty_lands_in_bound_register() {
        let mut hal = hal();
        hal.write_duty(Pin::D9, 77);
        hal.write_duty(Pin::D3, 200);
        assert_eq!(hal.registers().read_wide(WideReg::Ocr1a), 77);
        assert_eq!(hal.registers().read(Reg::Ocr2b), 200);
        assert_eq!(hal.duty(Pin::D9), Some(77));
        assert_eq!(hal.duty(Pin::D2), None);
    }

    #[test]
    fn duty_on_unbound_pin_is_ignored() {
        let mut hal = hal();
        hal.write_duty(Pin::D4, 99);
        for channel in PwmChannel::ALL {
            assert_eq!(hal.channel_duty(channel), 0);
        }
    }

    #[test]
    fn disconnect_clears_one_channel() {
        let mut hal = hal();
        hal.disconnect_pwm(Pin::D10);
        assert_eq!(hal.registers().read(Reg::Tccr1a), 0x81);
        assert!(!hal.is_pwm_connected(Pin::D10));
        assert!(hal.is_pwm_connected(Pin::D9));

        hal.disconnect_pwm(Pin::D12);
        assert_eq!(hal.registers().read(Reg::Tccr1a), 0x81);
        assert!(!hal.is_pwm_connected(Pin::D12));
    }
}
