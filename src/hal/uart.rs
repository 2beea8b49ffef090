//! Polled USART0 transmitter used by the serial console.

use super::regs::{bits, Reg, RegisterFile, WideReg};
use super::Hal;
use crate::config::CPU_FREQ_HZ;

/// Largest value the 12-bit UBRR0 holds.
pub const UBRR_MAX: u16 = 0x0FFF;

/// UBRR0 for normal-speed asynchronous mode, rounded to nearest.
///
/// `baud` must be non-zero; zero yields the slowest divisor. Rates the
/// clock cannot reach clamp to `0` (fastest) or [`UBRR_MAX`] (slowest).
pub const fn ubrr_for(cpu_hz: u32, baud: u32) -> u16 {
    if baud == 0 {
        return UBRR_MAX;
    }
    let divisor = 16 * baud as u64;
    let ubrr = ((cpu_hz as u64 + divisor / 2) / divisor).saturating_sub(1);
    if ubrr > UBRR_MAX as u64 {
        UBRR_MAX
    } else {
        ubrr as u16
    }
}

impl<R: RegisterFile> Hal<R> {
    /// 8N1 at `baud`, transmitter only. Takes over D1 (TX).
    pub fn init_uart(&mut self, baud: u32) {
        self.regs.write_wide(WideReg::Ubrr0, ubrr_for(CPU_FREQ_HZ, baud));
        self.regs.write(Reg::Ucsr0c, (1 << bits::UCSZ01) | (1 << bits::UCSZ00));
        self.regs.set_bit(Reg::Ucsr0b, bits::TXEN0);
    }

    pub fn uart_enabled(&self) -> bool {
        self.regs.test_bit(Reg::Ucsr0b, bits::TXEN0)
    }

    /// Waits for the data register to empty, then queues `byte`.
    /// Bytes written before [`init_uart`](Self::init_uart) are dropped.
    pub fn write_byte(&mut self, byte: u8) {
        if !self.uart_enabled() {
            return;
        }
        while !self.regs.test_bit(Reg::Ucsr0a, bits::UDRE0) {}
        self.regs.write(Reg::Udr0, byte);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::RegisterImage;

    #[test]
    fn baud_divisors() {
        assert_eq!(ubrr_for(16_000_000, 9600), 103);
        assert_eq!(ubrr_for(16_000_000, 57_600), 16);
        assert_eq!(ubrr_for(16_000_000, 115_200), 8);
    }

    #[test]
    fn unreachable_baud_rates_clamp() {
        assert_eq!(ubrr_for(16_000_000, 0), UBRR_MAX);
        assert_eq!(ubrr_for(16_000_000, 3_000_000), 0);
        assert_eq!(ubrr_for(16_000_000, u32::MAX), 0);
        assert_eq!(ubrr_for(16_000_000, 100), UBRR_MAX);
        assert_eq!(ubrr_for(16_000_000, 300), 3332);
    }

    #[test]
    fn init_uart_with_zero_baud_does_not_panic() {
        let mut hal = Hal::new(RegisterImage::new());
        hal.init_uart(0);
        assert_eq!(hal.registers().read_wide(WideReg::Ubrr0), UBRR_MAX);
        assert!(hal.uart_enabled());
    }

    #[test]
    fn init_and_transmit() {
        let mut hal = Hal::new(RegisterImage::new());
        hal.write_byte(b'x');
        assert!(hal.registers().transmitted().is_empty());

        hal.init_uart(9600);
        assert_eq!(hal.registers().read_wide(WideReg::Ubrr0), 103);
        assert_eq!(hal.registers().read(Reg::Ucsr0c), 0x06);
        hal.write_bytes(b"hi");
        assert_eq!(hal.registers().transmitted(), b"hi");
    }
}
