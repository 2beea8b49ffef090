use core::convert::Infallible;

use crate::hal::{Hal, RegisterFile};

/// Line-oriented log output on USART0.
///
/// Implements [`ufmt::uWrite`], so `uwrite!`/`uwriteln!` format straight
/// into it. Output is silently dropped until `Hal::init_uart` has run.
pub struct SerialConsole<'a, R: RegisterFile> {
    hal: &'a mut Hal<R>,
}

impl<'a, R: RegisterFile> SerialConsole<'a, R> {
    pub fn new(hal: &'a mut Hal<R>) -> Self {
        Self { hal }
    }

    pub fn write_str(&mut self, s: &str) {
        self.hal.write_bytes(s.as_bytes());
    }

    pub fn write_line(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.hal.write_byte(byte);
    }

    // Debug helper - print hex value
    pub fn write_hex(&mut self, val: u8) {
        const HEX_CHARS: [u8; 16] = *b"0123456789ABCDEF";
        self.write_byte(HEX_CHARS[(val >> 4) as usize]);
        self.write_byte(HEX_CHARS[(val & 0xF) as usize]);
    }

    // Print formatted debug info
    pub fn debug(&mut self, msg: &str, val: u8) {
        self.write_str("[DBG] ");
        self.write_str(msg);
        self.write_str(": 0x");
        self.write_hex(val);
        self.write_str("\r\n");
    }
}

impl<'a, R: RegisterFile> ufmt::uWrite for SerialConsole<'a, R> {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.hal.write_bytes(s.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::RegisterImage;
    use ufmt::uwriteln;

    fn hal() -> Hal<RegisterImage> {
        let mut hal = Hal::new(RegisterImage::new());
        hal.init_uart(9600);
        hal
    }

    #[test]
    fn formats_with_ufmt() {
        let mut hal = hal();
        let mut console = SerialConsole::new(&mut hal);
        uwriteln!(&mut console, "speed {} duty {}", -192i16, 192u8).unwrap();
        assert_eq!(hal.registers().transmitted(), b"speed -192 duty 192\n");
    }

    #[test]
    fn debug_line() {
        let mut hal = hal();
        SerialConsole::new(&mut hal).debug("TCCR1A", 0x81);
        assert_eq!(hal.registers().transmitted(), b"[DBG] TCCR1A: 0x81\r\n");
    }

    #[test]
    fn silent_before_uart_init() {
        let mut hal = Hal::new(RegisterImage::new());
        SerialConsole::new(&mut hal).write_line("lost");
        assert!(hal.registers().transmitted().is_empty());
    }
}
