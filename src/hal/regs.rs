//! Register names, bit positions and the read-modify-write primitives.
//!
//! Every peripheral access in the HAL goes through [`RegisterFile`], so the
//! same pin, timer and ADC logic runs against the real ATmega328P registers
//! ([`crate::hal::avr::AvrRegisters`]) or against the in-memory
//! [`crate::hal::mock::RegisterImage`] on the host.

/// One of the three GPIO register groups of the ATmega328P.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Port {
    /// PB0..PB5, digital pins 8-13
    B = 0,
    /// PC0..PC5, analog pins A0-A5
    C = 1,
    /// PD0..PD7, digital pins 0-7
    D = 2,
}

impl Port {
    pub const ALL: [Port; 3] = [Port::B, Port::C, Port::D];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// 8-bit I/O registers touched by the HAL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg {
    /// DDRx, data direction
    Ddr(Port),
    /// PORTx, output latch
    Out(Port),
    /// PINx, input level
    In(Port),
    Tccr0a,
    Tccr0b,
    Tccr1a,
    Tccr1b,
    Tccr2a,
    Tccr2b,
    Ocr0a,
    Ocr0b,
    Ocr2a,
    Ocr2b,
    Admux,
    Adcsra,
    Ucsr0a,
    Ucsr0b,
    Ucsr0c,
    Udr0,
}

impl Reg {
    /// Number of distinct 8-bit registers.
    pub const COUNT: usize = 25;

    /// Dense index, used by register images.
    pub const fn index(self) -> usize {
        match self {
            Reg::Ddr(p) => p.index(),
            Reg::Out(p) => 3 + p.index(),
            Reg::In(p) => 6 + p.index(),
            Reg::Tccr0a => 9,
            Reg::Tccr0b => 10,
            Reg::Tccr1a => 11,
            Reg::Tccr1b => 12,
            Reg::Tccr2a => 13,
            Reg::Tccr2b => 14,
            Reg::Ocr0a => 15,
            Reg::Ocr0b => 16,
            Reg::Ocr2a => 17,
            Reg::Ocr2b => 18,
            Reg::Admux => 19,
            Reg::Adcsra => 20,
            Reg::Ucsr0a => 21,
            Reg::Ucsr0b => 22,
            Reg::Ucsr0c => 23,
            Reg::Udr0 => 24,
        }
    }
}

/// 16-bit registers touched by the HAL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WideReg {
    Ocr1a,
    Ocr1b,
    /// ADCH:ADCL conversion result, read-only
    Adc,
    Ubrr0,
}

/// Bit positions within the control registers (ATmega328P datasheet names).
pub mod bits {
    // TCCR0A / TCCR1A / TCCR2A
    pub const COMXA1: u8 = 7;
    pub const COMXA0: u8 = 6;
    pub const COMXB1: u8 = 5;
    pub const COMXB0: u8 = 4;
    pub const WGM01: u8 = 1;
    pub const WGM00: u8 = 0;
    pub const WGM10: u8 = 0;
    pub const WGM21: u8 = 1;
    pub const WGM20: u8 = 0;

    // TCCR0B / TCCR1B / TCCR2B
    pub const WGM12: u8 = 3;
    pub const CS01: u8 = 1;
    pub const CS11: u8 = 1;
    pub const CS21: u8 = 1;

    // ADMUX
    pub const REFS1: u8 = 7;
    pub const REFS0: u8 = 6;
    pub const MUX_MASK: u8 = 0x0F;

    // ADCSRA
    pub const ADEN: u8 = 7;
    pub const ADSC: u8 = 6;
    pub const ADIF: u8 = 4;
    pub const ADPS_MASK: u8 = 0x07;

    // UCSR0A / UCSR0B / UCSR0C
    pub const UDRE0: u8 = 5;
    pub const TXEN0: u8 = 3;
    pub const UCSZ01: u8 = 2;
    pub const UCSZ00: u8 = 1;
}

/// Raw access to the MCU register file.
///
/// Implementors only provide plain reads and writes. The provided
/// bit-level helpers are the only mutators the HAL uses on shared
/// registers, and they always preserve every bit they were not asked to
/// touch.
pub trait RegisterFile {
    fn read(&self, reg: Reg) -> u8;
    fn write(&mut self, reg: Reg, value: u8);
    fn read_wide(&self, reg: WideReg) -> u16;
    fn write_wide(&mut self, reg: WideReg, value: u16);

    #[inline]
    fn modify<F: FnOnce(u8) -> u8>(&mut self, reg: Reg, f: F) {
        let value = self.read(reg);
        self.write(reg, f(value));
    }

    #[inline]
    fn set_bit(&mut self, reg: Reg, bit: u8) {
        self.modify(reg, |r| r | (1 << bit));
    }

    #[inline]
    fn clear_bit(&mut self, reg: Reg, bit: u8) {
        self.modify(reg, |r| r & !(1 << bit));
    }

    #[inline]
    fn test_bit(&self, reg: Reg, bit: u8) -> bool {
        self.read(reg) & (1 << bit) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::mock::RegisterImage;

    #[test]
    fn register_indices_are_dense_and_unique() {
        let all = [
            Reg::Ddr(Port::B),
            Reg::Ddr(Port::C),
            Reg::Ddr(Port::D),
            Reg::Out(Port::B),
            Reg::Out(Port::C),
            Reg::Out(Port::D),
            Reg::In(Port::B),
            Reg::In(Port::C),
            Reg::In(Port::D),
            Reg::Tccr0a,
            Reg::Tccr0b,
            Reg::Tccr1a,
            Reg::Tccr1b,
            Reg::Tccr2a,
            Reg::Tccr2b,
            Reg::Ocr0a,
            Reg::Ocr0b,
            Reg::Ocr2a,
            Reg::Ocr2b,
            Reg::Admux,
            Reg::Adcsra,
            Reg::Ucsr0a,
            Reg::Ucsr0b,
            Reg::Ucsr0c,
            Reg::Udr0,
        ];
        let mut seen = [false; Reg::COUNT];
        for reg in all {
            assert!(!seen[reg.index()], "{:?} shares an index", reg);
            seen[reg.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn bit_helpers_preserve_siblings() {
        let mut regs = RegisterImage::new();
        regs.write(Reg::Tccr1a, 0b1010_0001);

        regs.clear_bit(Reg::Tccr1a, bits::COMXB1);
        assert_eq!(regs.read(Reg::Tccr1a), 0b1000_0001);

        regs.set_bit(Reg::Tccr1a, 3);
        assert_eq!(regs.read(Reg::Tccr1a), 0b1000_1001);
        assert!(regs.test_bit(Reg::Tccr1a, 7));
        assert!(!regs.test_bit(Reg::Tccr1a, 5));
    }
}
