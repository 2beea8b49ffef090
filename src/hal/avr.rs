//! Register file backed by the real ATmega328P peripherals.

use avr_device::atmega328p::Peripherals;

use super::regs::{Port, Reg, RegisterFile, WideReg};

/// Owns the device peripherals, so at most one exists per boot.
pub struct AvrRegisters {
    dp: Peripherals,
}

impl AvrRegisters {
    /// `None` if the peripherals were already taken.
    pub fn take() -> Option<Self> {
        Peripherals::take().map(|dp| Self { dp })
    }
}

impl RegisterFile for AvrRegisters {
    #[inline]
    fn read(&self, reg: Reg) -> u8 {
        let dp = &self.dp;
        match reg {
            Reg::Ddr(Port::B) => dp.PORTB.ddrb.read().bits(),
            Reg::Ddr(Port::C) => dp.PORTC.ddrc.read().bits(),
            Reg::Ddr(Port::D) => dp.PORTD.ddrd.read().bits(),
            Reg::Out(Port::B) => dp.PORTB.portb.read().bits(),
            Reg::Out(Port::C) => dp.PORTC.portc.read().bits(),
            Reg::Out(Port::D) => dp.PORTD.portd.read().bits(),
            Reg::In(Port::B) => dp.PORTB.pinb.read().bits(),
            Reg::In(Port::C) => dp.PORTC.pinc.read().bits(),
            Reg::In(Port::D) => dp.PORTD.pind.read().bits(),
            Reg::Tccr0a => dp.TC0.tccr0a.read().bits(),
            Reg::Tccr0b => dp.TC0.tccr0b.read().bits(),
            Reg::Tccr1a => dp.TC1.tccr1a.read().bits(),
            Reg::Tccr1b => dp.TC1.tccr1b.read().bits(),
            Reg::Tccr2a => dp.TC2.tccr2a.read().bits(),
            Reg::Tccr2b => dp.TC2.tccr2b.read().bits(),
            Reg::Ocr0a => dp.TC0.ocr0a.read().bits(),
            Reg::Ocr0b => dp.TC0.ocr0b.read().bits(),
            Reg::Ocr2a => dp.TC2.ocr2a.read().bits(),
            Reg::Ocr2b => dp.TC2.ocr2b.read().bits(),
            Reg::Admux => dp.ADC.admux.read().bits(),
            Reg::Adcsra => dp.ADC.adcsra.read().bits(),
            Reg::Ucsr0a => dp.USART0.ucsr0a.read().bits(),
            Reg::Ucsr0b => dp.USART0.ucsr0b.read().bits(),
            Reg::Ucsr0c => dp.USART0.ucsr0c.read().bits(),
            Reg::Udr0 => dp.USART0.udr0.read().bits(),
        }
    }

    #[inline]
    fn write(&mut self, reg: Reg, value: u8) {
        let dp = &self.dp;
        unsafe {
            match reg {
                Reg::Ddr(Port::B) => dp.PORTB.ddrb.write(|w| w.bits(value)),
                Reg::Ddr(Port::C) => dp.PORTC.ddrc.write(|w| w.bits(value)),
                Reg::Ddr(Port::D) => dp.PORTD.ddrd.write(|w| w.bits(value)),
                Reg::Out(Port::B) => dp.PORTB.portb.write(|w| w.bits(value)),
                Reg::Out(Port::C) => dp.PORTC.portc.write(|w| w.bits(value)),
                Reg::Out(Port::D) => dp.PORTD.portd.write(|w| w.bits(value)),
                // Writing ones to PINx toggles PORTx
                Reg::In(Port::B) => dp.PORTB.pinb.write(|w| w.bits(value)),
                Reg::In(Port::C) => dp.PORTC.pinc.write(|w| w.bits(value)),
                Reg::In(Port::D) => dp.PORTD.pind.write(|w| w.bits(value)),
                Reg::Tccr0a => dp.TC0.tccr0a.write(|w| w.bits(value)),
                Reg::Tccr0b => dp.TC0.tccr0b.write(|w| w.bits(value)),
                Reg::Tccr1a => dp.TC1.tccr1a.write(|w| w.bits(value)),
                Reg::Tccr1b => dp.TC1.tccr1b.write(|w| w.bits(value)),
                Reg::Tccr2a => dp.TC2.tccr2a.write(|w| w.bits(value)),
                Reg::Tccr2b => dp.TC2.tccr2b.write(|w| w.bits(value)),
                Reg::Ocr0a => dp.TC0.ocr0a.write(|w| w.bits(value)),
                Reg::Ocr0b => dp.TC0.ocr0b.write(|w| w.bits(value)),
                Reg::Ocr2a => dp.TC2.ocr2a.write(|w| w.bits(value)),
                Reg::Ocr2b => dp.TC2.ocr2b.write(|w| w.bits(value)),
                Reg::Admux => dp.ADC.admux.write(|w| w.bits(value)),
                Reg::Adcsra => dp.ADC.adcsra.write(|w| w.bits(value)),
                Reg::Ucsr0a => dp.USART0.ucsr0a.write(|w| w.bits(value)),
                Reg::Ucsr0b => dp.USART0.ucsr0b.write(|w| w.bits(value)),
                Reg::Ucsr0c => dp.USART0.ucsr0c.write(|w| w.bits(value)),
                Reg::Udr0 => dp.USART0.udr0.write(|w| w.bits(value)),
            }
        }
    }

    #[inline]
    fn read_wide(&self, reg: WideReg) -> u16 {
        let dp = &self.dp;
        match reg {
            WideReg::Ocr1a => dp.TC1.ocr1a.read().bits(),
            WideReg::Ocr1b => dp.TC1.ocr1b.read().bits(),
            // ADCL must be read first; the PAC reads the pair in order
            WideReg::Adc => dp.ADC.adc.read().bits(),
            WideReg::Ubrr0 => dp.USART0.ubrr0.read().bits(),
        }
    }

    #[inline]
    fn write_wide(&mut self, reg: WideReg, value: u16) {
        let dp = &self.dp;
        unsafe {
            match reg {
                WideReg::Ocr1a => dp.TC1.ocr1a.write(|w| w.bits(value)),
                WideReg::Ocr1b => dp.TC1.ocr1b.write(|w| w.bits(value)),
                WideReg::Adc => {}
                WideReg::Ubrr0 => dp.USART0.ubrr0.write(|w| w.bits(value)),
            }
        }
    }
}
