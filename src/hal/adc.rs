//! Single-ended, blocking conversions on ADC0-ADC5.

use super::pins::AdcChannel;
use super::regs::{bits, Reg, RegisterFile, WideReg};
use super::Hal;
use crate::config::{ADC_PRESCALER, ADC_REFERENCE, ADC_VREF_MV};

/// REFS1:0 selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AdcReference {
    Aref = 0,            // External AREF
    Avcc = 1,            // AVCC with external cap at AREF
    Internal1V1 = 3,     // Internal 1.1V with external cap at AREF
}

/// ADPS2:0 clock divider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AdcPrescaler {
    Div2 = 1,
    Div4 = 2,
    Div8 = 3,
    Div16 = 4,
    Div32 = 5,
    Div64 = 6,
    Div128 = 7,
}

/// Highest ADC clock giving full 10-bit accuracy.
pub const MAX_ADC_CLOCK_HZ: u32 = 200_000;

impl AdcPrescaler {
    pub const fn divisor(self) -> u32 {
        1 << (self as u32)
    }

    /// Smallest divider that brings `cpu_hz` down to 200 kHz or less.
    /// Clocks too fast for /128 still get /128.
    pub const fn for_cpu_clock(cpu_hz: u32) -> Self {
        if cpu_hz <= MAX_ADC_CLOCK_HZ * 2 {
            AdcPrescaler::Div2
        } else if cpu_hz <= MAX_ADC_CLOCK_HZ * 4 {
            AdcPrescaler::Div4
        } else if cpu_hz <= MAX_ADC_CLOCK_HZ * 8 {
            AdcPrescaler::Div8
        } else if cpu_hz <= MAX_ADC_CLOCK_HZ * 16 {
            AdcPrescaler::Div16
        } else if cpu_hz <= MAX_ADC_CLOCK_HZ * 32 {
            AdcPrescaler::Div32
        } else if cpu_hz <= MAX_ADC_CLOCK_HZ * 64 {
            AdcPrescaler::Div64
        } else {
            AdcPrescaler::Div128
        }
    }
}

impl<R: RegisterFile> Hal<R> {
    /// Selects the configured reference and enables the ADC with the
    /// prescaler derived from the CPU clock (AVCC, /128 at 16 MHz).
    pub fn init_adc(&mut self) {
        self.regs.write(Reg::Admux, (ADC_REFERENCE as u8) << bits::REFS0);
        self.regs.write(Reg::Adcsra, (1 << bits::ADEN) | ADC_PRESCALER as u8);
    }

    /// Converts `channel` and returns the 10-bit result.
    ///
    /// Only MUX3:0 of ADMUX is rewritten; the reference bits are kept.
    /// The call then busy-polls ADSC until the hardware clears it. There
    /// is no timeout: if the ADC never finishes (not enabled, or faulty)
    /// this never returns. The channel is only selected while no
    /// conversion is running, since the previous call waited for its own.
    pub fn read_analog(&mut self, channel: AdcChannel) -> u16 {
        debug_assert!(!self.regs.test_bit(Reg::Adcsra, bits::ADSC));

        self.regs
            .modify(Reg::Admux, |r| (r & !bits::MUX_MASK) | (channel.mux() & bits::MUX_MASK));

        // Start conversion
        self.regs.set_bit(Reg::Adcsra, bits::ADSC);

        // Wait for completion
        while self.regs.test_bit(Reg::Adcsra, bits::ADSC) {}

        self.regs.read_wide(WideReg::Adc)
    }

    /// Conversion scaled to millivolts against the AVCC reference.
    pub fn read_voltage_mv(&mut self, channel: AdcChannel) -> u16 {
        let raw = u32::from(self.read_analog(channel));
        (raw * u32::from(ADC_VREF_MV) / 1024) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::RegisterImage;

    #[test]
    fn prescaler_follows_cpu_clock() {
        assert_eq!(AdcPrescaler::for_cpu_clock(16_000_000), AdcPrescaler::Div128);
        assert_eq!(AdcPrescaler::for_cpu_clock(8_000_000), AdcPrescaler::Div64);
        assert_eq!(AdcPrescaler::for_cpu_clock(1_000_000), AdcPrescaler::Div8);
        assert_eq!(AdcPrescaler::for_cpu_clock(20_000_000), AdcPrescaler::Div128);
        assert_eq!(AdcPrescaler::Div128.divisor(), 128);
        assert!(16_000_000 / AdcPrescaler::Div128.divisor() <= MAX_ADC_CLOCK_HZ);
    }

    #[test]
    fn init_writes_reference_and_enable() {
        let mut hal = Hal::new(RegisterImage::new());
        hal.init_adc();
        assert_eq!(hal.registers().read(Reg::Admux), 0x40);
        assert_eq!(hal.registers().read(Reg::Adcsra), 0x87);
    }

    #[test]
    fn reads_selected_channel() {
        let mut regs = RegisterImage::new().with_conversion_polls(5);
        regs.set_sample(AdcChannel::Adc3, 321);
        regs.set_sample(AdcChannel::Adc4, 1023);
        let mut hal = Hal::new(regs);
        hal.init_adc();

        assert_eq!(hal.read_analog(AdcChannel::Adc3), 321);
        assert_eq!(hal.read_analog(AdcChannel::Adc4), 1023);
        assert_eq!(hal.registers().conversions_started(), 2);
        assert_eq!(hal.registers().mux_writes_during_conversion(), 0);
        assert!(!hal.registers().conversion_pending());
    }

    #[test]
    fn channel_switch_keeps_reference_bits() {
        let mut hal = Hal::new(RegisterImage::new());
        hal.init_adc();
        hal.registers_mut().set_bit(Reg::Admux, bits::REFS1);
        let upper = hal.registers().read(Reg::Admux) & 0xF0;

        for channel in AdcChannel::ALL {
            hal.read_analog(channel);
            let admux = hal.registers().read(Reg::Admux);
            assert_eq!(admux & 0xF0, upper);
            assert_eq!(admux & 0x0F, channel.mux());
        }
    }

    #[test]
    fn millivolts() {
        let mut regs = RegisterImage::new();
        regs.set_sample(AdcChannel::Adc0, 512);
        let mut hal = Hal::new(regs);
        hal.init_adc();
        assert_eq!(hal.read_voltage_mv(AdcChannel::Adc0), 2500);
    }
}
