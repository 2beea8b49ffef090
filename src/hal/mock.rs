//! In-memory register image for running the HAL without hardware.
//!
//! [`RegisterImage`] implements [`RegisterFile`] with the behaviour of the
//! ATmega328P registers the HAL relies on:
//!
//! | Register | Behaviour |
//! |----------|-----------|
//! | `PINx` | reads `PORTx` for outputs, the driven level for inputs; writes toggle `PORTx` |
//! | `ADCSRA` | setting `ADSC` starts a conversion that ends after a fixed number of polls |
//! | `ADC` | latches the sample of the converted channel when the conversion completes |
//! | `UCSR0A` | always reports the data register empty |
//! | `UDR0` | captures every transmitted byte |
//!
//! Everything else is plain storage starting from the power-on value of
//! zero. Every 8-bit write is also appended to a log, so tests can check the
//! order in which the HAL touched registers.
//!
//! # Example
//!
//! ```rust
//! use uno_motor_firmware::hal::{AdcChannel, Hal, RegisterImage};
//!
//! let mut regs = RegisterImage::new().with_conversion_polls(3);
//! regs.set_sample(AdcChannel::Adc2, 512);
//!
//! let mut hal = Hal::new(regs);
//! hal.init_adc();
//! assert_eq!(hal.read_analog(AdcChannel::Adc2), 512);
//! assert_eq!(hal.registers().conversions_started(), 1);
//! ```

use core::cell::Cell;

use super::pins::{AdcChannel, Pin};
use super::regs::{bits, Port, Reg, RegisterFile, WideReg};

/// Bytes of USART output kept by the image.
pub const TX_CAPACITY: usize = 512;

/// 8-bit writes kept by the image.
pub const WRITE_LOG_CAPACITY: usize = 256;

const DEFAULT_CONVERSION_POLLS: u16 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Conversion {
    mux: u8,
    polls_left: u16,
}

/// Register file double with power-on defaults.
#[derive(Debug)]
pub struct RegisterImage {
    bytes: [u8; Reg::COUNT],
    ocr1a: u16,
    ocr1b: u16,
    ubrr0: u16,
    /// Levels applied to the input pins by the outside world.
    external: [u8; 3],
    adcsra: Cell<u8>,
    adc_result: Cell<u16>,
    conversion: Cell<Option<Conversion>>,
    conversion_polls: u16,
    samples: [u16; 16],
    conversions_started: u16,
    mux_writes_during_conversion: u16,
    tx: [u8; TX_CAPACITY],
    tx_len: usize,
    writes: [(Reg, u8); WRITE_LOG_CAPACITY],
    writes_len: usize,
}

impl Default for RegisterImage {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterImage {
    /// All registers at their power-on value (inputs, outputs low, timers
    /// stopped, ADC disabled).
    pub const fn new() -> Self {
        Self {
            bytes: [0; Reg::COUNT],
            ocr1a: 0,
            ocr1b: 0,
            ubrr0: 0,
            external: [0; 3],
            adcsra: Cell::new(0),
            adc_result: Cell::new(0),
            conversion: Cell::new(None),
            conversion_polls: DEFAULT_CONVERSION_POLLS,
            samples: [0; 16],
            conversions_started: 0,
            mux_writes_during_conversion: 0,
            tx: [0; TX_CAPACITY],
            tx_len: 0,
            writes: [(Reg::Udr0, 0); WRITE_LOG_CAPACITY],
            writes_len: 0,
        }
    }

    /// Number of `ADCSRA` reads a conversion stays busy for (at least one).
    pub fn with_conversion_polls(mut self, polls: u16) -> Self {
        self.conversion_polls = polls.max(1);
        self
    }

    /// Value the ADC returns for `channel` once a conversion completes.
    pub fn set_sample(&mut self, channel: AdcChannel, value: u16) {
        self.samples[channel.mux() as usize] = value & 0x03FF;
    }

    /// Drives the external level seen on `pin` while it is an input.
    pub fn drive_input(&mut self, pin: Pin, high: bool) {
        let (port, bit) = pin.location();
        if high {
            self.external[port.index()] |= 1 << bit;
        } else {
            self.external[port.index()] &= !(1 << bit);
        }
    }

    /// Conversions started since power-on.
    pub fn conversions_started(&self) -> u16 {
        self.conversions_started
    }

    /// `ADMUX` writes that happened while a conversion was in flight.
    pub fn mux_writes_during_conversion(&self) -> u16 {
        self.mux_writes_during_conversion
    }

    pub fn conversion_pending(&self) -> bool {
        self.conversion.get().is_some()
    }

    /// Bytes written to `UDR0`, oldest first.
    pub fn transmitted(&self) -> &[u8] {
        &self.tx[..self.tx_len]
    }

    pub fn clear_transmitted(&mut self) {
        self.tx_len = 0;
    }

    /// 8-bit register writes in the order they happened, with the value
    /// written. Writes past [`WRITE_LOG_CAPACITY`] are not logged.
    pub fn write_log(&self) -> &[(Reg, u8)] {
        &self.writes[..self.writes_len]
    }

    pub fn clear_write_log(&mut self) {
        self.writes_len = 0;
    }

    fn input_level(&self, port: Port) -> u8 {
        let i = port.index();
        let ddr = self.bytes[Reg::Ddr(port).index()];
        let out = self.bytes[Reg::Out(port).index()];
        (out & ddr) | (self.external[i] & !ddr)
    }

    fn poll_conversion(&self) {
        if let Some(mut conversion) = self.conversion.get() {
            conversion.polls_left -= 1;
            if conversion.polls_left == 0 {
                self.adc_result.set(self.samples[conversion.mux as usize]);
                let status = self.adcsra.get() & !(1 << bits::ADSC);
                self.adcsra.set(status | (1 << bits::ADIF));
                self.conversion.set(None);
            } else {
                self.conversion.set(Some(conversion));
            }
        }
    }
}

impl RegisterFile for RegisterImage {
    fn read(&self, reg: Reg) -> u8 {
        match reg {
            Reg::In(port) => self.input_level(port),
            Reg::Adcsra => {
                self.poll_conversion();
                self.adcsra.get()
            }
            Reg::Ucsr0a => self.bytes[reg.index()] | (1 << bits::UDRE0),
            _ => self.bytes[reg.index()],
        }
    }

    fn write(&mut self, reg: Reg, value: u8) {
        if self.writes_len < WRITE_LOG_CAPACITY {
            self.writes[self.writes_len] = (reg, value);
            self.writes_len += 1;
        }
        match reg {
            // Writing a one to PINx toggles the matching PORTx bit
            Reg::In(port) => self.bytes[Reg::Out(port).index()] ^= value,
            Reg::Adcsra => {
                let start = value & (1 << bits::ADSC) != 0;
                if start && self.conversion.get().is_none() {
                    let mux = self.bytes[Reg::Admux.index()] & bits::MUX_MASK;
                    self.conversion.set(Some(Conversion {
                        mux,
                        polls_left: self.conversion_polls,
                    }));
                    self.conversions_started = self.conversions_started.wrapping_add(1);
                }
                self.adcsra.set(value);
            }
            Reg::Admux => {
                if self.conversion.get().is_some() {
                    self.mux_writes_during_conversion += 1;
                }
                self.bytes[reg.index()] = value;
            }
            Reg::Udr0 => {
                if self.tx_len < TX_CAPACITY {
                    self.tx[self.tx_len] = value;
                    self.tx_len += 1;
                }
                self.bytes[reg.index()] = value;
            }
            _ => self.bytes[reg.index()] = value,
        }
    }

    fn read_wide(&self, reg: WideReg) -> u16 {
        match reg {
            WideReg::Ocr1a => self.ocr1a,
            WideReg::Ocr1b => self.ocr1b,
            WideReg::Adc => self.adc_result.get(),
            WideReg::Ubrr0 => self.ubrr0,
        }
    }

    fn write_wide(&mut self, reg: WideReg, value: u16) {
        match reg {
            WideReg::Ocr1a => self.ocr1a = value,
            WideReg::Ocr1b => self.ocr1b = value,
            WideReg::Adc => {}
            WideReg::Ubrr0 => self.ubrr0 = value & 0x0FFF,
        }
    }
}
