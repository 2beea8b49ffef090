//! Logical pin identifiers and their static hardware bindings.
//!
//! The mapping from an Arduino Uno pin number to a (port, bit) pair, to a
//! timer compare channel and to an ADC mux input is a pure function of the
//! pin. Nothing here is mutated at runtime.

use super::regs::{bits, Port, Reg, WideReg};

/// Arduino Uno pin numbering for the ATmega328P.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Pin {
    /// PD0 (RX)
    D0 = 0,
    /// PD1 (TX)
    D1,
    D2,
    /// PD3, OC2B
    D3,
    D4,
    /// PD5, OC0B
    D5,
    /// PD6, OC0A
    D6,
    D7,
    /// PB0
    D8,
    /// PB1, OC1A
    D9,
    /// PB2, OC1B
    D10,
    /// PB3, OC2A
    D11,
    D12,
    /// PB5, on-board LED
    D13,
    /// PC0, ADC0
    A0,
    A1,
    A2,
    A3,
    /// PC4, SDA
    A4,
    /// PC5, SCL
    A5,
}

/// Raw pin number outside 0..=19.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidPin(pub u8);

impl Pin {
    pub const COUNT: usize = 20;

    pub const ALL: [Pin; Pin::COUNT] = [
        Pin::D0,
        Pin::D1,
        Pin::D2,
        Pin::D3,
        Pin::D4,
        Pin::D5,
        Pin::D6,
        Pin::D7,
        Pin::D8,
        Pin::D9,
        Pin::D10,
        Pin::D11,
        Pin::D12,
        Pin::D13,
        Pin::A0,
        Pin::A1,
        Pin::A2,
        Pin::A3,
        Pin::A4,
        Pin::A5,
    ];

    /// Stable logical identifier, 0..=19.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Register group and bit within it.
    pub const fn location(self) -> (Port, u8) {
        let n = self as u8;
        match n {
            0..=7 => (Port::D, n),
            8..=13 => (Port::B, n - 8),
            _ => (Port::C, n - 14),
        }
    }

    #[inline]
    pub const fn port(self) -> Port {
        self.location().0
    }

    #[inline]
    pub const fn bit(self) -> u8 {
        self.location().1
    }

    /// Timer compare channel hard-wired to this pin, if any.
    pub const fn pwm_channel(self) -> Option<PwmChannel> {
        match self {
            Pin::D6 => Some(PwmChannel::Oc0a),
            Pin::D5 => Some(PwmChannel::Oc0b),
            Pin::D9 => Some(PwmChannel::Oc1a),
            Pin::D10 => Some(PwmChannel::Oc1b),
            Pin::D11 => Some(PwmChannel::Oc2a),
            Pin::D3 => Some(PwmChannel::Oc2b),
            _ => None,
        }
    }

    /// ADC mux input for the analog pins.
    pub const fn adc_channel(self) -> Option<AdcChannel> {
        match self {
            Pin::A0 => Some(AdcChannel::Adc0),
            Pin::A1 => Some(AdcChannel::Adc1),
            Pin::A2 => Some(AdcChannel::Adc2),
            Pin::A3 => Some(AdcChannel::Adc3),
            Pin::A4 => Some(AdcChannel::Adc4),
            Pin::A5 => Some(AdcChannel::Adc5),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Pin {
    type Error = InvalidPin;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Pin::ALL.get(n as usize).copied().ok_or(InvalidPin(n))
    }
}

impl From<Pin> for u8 {
    fn from(pin: Pin) -> u8 {
        pin.index()
    }
}

/// The three 8-bit-capable timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timer {
    Timer0,
    Timer1,
    Timer2,
}

impl Timer {
    pub const ALL: [Timer; 3] = [Timer::Timer0, Timer::Timer1, Timer::Timer2];

    /// TCCRnA: compare output mode and low waveform bits.
    pub const fn control_a(self) -> Reg {
        match self {
            Timer::Timer0 => Reg::Tccr0a,
            Timer::Timer1 => Reg::Tccr1a,
            Timer::Timer2 => Reg::Tccr2a,
        }
    }

    /// TCCRnB: high waveform bits and clock select.
    pub const fn control_b(self) -> Reg {
        match self {
            Timer::Timer0 => Reg::Tccr0b,
            Timer::Timer1 => Reg::Tccr1b,
            Timer::Timer2 => Reg::Tccr2b,
        }
    }
}

/// Where a channel's duty value lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DutyRegister {
    Narrow(Reg),
    /// Timer1 compare registers are 16 bits wide; in 8-bit fast PWM only
    /// the low byte is significant.
    Wide(WideReg),
}

/// Hardware compare-output channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PwmChannel {
    Oc0a,
    Oc0b,
    Oc1a,
    Oc1b,
    Oc2a,
    Oc2b,
}

impl PwmChannel {
    pub const ALL: [PwmChannel; 6] = [
        PwmChannel::Oc0a,
        PwmChannel::Oc0b,
        PwmChannel::Oc1a,
        PwmChannel::Oc1b,
        PwmChannel::Oc2a,
        PwmChannel::Oc2b,
    ];

    pub const fn timer(self) -> Timer {
        match self {
            PwmChannel::Oc0a | PwmChannel::Oc0b => Timer::Timer0,
            PwmChannel::Oc1a | PwmChannel::Oc1b => Timer::Timer1,
            PwmChannel::Oc2a | PwmChannel::Oc2b => Timer::Timer2,
        }
    }

    pub const fn pin(self) -> Pin {
        match self {
            PwmChannel::Oc0a => Pin::D6,
            PwmChannel::Oc0b => Pin::D5,
            PwmChannel::Oc1a => Pin::D9,
            PwmChannel::Oc1b => Pin::D10,
            PwmChannel::Oc2a => Pin::D11,
            PwmChannel::Oc2b => Pin::D3,
        }
    }

    const fn is_a(self) -> bool {
        matches!(self, PwmChannel::Oc0a | PwmChannel::Oc1a | PwmChannel::Oc2a)
    }

    /// Both COMnx bits of this channel in TCCRnA.
    pub const fn com_mask(self) -> u8 {
        if self.is_a() {
            (1 << bits::COMXA1) | (1 << bits::COMXA0)
        } else {
            (1 << bits::COMXB1) | (1 << bits::COMXB0)
        }
    }

    pub const fn duty_register(self) -> DutyRegister {
        match self {
            PwmChannel::Oc0a => DutyRegister::Narrow(Reg::Ocr0a),
            PwmChannel::Oc0b => DutyRegister::Narrow(Reg::Ocr0b),
            PwmChannel::Oc1a => DutyRegister::Wide(WideReg::Ocr1a),
            PwmChannel::Oc1b => DutyRegister::Wide(WideReg::Ocr1b),
            PwmChannel::Oc2a => DutyRegister::Narrow(Reg::Ocr2a),
            PwmChannel::Oc2b => DutyRegister::Narrow(Reg::Ocr2b),
        }
    }
}

/// ADC mux inputs wired to A0-A5.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AdcChannel {
    Adc0 = 0,
    Adc1 = 1,
    Adc2 = 2,
    Adc3 = 3,
    Adc4 = 4,
    Adc5 = 5,
}

/// Raw channel number outside 0..=5.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidChannel(pub u8);

impl AdcChannel {
    pub const ALL: [AdcChannel; 6] = [
        AdcChannel::Adc0,
        AdcChannel::Adc1,
        AdcChannel::Adc2,
        AdcChannel::Adc3,
        AdcChannel::Adc4,
        AdcChannel::Adc5,
    ];

    /// Value for the MUX3..0 bits of ADMUX.
    #[inline]
    pub const fn mux(self) -> u8 {
        self as u8
    }

    pub const fn pin(self) -> Pin {
        match self {
            AdcChannel::Adc0 => Pin::A0,
            AdcChannel::Adc1 => Pin::A1,
            AdcChannel::Adc2 => Pin::A2,
            AdcChannel::Adc3 => Pin::A3,
            AdcChannel::Adc4 => Pin::A4,
            AdcChannel::Adc5 => Pin::A5,
        }
    }
}

impl TryFrom<u8> for AdcChannel {
    type Error = InvalidChannel;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        AdcChannel::ALL.get(n as usize).copied().ok_or(InvalidChannel(n))
    }
}
