use uno_motor_firmware::hal::regs::bits;
use uno_motor_firmware::hal::{
    AdcChannel, Hal, Pin, PinMode, Port, PwmChannel, Reg, RegisterFile, RegisterImage, Timer,
};

fn hal() -> Hal<RegisterImage> {
    Hal::new(RegisterImage::new())
}

fn levels(hal: &Hal<RegisterImage>) -> Vec<bool> {
    Pin::ALL.iter().map(|p| hal.read_digital(*p)).collect()
}

#[test]
fn every_pin_writes_and_reads_back() {
    for pin in Pin::ALL {
        let mut hal = hal();
        hal.set_pin_mode(pin, PinMode::Output);

        hal.write_digital(pin, true);
        assert!(hal.read_digital(pin), "{:?} high", pin);
        hal.write_digital(pin, false);
        assert!(!hal.read_digital(pin), "{:?} low", pin);
    }
}

#[test]
fn writing_one_pin_never_disturbs_another() {
    let mut hal = hal();
    for pin in Pin::ALL {
        hal.set_pin_mode(pin, PinMode::Output);
    }

    for pin in Pin::ALL {
        for high in [true, false, true] {
            let before = levels(&hal);
            hal.write_digital(pin, high);
            let after = levels(&hal);
            for (i, other) in Pin::ALL.iter().enumerate() {
                if *other != pin {
                    assert_eq!(before[i], after[i], "writing {:?} changed {:?}", pin, other);
                }
            }
            assert_eq!(hal.read_digital(pin), high);
        }
    }
}

#[test]
fn toggling_one_bit_keeps_the_rest_of_the_group() {
    for port in Port::ALL {
        let group: Vec<Pin> = Pin::ALL
            .iter()
            .copied()
            .filter(|p| p.port() == port)
            .collect();
        let mut hal = hal();
        for pin in &group {
            hal.set_pin_mode(*pin, PinMode::Output);
            hal.write_digital(*pin, true);
        }
        let full_ddr = hal.registers().read(Reg::Ddr(port));
        let full_out = hal.registers().read(Reg::Out(port));

        for pin in &group {
            let mask = 1u8 << pin.bit();

            hal.write_digital(*pin, false);
            assert_eq!(hal.registers().read(Reg::Out(port)), full_out & !mask);
            hal.write_digital(*pin, true);
            assert_eq!(hal.registers().read(Reg::Out(port)), full_out);

            hal.set_pin_mode(*pin, PinMode::Input);
            assert_eq!(hal.registers().read(Reg::Ddr(port)), full_ddr & !mask);
            hal.set_pin_mode(*pin, PinMode::Output);
            assert_eq!(hal.registers().read(Reg::Ddr(port)), full_ddr);
        }
    }
}

#[test]
fn group_sizes_match_the_uno() {
    let count = |port| Pin::ALL.iter().filter(|p| p.port() == port).count();
    assert_eq!(count(Port::B), 6);
    assert_eq!(count(Port::C), 6);
    assert_eq!(count(Port::D), 8);
}

#[test]
fn duty_write_hits_exactly_one_channel() {
    for (n, target) in PwmChannel::ALL.iter().enumerate() {
        let mut hal = hal();
        hal.init_pwm();
        for channel in PwmChannel::ALL {
            hal.write_channel_duty(channel, 11);
        }

        let value = 100 + n as u8;
        hal.write_duty(target.pin(), value);

        for channel in PwmChannel::ALL {
            let expected = if channel == *target { value } else { 11 };
            assert_eq!(
                hal.channel_duty(channel),
                expected,
                "{:?} after writing {:?}",
                channel,
                target
            );
        }
    }
}

#[test]
fn read_analog_preserves_reference_bits() {
    let mut hal = Hal::new(RegisterImage::new().with_conversion_polls(2));
    hal.init_adc();

    for upper in [0x00u8, 0x40, 0xC0, 0x70] {
        hal.registers_mut().modify(Reg::Admux, |r| (r & 0x0F) | upper);
        for channel in AdcChannel::ALL.iter().rev() {
            hal.read_analog(*channel);
            assert_eq!(hal.registers().read(Reg::Admux) & 0xF0, upper);
        }
    }
    assert_eq!(hal.registers().mux_writes_during_conversion(), 0);
}

#[test]
fn read_analog_waits_for_completion() {
    let mut regs = RegisterImage::new().with_conversion_polls(50);
    regs.set_sample(AdcChannel::Adc5, 900);
    let mut hal = Hal::new(regs);
    hal.init_adc();

    assert_eq!(hal.read_analog(AdcChannel::Adc5), 900);
    assert!(!hal.registers().conversion_pending());
    assert!(!hal.registers().test_bit(Reg::Adcsra, bits::ADSC));
    assert!(hal.registers().test_bit(Reg::Adcsra, bits::ADEN));
}

#[test]
fn init_pwm_is_idempotent() {
    let mut once = hal();
    once.init_pwm();

    let mut twice = hal();
    twice.init_pwm();
    twice.init_pwm();

    for timer in Timer::ALL {
        for reg in [timer.control_a(), timer.control_b()] {
            assert_eq!(
                once.registers().read(reg),
                twice.registers().read(reg),
                "{:?}",
                reg
            );
        }
    }
    for channel in PwmChannel::ALL {
        assert_eq!(once.channel_duty(channel), twice.channel_duty(channel));
        assert!(twice.is_pwm_connected(channel.pin()));
    }
}
