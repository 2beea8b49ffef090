#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    use uno_motor_firmware::hal::{AvrRegisters, Delay};
    use uno_motor_firmware::{Application, Hal};

    let regs = AvrRegisters::take().unwrap();
    let mut app = Application::new(Hal::new(regs), Delay::new());

    app.start();
    app.run()
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("uno_motor_firmware only runs on the ATmega328P; build with an AVR target");
    std::process::exit(1);
}
