//! Demo control loop: LED self-test, then a fixed drive pattern, forever.

use embedded_hal::blocking::delay::DelayMs;
use ufmt::uwrite;

use crate::config::{
    Phase, DEMO_SEQUENCE, SELF_TEST_BLINKS, SELF_TEST_HALF_PERIOD_MS, SELF_TEST_LED, UART_BAUD,
};
use crate::drivers::{self_test, MotorDriver, SerialConsole};
use crate::hal::{Hal, RegisterFile};

/// Main application state and logic
pub struct Application<R, D> {
    driver: MotorDriver<R>,
    delay: D,
    cycles: u32,
}

impl<R: RegisterFile, D: DelayMs<u16>> Application<R, D> {
    pub fn new(hal: Hal<R>, delay: D) -> Self {
        Self {
            driver: MotorDriver::new(hal),
            delay,
            cycles: 0,
        }
    }

    /// Brings up the console and the motor driver. Motors start braked.
    pub fn start(&mut self) {
        let hal = self.driver.hal_mut();
        hal.init_uart(UART_BAUD);
        SerialConsole::new(hal).write_line("ATmega328P motor firmware v0.1.0");

        self.driver.setup();
        self.driver.stop_all();
        self.console().write_line("Motors ready");
    }

    /// Blinks the on-board LED so a running board is visible.
    pub fn self_test(&mut self) {
        let mut led = self.driver.hal_mut().output_pin(SELF_TEST_LED);
        self_test(
            &mut led,
            &mut self.delay,
            SELF_TEST_BLINKS,
            SELF_TEST_HALF_PERIOD_MS,
        )
        .ok();
    }

    /// Applies one phase and holds it for its duration.
    pub fn run_phase(&mut self, phase: &Phase) {
        let cycle = self.cycles;
        uwrite!(
            &mut self.console(),
            "[{}] {} A={} B={} {}ms\r\n",
            cycle,
            phase.label,
            phase.motor_a,
            phase.motor_b,
            phase.hold_ms
        )
        .ok();

        if phase.is_brake() {
            self.driver.stop_all();
        } else {
            let _a = self.driver.drive_motor_a(phase.motor_a);
            let _b = self.driver.drive_motor_b(phase.motor_b);

            #[cfg(feature = "debug")]
            {
                let mut console = self.console();
                console.debug(_a.name(), _a.duty());
                console.debug(_b.name(), _b.duty());
            }
        }

        self.delay.delay_ms(phase.hold_ms);
    }

    /// Self-test followed by the whole demo sequence.
    pub fn run_cycle(&mut self) {
        self.self_test();
        for phase in DEMO_SEQUENCE.iter() {
            self.run_phase(phase);
        }
        self.cycles = self.cycles.wrapping_add(1);
    }

    pub fn run(&mut self) -> ! {
        loop {
            self.run_cycle();
        }
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn driver(&self) -> &MotorDriver<R> {
        &self.driver
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    fn console(&mut self) -> SerialConsole<'_, R> {
        SerialConsole::new(self.driver.hal_mut())
    }
}
