pub mod blink;
pub mod motor_driver;
pub mod serial_console;

pub use blink::self_test;
pub use motor_driver::{Motor, MotorCommand, MotorDriver, MotorPins, MAX_SPEED};
pub use serial_console::SerialConsole;
