//! TB6612FNG dual H-bridge driver on top of the pin/timer HAL.
//!
//! Each motor channel has two direction inputs (IN1/IN2) and one PWM input;
//! a shared standby line must be held high for the chip to drive anything.
//!
//! | Command | IN1 | IN2 | PWM |
//! |---------|-----|-----|-----|
//! | `Forward(d)` | high | low | `d` |
//! | `Reverse(d)` | low | high | `d` |
//! | `Brake` | high | high | 0 |
//!
//! # Example
//!
//! ```rust
//! use uno_motor_firmware::drivers::{Motor, MotorCommand, MotorDriver};
//! use uno_motor_firmware::hal::{Hal, Pin, RegisterImage};
//!
//! let mut driver = MotorDriver::new(Hal::new(RegisterImage::new()));
//! driver.setup();
//! driver.drive_motor_a(200);
//!
//! assert_eq!(driver.command(Motor::A), MotorCommand::Forward(200));
//! assert!(driver.hal().read_digital(Pin::D9));
//! assert_eq!(driver.hal().duty(Pin::D3), Some(200));
//! ```

use crate::config::{MOTOR_A, MOTOR_B, STANDBY_PIN};
use crate::hal::{Hal, Pin, PinMode, RegisterFile};

/// Largest duty magnitude a speed can carry.
pub const MAX_SPEED: i16 = 255;

/// Pins of one H-bridge channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotorPins {
    /// IN1 (AIN1/BIN1)
    pub dir1: Pin,
    /// IN2 (AIN2/BIN2)
    pub dir2: Pin,
    /// PWMA/PWMB, must have a timer compare channel
    pub pwm: Pin,
}

impl MotorPins {
    pub const fn new(dir1: Pin, dir2: Pin, pwm: Pin) -> Self {
        Self { dir1, dir2, pwm }
    }

    pub const fn contains(&self, pin: Pin) -> bool {
        self.dir1 as u8 == pin as u8 || self.dir2 as u8 == pin as u8 || self.pwm as u8 == pin as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motor {
    A,
    B,
}

/// Direction and duty of one channel, decided entirely by the signed speed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MotorCommand {
    /// Duty 1..=255
    Forward(u8),
    /// Duty 1..=255
    Reverse(u8),
    /// Both direction inputs high, duty 0. Not the same as coasting.
    #[default]
    Brake,
}

impl MotorCommand {
    /// Positive is forward, negative reverse, zero brakes. Magnitudes above
    /// 255 saturate at full duty.
    pub fn from_speed(speed: i16) -> Self {
        let duty = speed.unsigned_abs().min(MAX_SPEED as u16) as u8;
        match speed {
            s if s > 0 => MotorCommand::Forward(duty),
            s if s < 0 => MotorCommand::Reverse(duty),
            _ => MotorCommand::Brake,
        }
    }

    /// Signed speed this command represents.
    pub fn speed(self) -> i16 {
        match self {
            MotorCommand::Forward(duty) => i16::from(duty),
            MotorCommand::Reverse(duty) => -i16::from(duty),
            MotorCommand::Brake => 0,
        }
    }

    /// Levels for (IN1, IN2).
    pub fn direction_levels(self) -> (bool, bool) {
        match self {
            MotorCommand::Forward(_) => (true, false),
            MotorCommand::Reverse(_) => (false, true),
            MotorCommand::Brake => (true, true),
        }
    }

    pub fn duty(self) -> u8 {
        match self {
            MotorCommand::Forward(duty) | MotorCommand::Reverse(duty) => duty,
            MotorCommand::Brake => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MotorCommand::Forward(_) => "forward",
            MotorCommand::Reverse(_) => "reverse",
            MotorCommand::Brake => "brake",
        }
    }
}

/// Two motor channels plus the standby line, owning the HAL.
pub struct MotorDriver<R> {
    hal: Hal<R>,
    motor_a: MotorPins,
    motor_b: MotorPins,
    standby: Pin,
    commands: [MotorCommand; 2],
}

impl<R: RegisterFile> MotorDriver<R> {
    /// Driver with the board wiring from [`crate::config`].
    pub fn new(hal: Hal<R>) -> Self {
        Self::with_pins(hal, MOTOR_A, MOTOR_B, STANDBY_PIN)
    }

    pub fn with_pins(hal: Hal<R>, motor_a: MotorPins, motor_b: MotorPins, standby: Pin) -> Self {
        Self {
            hal,
            motor_a,
            motor_b,
            standby,
            commands: [MotorCommand::Brake; 2],
        }
    }

    /// Configures every motor pin and standby as outputs, starts the PWM
    /// timers and enables the driver.
    ///
    /// `init_pwm` connects all six compare outputs, so every line this
    /// driver uses as a plain digital output (standby and the direction
    /// pins) is detached from its timer before the driver is enabled.
    pub fn setup(&mut self) {
        for pins in [self.motor_a, self.motor_b] {
            self.hal.set_pin_mode(pins.dir1, PinMode::Output);
            self.hal.set_pin_mode(pins.dir2, PinMode::Output);
            self.hal.set_pin_mode(pins.pwm, PinMode::Output);
        }
        self.hal.set_pin_mode(self.standby, PinMode::Output);

        self.hal.init_pwm();

        self.hal.disconnect_pwm(self.standby);
        for pins in [self.motor_a, self.motor_b] {
            self.hal.disconnect_pwm(pins.dir1);
            self.hal.disconnect_pwm(pins.dir2);
        }

        self.hal.write_digital(self.standby, true);
    }

    /// Applies `speed` (-255..=255) to one channel. See [`MotorCommand::from_speed`].
    ///
    /// When `pins` is the wiring of motor A or B the command is recorded for
    /// [`command`](Self::command) as well.
    pub fn set_motor(&mut self, pins: MotorPins, speed: i16) -> MotorCommand {
        let command = MotorCommand::from_speed(speed);
        self.write_command(pins, command);
        if let Some(motor) = self.motor_for(pins) {
            self.commands[motor as usize] = command;
        }
        command
    }

    pub fn apply(&mut self, motor: Motor, command: MotorCommand) {
        let pins = self.pins(motor);
        self.write_command(pins, command);
        self.commands[motor as usize] = command;
    }

    pub fn drive(&mut self, motor: Motor, speed: i16) -> MotorCommand {
        let command = MotorCommand::from_speed(speed);
        self.apply(motor, command);
        command
    }

    pub fn drive_motor_a(&mut self, speed: i16) -> MotorCommand {
        self.drive(Motor::A, speed)
    }

    pub fn drive_motor_b(&mut self, speed: i16) -> MotorCommand {
        self.drive(Motor::B, speed)
    }

    /// Brakes both motors (direction pins high, not coasting).
    pub fn stop_all(&mut self) {
        self.apply(Motor::A, MotorCommand::Brake);
        self.apply(Motor::B, MotorCommand::Brake);
    }

    /// Last command written to `motor`'s pins.
    pub fn command(&self, motor: Motor) -> MotorCommand {
        self.commands[motor as usize]
    }

    pub fn pins(&self, motor: Motor) -> MotorPins {
        match motor {
            Motor::A => self.motor_a,
            Motor::B => self.motor_b,
        }
    }

    fn motor_for(&self, pins: MotorPins) -> Option<Motor> {
        if pins == self.motor_a {
            Some(Motor::A)
        } else if pins == self.motor_b {
            Some(Motor::B)
        } else {
            None
        }
    }

    pub fn standby_pin(&self) -> Pin {
        self.standby
    }

    pub fn is_enabled(&self) -> bool {
        self.hal.output_latch(self.standby)
    }

    pub fn hal(&self) -> &Hal<R> {
        &self.hal
    }

    pub fn hal_mut(&mut self) -> &mut Hal<R> {
        &mut self.hal
    }

    pub fn into_hal(self) -> Hal<R> {
        self.hal
    }

    fn write_command(&mut self, pins: MotorPins, command: MotorCommand) {
        let (in1, in2) = command.direction_levels();
        self.hal.write_digital(pins.dir1, in1);
        self.hal.write_digital(pins.dir2, in2);
        self.hal.write_duty(pins.pwm, command.duty());
    }
}
