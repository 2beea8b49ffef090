//! Firmware library for an Arduino Uno (ATmega328P) driving two DC motors
//! through a TB6612FNG dual H-bridge.
//!
//! - [`hal`]: pin mapping, digital I/O, PWM timers, ADC and USART over a
//!   swappable register file
//! - [`drivers`]: motor driver, LED self-test and serial console built on
//!   the HAL
//! - [`application`]: the demo control loop run by the firmware binary
//!
//! Everything above the register file is target independent, so the crate
//! tests on the host against [`hal::RegisterImage`].

#![cfg_attr(not(test), no_std)]

pub mod application;
pub mod config;
pub mod drivers;
pub mod hal;

pub use application::Application;
pub use drivers::{Motor, MotorCommand, MotorDriver, MotorPins};
pub use hal::{AdcChannel, Hal, Pin, PinMode};
