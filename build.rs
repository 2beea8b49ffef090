use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (unit and integration tests) need no MCU flags
    let target = env::var("TARGET").unwrap_or_default();
    if !target.contains("avr") {
        return;
    }

    // Configure for ATmega328P
    println!("cargo:rustc-link-arg-bins=-mmcu=atmega328p");

    if env::var("PROFILE").map(|p| p == "debug").unwrap_or(false) {
        println!("cargo:warning=Building debug firmware for ATmega328P at 16MHz");
    }
}
