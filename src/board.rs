// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hardware collaborators of the control loop.
//!
//! The control core never touches registers. Everything it needs from the
//! board is reached through the traits in this module.

/// Analog input channels.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum AdcChannel {
    /// Setpoint dial.
    Setpoint = 0,
    /// Heater/cooler control dial.
    Control = 1,
    /// Temperature sensor.
    Temperature = 2,
}

impl AdcChannel {
    pub const ALL: [AdcChannel; 3] = [Self::Setpoint, Self::Control, Self::Temperature];

    pub const fn index(&self) -> u8 {
        *self as u8
    }
}

/// Push buttons. All of them are active low.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Button {
    /// Advance to the next operating mode.
    Mode = 0,
    /// Advance to the next hysteresis level.
    Hysteresis = 1,
    /// Force the operating mode to off.
    Off = 2,
}

impl Button {
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

pub trait Analog {
    /// Run one blocking conversion and return the 10 bit result.
    fn sample(&mut self, chan: AdcChannel) -> u16;
}

pub trait Cooler {
    /// Make sure the cooler PWM timer is running and connected to the output pin.
    fn cooler_enable(&mut self);

    /// Disconnect the PWM and drive the cooler output low.
    fn cooler_disable(&mut self);

    /// Set the 10 bit PWM duty. The value is not clamped.
    fn set_cooler_duty(&mut self, raw: u16);
}

/// What the heater timer interrupts touch.
pub trait HeaterSwitch {
    /// Drive the heater output pin.
    fn set_heater_output(&mut self, on: bool);

    /// Reset the timer counter to zero.
    fn reset_heater_timer(&mut self);
}

/// The heater timing hardware.
///
/// One free running 16 bit timer with one compare unit.
/// The compare match interrupt switches the heater off,
/// the overflow interrupt switches it on again.
pub trait HeaterTimer: HeaterSwitch {
    /// Load the compare register.
    fn set_heater_compare(&mut self, compare: u16);

    /// Enable or disable both the compare match and the overflow interrupt.
    fn enable_heater_irqs(&mut self, enable: bool);
}

pub trait Buttons {
    /// Poll the physical button line.
    /// Returns true, if the button is pressed (line pulled low).
    fn button_asserted(&self, button: Button) -> bool;

    /// Consume the pending edge event of a button.
    /// Returns true, if the interrupt handler flagged an edge since the last call.
    fn take_event(&self, button: Button) -> bool;
}

pub trait Display {
    /// Write one line of text. `row` is 1 based.
    fn display_line(&mut self, row: u8, text: &str);
}

pub trait Clock {
    /// Acknowledge the watchdog.
    fn watchdog_refresh(&mut self);

    /// Busy wait. The implementation must keep the watchdog alive while waiting.
    fn delay_ms(&mut self, ms: u16);
}

/// Everything the thermostat needs from the board.
pub trait Board: Analog + Cooler + HeaterTimer + Buttons + Display + Clock {}

impl<T> Board for T where T: Analog + Cooler + HeaterTimer + Buttons + Display + Clock {}


// vim: ts=4 sw=4 expandtab
