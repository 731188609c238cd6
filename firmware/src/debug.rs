// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostic values for the on-chip debugger.
//!
//! The values are kept in RAM only. Inspect `VALUES` with a debugger.

use avr_context::MainCtx;
#[cfg(feature = "debug")]
use crate::{
    hw::{Mutex, interrupt},
    ports::PORTS,
};
#[cfg(feature = "debug")]
use core::cell::Cell;
use tempcontrol::{
    Action, Celsius, Thermostat,
    heater::{compare_target, duty},
    pwm::{duty_from_percent, duty_from_range},
};

#[derive(Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Debug {
    Mode,
    Hysteresis,
    HeaterCompare,
    Setpoint,
    Temperature,
    CoolerDuty,
    HeaterDuty,
    ControlDuty,
}
#[cfg(feature = "debug")]
const NRVALUES: usize = 8;

#[cfg(feature = "debug")]
#[unsafe(no_mangle)]
static VALUES: Mutex<[Cell<u16>; NRVALUES]> = Mutex::new([
    Cell::new(0),
    Cell::new(0),
    Cell::new(0),
    Cell::new(0),
    Cell::new(0),
    Cell::new(0),
    Cell::new(0),
    Cell::new(0),
]);

impl Debug {
    #[cfg(feature = "debug")]
    pub fn log_u16(&self, value: u16) {
        interrupt::free(|cs| {
            let id = *self as usize;
            let values = VALUES.borrow(cs);
            if id < values.len() {
                values[id].set(value);
            }
        });
    }

    #[cfg(not(feature = "debug"))]
    #[inline(always)]
    pub fn log_u16(&self, _value: u16) {}

    pub fn log_u8(&self, value: u8) {
        self.log_u16(value.into())
    }

    /// Log in units of 0.1 degrees.
    pub fn log_celsius(&self, value: Celsius) {
        self.log_u16((value.0 * 10.0) as i16 as u16);
    }
}

/// Snapshot the controller state after one loop iteration.
pub fn debug_log_state(m: &MainCtx<'_>, thermostat: &Thermostat, action: Action) {
    let control = thermostat.sample().control;
    let measurement = thermostat.measurement();

    Debug::Mode.log_u8(thermostat.mode() as u8);
    Debug::Hysteresis.log_u8(thermostat.hysteresis().level());
    Debug::Setpoint.log_celsius(measurement.setpoint);
    Debug::Temperature.log_celsius(measurement.temperature);
    let compare = match action {
        Action::Heat => compare_target(control),
        _ => 0,
    };
    Debug::HeaterCompare.log_u16(compare);
    // Both on the 10 bit cooler duty scale.
    Debug::HeaterDuty.log_u16(duty_from_range(duty(compare), 0.0, 1.0));
    Debug::ControlDuty.log_u16(duty_from_percent(measurement.control));
    Debug::CoolerDuty.log_u16(match action {
        Action::Cool => control,
        _ => 0,
    });

    debug_toggle(m);
}

#[cfg(feature = "debug")]
fn debug_toggle(m: &MainCtx<'_>) {
    PORTS.toggle_debug(m);
}

#[cfg(not(feature = "debug"))]
#[inline(always)]
fn debug_toggle(_m: &MainCtx<'_>) {}

// vim: ts=4 sw=4 expandtab
