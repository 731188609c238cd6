// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thermostat control core.
//!
//! A main loop samples the setpoint, control and temperature inputs,
//! services debounced button events and runs one of four operating modes:
//! off, heat, cool and auto-cool with a selectable hysteresis band.
//! The heater is pulsed by a timer interrupt pair, the cooler is driven by PWM.
//!
//! The hardware is reached through the traits in [board].
//! The AVR firmware in `firmware/` implements them for the real board.

#![no_std]

pub mod board;
pub mod event;
pub mod heater;
pub mod mode;
pub mod pwm;
pub mod sensor;
pub mod status;
pub mod thermostat;

#[cfg(test)]
mod mock;

pub use crate::{
    board::{AdcChannel, Board, Button},
    event::Event,
    mode::{Hysteresis, Mode},
    sensor::{Celsius, Measurement, SensorSample},
    thermostat::{Action, ActuatorState, Thermostat},
};

// vim: ts=4 sw=4 expandtab
