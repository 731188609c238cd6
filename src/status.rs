// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    board::Display,
    mode::{Hysteresis, Mode},
    sensor::Measurement,
    thermostat::ActuatorState,
};
use core::fmt::Write as _;
use heapless::String;

/// Number of characters per display line.
pub const LINE_LEN: usize = 20;
/// Number of display lines.
pub const NR_LINES: usize = 4;

pub type Line = String<LINE_LEN>;

/// Snapshot of everything shown on the display.
#[derive(Copy, Clone, Debug)]
pub struct Status {
    pub measurement: Measurement,
    pub hysteresis: Hysteresis,
    pub mode: Mode,
    pub actuators: ActuatorState,
}

fn yes_no(on: bool) -> char {
    if on { 'Y' } else { 'N' }
}

impl Status {
    pub fn lines(&self) -> [Line; NR_LINES] {
        let m = &self.measurement;
        let mut lines: [Line; NR_LINES] = Default::default();

        // The sensor ranges keep every line below LINE_LEN.
        // On overflow the line is truncated.
        write!(lines[0], "RT:{:4.1}C   H C", m.temperature.0).ok();
        write!(
            lines[1],
            "SP:{:4.1}C   {} {}",
            m.setpoint.0,
            yes_no(self.actuators.heater_on),
            yes_no(self.actuators.cooler_on),
        )
        .ok();
        write!(lines[2], "HS:{}  HC:{:4.1}%", self.hysteresis.level(), m.control).ok();
        write!(lines[3], "MD: {}", self.mode.label()).ok();

        lines
    }

    pub fn render<D: Display + ?Sized>(&self, display: &mut D) {
        for (i, line) in self.lines().iter().enumerate() {
            display.display_line(i as u8 + 1, line);
        }
    }
}


// vim: ts=4 sw=4 expandtab
