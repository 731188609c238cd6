// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording board for the unit tests.

extern crate std;

use crate::board::{AdcChannel, Analog, Button, Buttons, Clock, Cooler, Display, HeaterSwitch, HeaterTimer};
use core::cell::Cell;
use std::{string::String, vec::Vec};

pub struct MockBoard {
    pub adc: [u16; 3],
    pending: [Cell<bool>; 3],
    /// Number of polls the button still reads as pressed.
    held: [Cell<u32>; 3],
    pub heater_output: bool,
    pub heater_compare: Option<u16>,
    pub heater_irqs: bool,
    pub heater_resets: u32,
    pub cooler_enabled: bool,
    pub cooler_duty: u16,
    pub lines: [String; 4],
    pub watchdog: u32,
    pub delays: Vec<u16>,
}

impl MockBoard {
    pub fn new() -> Self {
        Self {
            adc: [0; 3],
            pending: Default::default(),
            held: Default::default(),
            heater_output: false,
            heater_compare: None,
            heater_irqs: false,
            heater_resets: 0,
            cooler_enabled: false,
            cooler_duty: 0,
            lines: Default::default(),
            watchdog: 0,
            delays: Vec::new(),
        }
    }

    pub fn set_adc(&mut self, setpoint: u16, control: u16, temperature: u16) {
        self.adc = [setpoint, control, temperature];
    }

    /// Flag an edge event and keep the line pressed for `polls` reads.
    pub fn press(&mut self, button: Button, polls: u32) {
        self.pending[button.index()].set(true);
        self.hold(button, polls);
    }

    /// Keep the line pressed for `polls` reads without flagging an event.
    pub fn hold(&mut self, button: Button, polls: u32) {
        self.held[button.index()].set(polls);
    }
}

impl Analog for MockBoard {
    fn sample(&mut self, chan: AdcChannel) -> u16 {
        self.adc[chan.index() as usize]
    }
}

impl Cooler for MockBoard {
    fn cooler_enable(&mut self) {
        self.cooler_enabled = true;
    }

    fn cooler_disable(&mut self) {
        self.cooler_enabled = false;
    }

    fn set_cooler_duty(&mut self, raw: u16) {
        self.cooler_duty = raw;
    }
}

impl HeaterSwitch for MockBoard {
    fn set_heater_output(&mut self, on: bool) {
        self.heater_output = on;
    }

    fn reset_heater_timer(&mut self) {
        self.heater_resets += 1;
    }
}

impl HeaterTimer for MockBoard {
    fn set_heater_compare(&mut self, compare: u16) {
        self.heater_compare = Some(compare);
    }

    fn enable_heater_irqs(&mut self, enable: bool) {
        self.heater_irqs = enable;
    }
}

impl Buttons for MockBoard {
    fn button_asserted(&self, button: Button) -> bool {
        let held = &self.held[button.index()];
        if held.get() > 0 {
            held.set(held.get() - 1);
            true
        } else {
            false
        }
    }

    fn take_event(&self, button: Button) -> bool {
        self.pending[button.index()].replace(false)
    }
}

impl Display for MockBoard {
    fn display_line(&mut self, row: u8, text: &str) {
        assert!((1..=4).contains(&row));
        self.lines[row as usize - 1] = text.into();
    }
}

impl Clock for MockBoard {
    fn watchdog_refresh(&mut self) {
        self.watchdog += 1;
    }

    fn delay_ms(&mut self, ms: u16) {
        self.delays.push(ms);
    }
}

// vim: ts=4 sw=4 expandtab
