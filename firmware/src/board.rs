// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    analog::ADC, cooler::COOLER, exint, heater::HEATER, lcd::lcd_line, ports::PORTS, timer::TIMER,
};
use avr_context::MainCtx;
use tempcontrol::{
    AdcChannel, Button,
    board::{Analog, Buttons, Clock, Cooler, Display, HeaterSwitch, HeaterTimer},
};

/// The real board, driven from main context.
pub struct HvacBoard<'a> {
    m: &'a MainCtx<'a>,
}

impl<'a> HvacBoard<'a> {
    pub fn new(m: &'a MainCtx<'a>) -> Self {
        Self { m }
    }
}

impl Analog for HvacBoard<'_> {
    fn sample(&mut self, chan: AdcChannel) -> u16 {
        ADC.sample(self.m, chan)
    }
}

impl Cooler for HvacBoard<'_> {
    fn cooler_enable(&mut self) {
        COOLER.enable(self.m);
    }

    fn cooler_disable(&mut self) {
        COOLER.disable(self.m);
    }

    fn set_cooler_duty(&mut self, raw: u16) {
        COOLER.set_duty(self.m, raw);
    }
}

impl HeaterSwitch for HvacBoard<'_> {
    fn set_heater_output(&mut self, on: bool) {
        HEATER.set_output(self.m, on);
    }

    fn reset_heater_timer(&mut self) {
        HEATER.reset_counter(self.m);
    }
}

impl HeaterTimer for HvacBoard<'_> {
    fn set_heater_compare(&mut self, compare: u16) {
        HEATER.set_compare(self.m, compare);
    }

    fn enable_heater_irqs(&mut self, enable: bool) {
        HEATER.enable_irqs(self.m, enable);
    }
}

impl Buttons for HvacBoard<'_> {
    fn button_asserted(&self, button: Button) -> bool {
        match button {
            Button::Mode => PORTS.mode_button(self.m),
            Button::Hysteresis => PORTS.hysteresis_button(self.m),
            Button::Off => PORTS.off_button(self.m),
        }
    }

    fn take_event(&self, button: Button) -> bool {
        exint::take_event(self.m, button)
    }
}

impl Display for HvacBoard<'_> {
    fn display_line(&mut self, row: u8, text: &str) {
        lcd_line(self.m, row, text);
    }
}

impl Clock for HvacBoard<'_> {
    fn watchdog_refresh(&mut self) {
        avr_device::asm::wdr();
    }

    fn delay_ms(&mut self, ms: u16) {
        TIMER.delay_ms(self.m, ms);
    }
}

// vim: ts=4 sw=4 expandtab
