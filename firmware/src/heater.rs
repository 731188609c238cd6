// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::{
    hw::{interrupt, mcu},
    ports::PORTS,
};
use avr_context::{InitCtx, InitCtxCell, IrqCtx, MainCtx};
use tempcontrol::board::HeaterSwitch;

#[allow(non_snake_case)]
pub struct Heater {
    pub TC1: mcu::TC1,
}

// SAFETY: Is initialized when constructing the MainCtx.
pub static HEATER: InitCtxCell<Heater> = unsafe { InitCtxCell::uninit() };

const TIMSK1_TOIE1: u8 = 1 << 0;
const TIMSK1_OCIE1B: u8 = 1 << 2;
const TIFR1_TOV1: u8 = 1 << 0;
const TIFR1_OCF1B: u8 = 1 << 2;

impl Heater {
    #[rustfmt::skip]
    pub fn setup(&self, _: &InitCtx) {
        // Timer 1 configuration:
        // Normal mode, free running over the full 16 bit range.
        // CS: 64 -> 4 us per timer tick, 262 ms period.
        // Both interrupts start disabled.
        // SAFETY: Called with interrupts disabled. Ensured by &InitCtx.
        unsafe {
            self.TC1.timsk1().write(|w| w.bits(0));
            self.TC1.tccr1a().write(|w| w.bits(0));
            self.TC1.tccr1c().write(|w| w.bits(0));
            self.TC1.tcnt1().write(|w| w.bits(0));
            self.TC1.ocr1b().write(|w| w.bits(0xFFFF));
            self.TC1.tifr1().write(|w| w.bits(0x27)); // clear all flags
            self.TC1.tccr1b().write(|w| w.bits(0x03)); // CS11 | CS10
        }
    }

    // The 16 bit registers share the TEMP register with the ISRs.
    // All main context accesses run with interrupts disabled.

    pub fn set_compare(&self, _m: &MainCtx<'_>, compare: u16) {
        interrupt::free(|_cs| {
            // SAFETY: Any 16 bit value is a valid compare value.
            self.TC1.ocr1b().write(|w| unsafe { w.bits(compare) });
        });
    }

    pub fn reset_counter(&self, _m: &MainCtx<'_>) {
        interrupt::free(|_cs| {
            // SAFETY: Restart the period.
            self.TC1.tcnt1().write(|w| unsafe { w.bits(0) });
        });
    }

    pub fn enable_irqs(&self, _m: &MainCtx<'_>, enable: bool) {
        interrupt::free(|_cs| {
            // SAFETY: Only the heater interrupts live in TIMSK1.
            unsafe {
                if enable {
                    if self.TC1.timsk1().read().bits() == 0 {
                        // Don't fire stale events on enable.
                        self.TC1
                            .tifr1()
                            .write(|w| w.bits(TIFR1_TOV1 | TIFR1_OCF1B));
                    }
                    self.TC1
                        .timsk1()
                        .write(|w| w.bits(TIMSK1_OCIE1B | TIMSK1_TOIE1));
                } else {
                    self.TC1.timsk1().write(|w| w.bits(0));
                }
            }
        });
    }

    pub fn set_output(&self, m: &MainCtx<'_>, on: bool) {
        interrupt::free(|_cs| {
            PORTS.set_heater(m, on);
        });
    }
}

/// Heater hardware as seen from the timer interrupts.
struct HeaterIrq<'a> {
    c: &'a IrqCtx<'a>,
}

impl HeaterSwitch for HeaterIrq<'_> {
    fn set_heater_output(&mut self, on: bool) {
        PORTS.set_heater_irq(self.c, on);
    }

    fn reset_heater_timer(&mut self) {
        // SAFETY: Interrupts are disabled inside of the ISR.
        HEATER.TC1.tcnt1().write(|w| unsafe { w.bits(0) });
    }
}

/// Timer 1 compare B interrupt. End of the heater on-time.
pub fn irq_handler_timer1_compb(c: &IrqCtx<'_>) {
    tempcontrol::heater::irq_compare_match(&mut HeaterIrq { c });
}

/// Timer 1 overflow interrupt. Start of the next heater period.
pub fn irq_handler_timer1_ovf(c: &IrqCtx<'_>) {
    tempcontrol::heater::irq_overflow(&mut HeaterIrq { c });
}

// vim: ts=4 sw=4 expandtab
