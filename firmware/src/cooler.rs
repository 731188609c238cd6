// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::{
    hw::{interrupt, mcu},
    ports::PORTS,
};
use avr_context::{InitCtx, InitCtxCell, MainCtx};

#[allow(non_snake_case)]
pub struct Cooler {
    pub TC3: mcu::TC3,
}

// SAFETY: Is initialized when constructing the MainCtx.
pub static COOLER: InitCtxCell<Cooler> = unsafe { InitCtxCell::uninit() };

// Fast PWM 10 bit, non-inverting on OC3A.
const TCCR3A_PWM: u8 = (1 << 7) | (1 << 1) | (1 << 0); // COM3A1, WGM31, WGM30
const TCCR3B_PWM: u8 = (1 << 3) | 0x03; // WGM32, CS: 64 -> 244 Hz

impl Cooler {
    pub fn setup(&self, _: &InitCtx) {
        // SAFETY: Called with interrupts disabled. Ensured by &InitCtx.
        unsafe {
            self.TC3.timsk3().write(|w| w.bits(0));
            self.TC3.tccr3b().write(|w| w.bits(0));
            self.TC3.tccr3a().write(|w| w.bits(0));
            self.TC3.tccr3c().write(|w| w.bits(0));
            self.TC3.tcnt3().write(|w| w.bits(0));
            self.TC3.ocr3a().write(|w| w.bits(0));
        }
    }

    fn running(&self, _m: &MainCtx<'_>) -> bool {
        self.TC3.tccr3b().read().bits() & 0x07 != 0
    }

    /// Start the PWM, if it is not running already.
    pub fn enable(&self, m: &MainCtx<'_>) {
        if !self.running(m) {
            // SAFETY: Valid fast PWM configuration.
            unsafe {
                self.TC3.tccr3a().write(|w| w.bits(TCCR3A_PWM));
                self.TC3.tccr3b().write(|w| w.bits(TCCR3B_PWM));
            }
        }
    }

    /// Stop the PWM and drive the output low.
    pub fn disable(&self, m: &MainCtx<'_>) {
        // SAFETY: Stopped timer, OC3A disconnected.
        unsafe {
            self.TC3.tccr3b().write(|w| w.bits(0));
            self.TC3.tccr3a().write(|w| w.bits(0));
        }
        PORTS.cooler_low(m);
    }

    pub fn set_duty(&self, _m: &MainCtx<'_>, raw: u16) {
        // The 16 bit TEMP register is shared with the heater timer ISRs.
        interrupt::free(|_cs| {
            // SAFETY: Values above TOP keep the output high.
            self.TC3.ocr3a().write(|w| unsafe { w.bits(raw) });
        });
    }
}

// vim: ts=4 sw=4 expandtab
