// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::hw::{interrupt, mcu};
use avr_atomic::AvrAtomic;
use avr_context::{InitCtx, InitCtxCell, IrqCtx, MainCtx};
use tempcontrol::Button;

#[allow(non_snake_case)]
pub struct ExInt {
    pub EXINT: mcu::EXINT,
}

// SAFETY: Is initialized when constructing the MainCtx.
pub static EXINT: InitCtxCell<ExInt> = unsafe { InitCtxCell::uninit() };

/// Pending button edges. Indexed by [Button::index].
static EVENTS: [AvrAtomic<bool>; 3] = [AvrAtomic::new(), AvrAtomic::new(), AvrAtomic::new()];

const INT_ENA_0: bool = true; // PD2: mode button
const INT_ENA_1: bool = true; // PD3: hysteresis button
const INT_ENA_2: bool = true; // PB2: off button

// ISCn1: falling edge
const ISC_FALLING: u8 = 0x2;

impl ExInt {
    #[allow(clippy::identity_op)]
    pub fn setup(&self, _: &InitCtx) {
        // SAFETY: Called with interrupts disabled. Ensured by &InitCtx.
        unsafe {
            self.EXINT.eimsk().write(|w| w.bits(0));
            self.EXINT.eicra().write(|w| {
                w.bits((ISC_FALLING << 0) | (ISC_FALLING << 2) | (ISC_FALLING << 4))
            });
            self.EXINT.eifr().write(|w| w.bits(0x07));
            self.EXINT.eimsk().write(|w| {
                w.bits(
                    ((INT_ENA_0 as u8) << 0)
                        | ((INT_ENA_1 as u8) << 1)
                        | ((INT_ENA_2 as u8) << 2),
                )
            });
        }
    }
}

/// Consume the pending edge of a button.
pub fn take_event(_m: &MainCtx<'_>, button: Button) -> bool {
    interrupt::free(|_cs| {
        let event = &EVENTS[button.index()];
        let pending = event.load();
        event.store(false);
        pending
    })
}

#[inline(always)]
fn flag_event(_c: &IrqCtx<'_>, button: Button) {
    EVENTS[button.index()].store(true);
}

pub fn irq_handler_int0(c: &IrqCtx<'_>) {
    flag_event(c, Button::Mode);
}

pub fn irq_handler_int1(c: &IrqCtx<'_>) {
    flag_event(c, Button::Hysteresis);
}

pub fn irq_handler_int2(c: &IrqCtx<'_>) {
    flag_event(c, Button::Off);
}

// vim: ts=4 sw=4 expandtab
