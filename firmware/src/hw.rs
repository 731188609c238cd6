// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

pub use atmega::{self as mcu, Peripherals};
pub use avr_device::atmega1284p as atmega;
pub use avr_device::interrupt::{self, Mutex};

use avr_context::IrqCtx;

macro_rules! define_isr {
    ($name:ident, $handler:path) => {
        #[avr_device::interrupt(atmega1284p)]
        fn $name() {
            // SAFETY: We are inside of an interrupt handler.
            // Therefore, it is safe to construct an `IrqCtx`.
            let c = unsafe { IrqCtx::new() };
            $handler(&c);
        }
    };
}

define_isr!(INT0, crate::exint::irq_handler_int0);
define_isr!(INT1, crate::exint::irq_handler_int1);
define_isr!(INT2, crate::exint::irq_handler_int2);
define_isr!(TIMER1_COMPB, crate::heater::irq_handler_timer1_compb);
define_isr!(TIMER1_OVF, crate::heater::irq_handler_timer1_ovf);

/// Do nothing for the duration of 3 CPU cycles.
#[inline(always)]
#[rustfmt::skip]
pub fn nop3() {
    // SAFETY: The asm code does not touch memory or registers.
    unsafe {
        core::arch::asm!(
            "rjmp 1",
            "1: nop",
            options(preserves_flags)
        )
    }
}

// vim: ts=4 sw=4 expandtab
