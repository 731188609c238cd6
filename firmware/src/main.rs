// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]
#![feature(asm_experimental_arch)]

mod analog;
mod board;
mod cooler;
mod debug;
mod exint;
mod heater;
mod hw;
mod lcd;
mod ports;
mod reset;
mod timer;

use crate::{
    analog::{ADC, Adc},
    board::HvacBoard,
    cooler::{COOLER, Cooler},
    debug::debug_log_state,
    exint::{EXINT, ExInt},
    heater::{HEATER, Heater},
    hw::{Peripherals, interrupt},
    lcd::lcd_init,
    ports::{PORTS, Ports},
    reset::unwrap_option,
    timer::{TIMER, Timer},
};
use avr_context::{InitCtx, MainCtx};
use tempcontrol::Thermostat;

fn wdt_init() {
    // SAFETY: The asm code only accesses the WDT registers
    //         which are not accessed from anywhere else in the program.
    unsafe {
        // Enable WDT with timeout 125 ms
        core::arch::asm!(
            "ldi {tmp}, 0x18", // WDCE=1, WDE=1
            "sts {WDTCSR}, {tmp}",
            "ldi {tmp}, 0x0B", // WDIE=0, WDE=1, WDP3=0, WDP2=0, WDP1=1, WDP0=1
            "sts {WDTCSR}, {tmp}",
            tmp = out(reg_upper) _,
            WDTCSR = const 0x60,
            options(nostack, preserves_flags)
        );
    }
}

#[avr_device::entry]
fn main() -> ! {
    wdt_init();

    let dp = unwrap_option(Peripherals::take());

    let init_static_vars = |ctx: &InitCtx| {
        PORTS.init(
            ctx,
            Ports {
                PORTA: dp.PORTA,
                PORTB: dp.PORTB,
                PORTC: dp.PORTC,
                PORTD: dp.PORTD,
            },
        );
        PORTS.setup(ctx);

        EXINT.init(ctx, ExInt { EXINT: dp.EXINT });
        EXINT.setup(ctx);

        TIMER.init(ctx, Timer { TC0: dp.TC0 });
        TIMER.setup(ctx);

        ADC.init(ctx, Adc { ADC: dp.ADC });
        ADC.setup(ctx);

        HEATER.init(ctx, Heater { TC1: dp.TC1 });
        HEATER.setup(ctx);

        COOLER.init(ctx, Cooler { TC3: dp.TC3 });
        COOLER.setup(ctx);
    };

    // SAFETY:
    // This is the context handle for the main() function.
    // Holding a reference to this object proves that the holder
    // is running in main() context.
    // Interrupts are still disabled after reset.
    let m = unsafe { MainCtx::new_with_init(init_static_vars) };

    // The display needs the running time base for its power-on delays.
    lcd_init(&m);

    let mut board = HvacBoard::new(&m);
    let mut thermostat = Thermostat::new();

    // SAFETY: This must be after construction of MainCtx
    //         and after initialization of static InitCtxCell variables.
    unsafe { interrupt::enable() };

    loop {
        let action = thermostat.run(&mut board);
        debug_log_state(&m, &thermostat, action);
    }
}

// vim: ts=4 sw=4 expandtab
