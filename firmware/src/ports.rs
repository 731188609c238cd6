// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::hw::mcu;
use avr_context::{InitCtx, InitCtxCell, IrqCtx, MainCtx};

#[allow(non_snake_case)]
pub struct Ports {
    pub PORTA: mcu::PORTA,
    pub PORTB: mcu::PORTB,
    pub PORTC: mcu::PORTC,
    pub PORTD: mcu::PORTD,
}

// SAFETY: Is initialized when constructing the MainCtx.
pub static PORTS: InitCtxCell<Ports> = unsafe { InitCtxCell::uninit() };

/// Heater switch on PC0.
pub const HEATER_BIT: u8 = 0;
/// Debug pin on PA7.
#[cfg(feature = "debug")]
pub const DEBUG_BIT: u8 = 7;
/// Mode button on PD2 (INT0).
pub const BTN_MODE_BIT: u8 = 2;
/// Hysteresis button on PD3 (INT1).
pub const BTN_HYST_BIT: u8 = 3;
/// Off button on PB2 (INT2).
pub const BTN_OFF_BIT: u8 = 2;
/// Cooler PWM output on PB6 (OC3A).
pub const COOLER_BIT: u8 = 6;

fn pin_input(_bit: u8) -> u8 {
    0
}
fn pin_output(bit: u8) -> u8 {
    1 << bit
}
fn pin_low(_bit: u8) -> u8 {
    0
}
fn pin_high(bit: u8) -> u8 {
    1 << bit
}
fn pin_floating(_bit: u8) -> u8 {
    0
}
fn pin_pullup(bit: u8) -> u8 {
    1 << bit
}

impl Ports {
    #[rustfmt::skip]
    pub fn setup(&self, _: &InitCtx) {
        // SAFETY: Called with interrupts disabled. Ensured by &InitCtx.
        unsafe {
            self.PORTA.porta().write(|w| {
                w.bits(
                    pin_floating(0) | // setpoint dial, ADC0
                    pin_floating(1) | // control dial, ADC1
                    pin_floating(2) | // temperature sensor, ADC2
                    pin_pullup(3) | // NC
                    pin_pullup(4) | // NC
                    pin_pullup(5) | // NC
                    pin_pullup(6) | // NC
                    pin_low(7), // Debug
                )
            });
            self.PORTA.ddra().write(|w| {
                w.bits(
                    pin_input(0) | // setpoint dial, ADC0
                    pin_input(1) | // control dial, ADC1
                    pin_input(2) | // temperature sensor, ADC2
                    pin_input(3) | // NC
                    pin_input(4) | // NC
                    pin_input(5) | // NC
                    pin_input(6) | // NC
                    pin_output(7), // Debug
                )
            });

            self.PORTB.portb().write(|w| {
                w.bits(
                    pin_pullup(0) | // NC
                    pin_pullup(1) | // NC
                    pin_pullup(2) | // off button, INT2, active low
                    pin_pullup(3) | // NC
                    pin_pullup(4) | // NC
                    pin_floating(5) | // ISP MOSI
                    pin_low(6) | // cooler PWM, OC3A
                    pin_floating(7), // ISP SCK
                )
            });
            self.PORTB.ddrb().write(|w| {
                w.bits(
                    pin_input(0) | // NC
                    pin_input(1) | // NC
                    pin_input(2) | // off button, INT2, active low
                    pin_input(3) | // NC
                    pin_input(4) | // NC
                    pin_input(5) | // ISP MOSI
                    pin_output(6) | // cooler PWM, OC3A
                    pin_input(7), // ISP SCK
                )
            });

            self.PORTC.portc().write(|w| {
                w.bits(
                    pin_low(0) | // heater switch, active high
                    pin_pullup(1) | // NC
                    pin_pullup(2) | // JTAG TCK
                    pin_pullup(3) | // JTAG TMS
                    pin_pullup(4) | // JTAG TDO
                    pin_pullup(5) | // JTAG TDI
                    pin_pullup(6) | // NC
                    pin_pullup(7), // NC
                )
            });
            self.PORTC.ddrc().write(|w| {
                w.bits(
                    pin_output(0) | // heater switch, active high
                    pin_input(1) | // NC
                    pin_input(2) | // JTAG TCK
                    pin_input(3) | // JTAG TMS
                    pin_input(4) | // JTAG TDO
                    pin_input(5) | // JTAG TDI
                    pin_input(6) | // NC
                    pin_input(7), // NC
                )
            });

            self.PORTD.portd().write(|w| {
                w.bits(
                    pin_low(0) | // LCD RS
                    pin_low(1) | // LCD E
                    pin_pullup(2) | // mode button, INT0, active low
                    pin_pullup(3) | // hysteresis button, INT1, active low
                    pin_low(4) | // LCD D4
                    pin_low(5) | // LCD D5
                    pin_low(6) | // LCD D6
                    pin_low(7), // LCD D7
                )
            });
            self.PORTD.ddrd().write(|w| {
                w.bits(
                    pin_output(0) | // LCD RS
                    pin_output(1) | // LCD E
                    pin_input(2) | // mode button, INT0, active low
                    pin_input(3) | // hysteresis button, INT1, active low
                    pin_output(4) | // LCD D4
                    pin_output(5) | // LCD D5
                    pin_output(6) | // LCD D6
                    pin_output(7), // LCD D7
                )
            });
        }
    }

    /// Drive the heater switch.
    ///
    /// Read-modify-write of PORTC.
    /// Callers in main context must run this with interrupts disabled.
    #[inline(always)]
    fn write_heater(&self, on: bool) {
        // SAFETY: PC0 is an output. The other PORTC bits keep their value.
        self.PORTC.portc().modify(|r, w| unsafe {
            if on {
                w.bits(r.bits() | pin_high(HEATER_BIT))
            } else {
                w.bits(r.bits() & !pin_high(HEATER_BIT))
            }
        });
    }

    #[inline(always)]
    pub fn set_heater(&self, _m: &MainCtx<'_>, on: bool) {
        self.write_heater(on);
    }

    #[inline(always)]
    pub fn set_heater_irq(&self, _c: &IrqCtx<'_>, on: bool) {
        self.write_heater(on);
    }

    /// Force the cooler output low while the PWM is disconnected.
    pub fn cooler_low(&self, _m: &MainCtx<'_>) {
        // SAFETY: PB6 is an output. The other PORTB bits keep their value.
        self.PORTB
            .portb()
            .modify(|r, w| unsafe { w.bits(r.bits() & !pin_high(COOLER_BIT)) });
    }

    #[cfg(feature = "debug")]
    pub fn toggle_debug(&self, _m: &MainCtx<'_>) {
        // SAFETY: Writing a one to PINx toggles the output latch.
        self.PORTA
            .pina()
            .write(|w| unsafe { w.bits(pin_high(DEBUG_BIT)) });
    }

    /// Buttons are active low.
    pub fn mode_button(&self, _m: &MainCtx<'_>) -> bool {
        self.PORTD.pind().read().bits() & pin_high(BTN_MODE_BIT) == 0
    }

    pub fn hysteresis_button(&self, _m: &MainCtx<'_>) -> bool {
        self.PORTD.pind().read().bits() & pin_high(BTN_HYST_BIT) == 0
    }

    pub fn off_button(&self, _m: &MainCtx<'_>) -> bool {
        self.PORTB.pinb().read().bits() & pin_high(BTN_OFF_BIT) == 0
    }

    /// Put the LCD bus levels onto PORTD.
    ///
    /// `rs`, `e` and the upper data nibble. PD2 and PD3 keep their pull-ups.
    pub fn lcd_bus(&self, _m: &MainCtx<'_>, rs: bool, e: bool, nibble: u8) {
        let value = (rs as u8)
            | ((e as u8) << 1)
            | pin_pullup(BTN_MODE_BIT)
            | pin_pullup(BTN_HYST_BIT)
            | ((nibble & 0x0F) << 4);
        // SAFETY: All PORTD outputs belong to the LCD. The inputs keep their pull-ups.
        self.PORTD.portd().write(|w| unsafe { w.bits(value) });
    }
}

// vim: ts=4 sw=4 expandtab
