// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::hw::mcu;
use avr_context::{InitCtx, InitCtxCell, MainCtx};
use tempcontrol::AdcChannel;

#[allow(non_snake_case)]
pub struct Adc {
    pub ADC: mcu::ADC,
}

// SAFETY: Is initialized when constructing the MainCtx.
pub static ADC: InitCtxCell<Adc> = unsafe { InitCtxCell::uninit() };

const ADMUX_REFS_AVCC: u8 = 1 << 6;
const ADCSRA_ADEN: u8 = 1 << 7;
const ADCSRA_ADSC: u8 = 1 << 6;
const ADCSRA_ADIF: u8 = 1 << 4;
const ADCSRA_ADPS_128: u8 = 0x07;

impl Adc {
    pub fn setup(&self, _: &InitCtx) {
        // SAFETY: Called with interrupts disabled. Ensured by &InitCtx.
        unsafe {
            // Disable the digital input buffers of the analog pins.
            self.ADC.didr0().write(|w| w.bits(0x07));
            self.ADC.adcsrb().write(|w| w.bits(0));
            self.ADC.admux().write(|w| w.bits(ADMUX_REFS_AVCC));
            // 125 kHz ADC clock.
            self.ADC
                .adcsra()
                .write(|w| w.bits(ADCSRA_ADEN | ADCSRA_ADIF | ADCSRA_ADPS_128));
        }
    }

    #[inline]
    fn select(&self, _m: &MainCtx<'_>, chan: AdcChannel) {
        // SAFETY: AVCC reference, single ended input of the channel.
        self.ADC
            .admux()
            .write(|w| unsafe { w.bits(ADMUX_REFS_AVCC | chan.index()) });
    }

    #[inline]
    fn start_conversion(&self, _m: &MainCtx<'_>) {
        // SAFETY: Clear the stale completion flag and start.
        self.ADC.adcsra().write(|w| unsafe {
            w.bits(ADCSRA_ADEN | ADCSRA_ADSC | ADCSRA_ADIF | ADCSRA_ADPS_128)
        });
    }

    #[inline]
    fn conversion_done(&self, _m: &MainCtx<'_>) -> bool {
        self.ADC.adcsra().read().bits() & ADCSRA_ADSC == 0
    }

    /// Blocking single conversion.
    pub fn sample(&self, m: &MainCtx<'_>, chan: AdcChannel) -> u16 {
        self.select(m, chan);
        self.start_conversion(m);
        while !self.conversion_done(m) {}
        self.ADC.adc().read().bits()
    }
}

// vim: ts=4 sw=4 expandtab
