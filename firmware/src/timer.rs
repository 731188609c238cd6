// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::hw::{mcu, nop3};
use avr_context::{InitCtx, InitCtxCell, MainCtx, MainCtxCell};

#[allow(non_snake_case)]
pub struct Timer {
    pub TC0: mcu::TC0,
}

// SAFETY: Is initialized when constructing the MainCtx.
pub static TIMER: InitCtxCell<Timer> = unsafe { InitCtxCell::uninit() };

static TIMER_UPPER: MainCtxCell<u8> = MainCtxCell::new(0);

pub const TIMER_TICK_US: u8 = 64; // 64 us per tick.

impl Timer {
    #[rustfmt::skip]
    pub fn setup(&self, _: &InitCtx) {
        // Timer 0 configuration:
        // Normal mode, no interrupts.
        // CS: 1024 -> 64 us per timer tick.
        // SAFETY: Called with interrupts disabled. Ensured by &InitCtx.
        unsafe {
            self.TC0.tccr0a().write(|w| w.bits(0));
            self.TC0.timsk0().write(|w| w.bits(0));
            self.TC0.tcnt0().write(|w| w.bits(0));
            self.TC0.tifr0().write(|w| w.bits(0x07)); // clear all flags
            self.TC0.tccr0b().write(|w| w.bits(0x05)); // CS02 | CS00
        }
    }

    /// Read the extended 16 bit time.
    ///
    /// Must be called at least once per 8 bit timer overflow (16 ms).
    #[inline(never)]
    pub fn now(&self, m: &MainCtx<'_>) -> Timestamp {
        let mut upper = TIMER_UPPER.get(m);
        let mut lower = self.TC0.tcnt0().read().bits();

        // Increment the upper part, if the lower part had an overflow.
        if self.TC0.tifr0().read().bits() & 0x01 != 0 {
            // SAFETY: Writing a one clears TOV0. The other flags are not used.
            self.TC0.tifr0().write(|w| unsafe { w.bits(0x01) });
            lower = self.TC0.tcnt0().read().bits();
            upper = upper.wrapping_add(1);
            TIMER_UPPER.set(m, upper);
        }

        Timestamp(((upper as u16) << 8) | lower as u16)
    }

    /// Busy wait with watchdog refresh.
    pub fn delay_ms(&self, m: &MainCtx<'_>, ms: u16) {
        let end = self.now(m) + RelTimestamp::from_millis(ms);
        while self.now(m) < end {
            avr_device::asm::wdr();
        }
    }
}

/// Busy wait for short bus timings. Approximate.
#[inline(never)]
pub fn delay_us(us: u16) {
    for _ in 0..us {
        // 16 cycles per microsecond.
        nop3();
        nop3();
        nop3();
        nop3();
    }
}

/// Wrapping 16 bit time stamp in timer ticks.
#[derive(PartialEq, Eq, Copy, Clone, Default)]
pub struct Timestamp(pub u16);

/// Signed distance between two [Timestamp]s.
#[derive(PartialEq, Eq, Copy, Clone, Default, PartialOrd, Ord)]
pub struct RelTimestamp(pub i16);

impl RelTimestamp {
    /// Saturates at the largest representable distance (2 s).
    #[inline]
    pub const fn from_millis(ms: u16) -> Self {
        let ticks = (ms as u32 * 1000) / TIMER_TICK_US as u32;
        if ticks > i16::MAX as u32 {
            Self(i16::MAX)
        } else {
            Self(ticks as i16)
        }
    }
}

impl Ord for Timestamp {
    #[inline]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        (self.0.wrapping_sub(other.0) as i16).cmp(&0)
    }
}

impl PartialOrd for Timestamp {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl core::ops::Add<RelTimestamp> for Timestamp {
    type Output = Self;

    #[inline]
    fn add(self, other: RelTimestamp) -> Self::Output {
        Self(self.0.wrapping_add(other.0 as u16))
    }
}

impl core::ops::Sub for Timestamp {
    type Output = RelTimestamp;

    #[inline]
    fn sub(self, other: Self) -> Self::Output {
        RelTimestamp(self.0.wrapping_sub(other.0) as i16)
    }
}

// vim: ts=4 sw=4 expandtab
