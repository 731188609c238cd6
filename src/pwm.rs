// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cooler PWM duty conversions.
//!
//! The cooler mode itself passes the raw control sample through unchanged.
//! These helpers are for callers working in physical units.
//! They round half up and clamp to the 10 bit range.

/// Maximum 10 bit PWM duty.
pub const DUTY_MAX: u16 = 0x3FF;

fn scale(value: f32, min: f32, max: f32) -> u16 {
    let tmp = (value - min) * DUTY_MAX as f32 / (max - min);
    // Float to int casts saturate. Negative values end up at 0.
    ((tmp + 0.5) as u16).min(DUTY_MAX)
}

/// 0..100 percent to duty.
pub fn duty_from_percent(percent: f32) -> u16 {
    scale(percent, 0.0, 100.0)
}

/// 0..5 volts to duty.
pub fn duty_from_voltage(volts: f32) -> u16 {
    scale(volts, 0.0, 5.0)
}

/// Linear map of `min..max` to duty.
pub fn duty_from_range(value: f32, min: f32, max: f32) -> u16 {
    scale(value, min, max)
}


// vim: ts=4 sw=4 expandtab
