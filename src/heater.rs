// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heater timing.
//!
//! The heater is pulsed by a free running 16 bit timer.
//! The overflow interrupt switches the heater on and restarts the timer.
//! The compare match interrupt switches it off again.
//! The resulting duty cycle is `compare / HEATER_TIMER_PERIOD`.

use crate::board::{HeaterSwitch, HeaterTimer};

/// Number of timer ticks in one heater period.
pub const HEATER_TIMER_PERIOD: u32 = 0x1_0000;

/// Scale factor from the 10 bit control sample to the 16 bit compare register.
pub const HEATER_COMPARE_FACT: u16 = 64;

/// Compare register value for a raw control sample.
///
/// The multiplication wraps at 16 bits like the hardware register does.
/// Samples above 0x3FF therefore do not saturate at full duty.
pub const fn compare_target(raw_control: u16) -> u16 {
    raw_control.wrapping_mul(HEATER_COMPARE_FACT)
}

/// Fraction of the heater period with the output on.
pub fn duty(compare: u16) -> f32 {
    compare as f32 / HEATER_TIMER_PERIOD as f32
}

/// Arm the heater timing with a new compare value.
pub fn heater_start<H: HeaterTimer + ?Sized>(hw: &mut H, raw_control: u16) {
    hw.enable_heater_irqs(true);
    hw.set_heater_compare(compare_target(raw_control));
}

/// Disarm the heater timing and force the heater off.
pub fn heater_stop<H: HeaterTimer + ?Sized>(hw: &mut H) {
    // Disable first. An overflow irq must not switch the heater back on.
    hw.enable_heater_irqs(false);
    hw.set_heater_output(false);
}

/// Timer compare match interrupt.
pub fn irq_compare_match<H: HeaterSwitch + ?Sized>(hw: &mut H) {
    hw.set_heater_output(false);
}

/// Timer overflow interrupt.
pub fn irq_overflow<H: HeaterSwitch + ?Sized>(hw: &mut H) {
    hw.set_heater_output(true);
    hw.reset_heater_timer();
}

#[cfg(test)]
mod test {
    use super::*;

    /// Tick accurate model of the timer and its two interrupts.
    struct SimTimer {
        counter: u16,
        compare: u16,
        irqs: bool,
        output: bool,
        on_ticks: u32,
        resets: u32,
    }

    impl SimTimer {
        fn new() -> Self {
            Self {
                counter: 0,
                compare: 0xFFFF,
                irqs: false,
                output: false,
                on_ticks: 0,
                resets: 0,
            }
        }

        fn tick(&mut self) {
            if self.output {
                self.on_ticks += 1;
            }
            self.counter = self.counter.wrapping_add(1);
            if self.irqs {
                if self.counter == 0 {
                    irq_overflow(self);
                } else if self.counter == self.compare {
                    irq_compare_match(self);
                }
            }
        }

        fn run_periods(&mut self, periods: u32) {
            for _ in 0..(periods * HEATER_TIMER_PERIOD) {
                self.tick();
            }
        }
    }

    impl HeaterSwitch for SimTimer {
        fn set_heater_output(&mut self, on: bool) {
            self.output = on;
        }

        fn reset_heater_timer(&mut self) {
            self.counter = 0;
            self.resets += 1;
        }
    }

    impl HeaterTimer for SimTimer {
        fn set_heater_compare(&mut self, compare: u16) {
            self.compare = compare;
        }

        fn enable_heater_irqs(&mut self, enable: bool) {
            self.irqs = enable;
        }
    }

    #[test]
    fn test_compare_target() {
        assert_eq!(compare_target(0), 0);
        assert_eq!(compare_target(100), 6400);
        assert_eq!(compare_target(1023), 65472);
        // Out of range samples wrap.
        assert_eq!(compare_target(1024), 0);
        assert_eq!(compare_target(1025), 64);
    }

    #[test]
    fn test_duty() {
        assert_eq!(duty(6400), 6400.0 / 65536.0);
        assert_eq!(duty(0x8000), 0.5);
    }

    #[test]
    fn test_pulse_train() {
        let mut t = SimTimer::new();
        heater_start(&mut t, 100);
        assert!(t.irqs);
        assert_eq!(t.compare, 6400);

        // Sync to the first overflow.
        t.counter = 0xFFFF;
        t.tick();
        assert!(t.output);
        assert_eq!(t.resets, 1);
        t.on_ticks = 0;

        t.run_periods(2);
        assert_eq!(t.on_ticks, 2 * 6400);
        assert_eq!(t.resets, 3);
        assert_eq!(t.on_ticks as f32 / (2 * HEATER_TIMER_PERIOD) as f32, duty(6400));
    }

    /// The part of the hardware the interrupts are allowed to touch.
    #[derive(Default)]
    struct Switch {
        output: bool,
        resets: u32,
    }

    impl HeaterSwitch for Switch {
        fn set_heater_output(&mut self, on: bool) {
            self.output = on;
        }

        fn reset_heater_timer(&mut self) {
            self.resets += 1;
        }
    }

    #[test]
    fn test_irq_switch_only() {
        let mut s = Switch::default();
        irq_overflow(&mut s);
        assert!(s.output);
        assert_eq!(s.resets, 1);
        irq_compare_match(&mut s);
        assert!(!s.output);
        assert_eq!(s.resets, 1);
    }

    #[test]
    fn test_heater_stop() {
        let mut t = SimTimer::new();
        heater_start(&mut t, 1000);
        t.counter = 0xFFFF;
        t.tick();
        assert!(t.output);

        heater_stop(&mut t);
        assert!(!t.output);
        assert!(!t.irqs);

        t.on_ticks = 0;
        t.run_periods(1);
        assert_eq!(t.on_ticks, 0);
        assert!(!t.output);
    }
}

// vim: ts=4 sw=4 expandtab
