// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::sensor::Celsius;

/// Thermostat operating mode.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[repr(u8)]
pub enum Mode {
    #[default]
    Off = 0,
    Heat,
    Cool,
    AutoCool,
}

impl Mode {
    /// Cycle forward: Off -> Heat -> Cool -> AutoCool -> Off.
    pub const fn next(&self) -> Self {
        match self {
            Mode::Off => Mode::Heat,
            Mode::Heat => Mode::Cool,
            Mode::Cool => Mode::AutoCool,
            Mode::AutoCool => Mode::Off,
        }
    }

    /// Display name, padded to the mode field width.
    pub const fn label(&self) -> &'static str {
        match self {
            Mode::Off => "OFF       ",
            Mode::Heat => "HEAT      ",
            Mode::Cool => "COOL      ",
            Mode::AutoCool => "AUTO COOL ",
        }
    }
}

/// Hysteresis band selection of the auto-cool mode.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[repr(u8)]
pub enum Hysteresis {
    #[default]
    Hs0 = 0,
    Hs1,
    Hs2,
    Hs3,
}

impl Hysteresis {
    pub const fn next(&self) -> Self {
        match self {
            Hysteresis::Hs0 => Hysteresis::Hs1,
            Hysteresis::Hs1 => Hysteresis::Hs2,
            Hysteresis::Hs2 => Hysteresis::Hs3,
            Hysteresis::Hs3 => Hysteresis::Hs0,
        }
    }

    pub const fn level(&self) -> u8 {
        *self as u8
    }

    /// Width of the band below the setpoint.
    /// One degree per level.
    pub fn width(&self) -> Celsius {
        Celsius(self.level() as f32)
    }
}


// vim: ts=4 sw=4 expandtab
