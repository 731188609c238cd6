// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::board::{AdcChannel, Analog};
use derive_more::{Add, AddAssign, Sub, SubAssign};

/// ADC reference voltage.
pub const ADC_UREF: f32 = 5.0; // volts
/// Full scale ADC result.
pub const ADC_MAX: u16 = 0x3FF;

/// Temperature in degrees Celsius.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Add, Sub, AddAssign, SubAssign)]
pub struct Celsius(pub f32);

/// One raw reading of all analog inputs.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct SensorSample {
    pub setpoint: u16,
    pub control: u16,
    pub temperature: u16,
}

impl SensorSample {
    /// Convert all three channels.
    pub fn read<A: Analog + ?Sized>(adc: &mut A) -> Self {
        let [setpoint, control, temperature] = AdcChannel::ALL.map(|chan| adc.sample(chan));
        Self {
            setpoint,
            control,
            temperature,
        }
    }

    pub fn derive(&self) -> Measurement {
        Measurement::from_sample(self)
    }
}

/// Sensor values in engineering units.
///
/// Nothing is clamped. Raw values outside of the 10 bit range
/// give results outside of the nominal range.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Measurement {
    /// Setpoint. The dial spans 0..100 degrees.
    pub setpoint: Celsius,
    /// Room temperature. 10 mV per degree sensor, 0..500 degrees at full scale.
    pub temperature: Celsius,
    /// Control dial in percent.
    pub control: f32,
}

impl Measurement {
    pub fn from_sample(sample: &SensorSample) -> Self {
        Self {
            setpoint: Celsius(adc_to_percent(sample.setpoint)),
            temperature: Celsius(adc_to_volts(sample.temperature) * 100.0),
            control: adc_to_percent(sample.control),
        }
    }
}

/// Convert an ADC result to volts at the ADC pin.
pub fn adc_to_volts(raw: u16) -> f32 {
    (raw as f32 * ADC_UREF) / ADC_MAX as f32
}

/// Convert an ADC result to percent of the reference voltage.
pub fn adc_to_percent(raw: u16) -> f32 {
    (adc_to_volts(raw) / ADC_UREF) * 100.0
}

/// Sample one channel and return the voltage at the pin.
pub fn read_voltage<A: Analog + ?Sized>(adc: &mut A, chan: AdcChannel) -> f32 {
    adc_to_volts(adc.sample(chan))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mock::MockBoard;

    fn approx(a: f32, b: f32) -> bool {
        a - b < 1e-3 && b - a < 1e-3
    }

    #[test]
    fn test_volts_monotonic_and_bounded() {
        let mut prev = adc_to_volts(0);
        assert_eq!(prev, 0.0);
        for raw in 1..=ADC_MAX {
            let v = adc_to_volts(raw);
            assert!(v >= prev);
            assert!((0.0..=5.0).contains(&v));
            prev = v;
        }
        assert!(approx(adc_to_volts(ADC_MAX), 5.0));
    }

    #[test]
    fn test_derive() {
        let sample = SensorSample {
            setpoint: ADC_MAX,
            control: 0,
            temperature: 0,
        };
        let m = sample.derive();
        assert!(approx(m.setpoint.0, 100.0));
        assert_eq!(m.temperature, Celsius(0.0));
        assert_eq!(m.control, 0.0);

        let sample = SensorSample {
            setpoint: 512,
            control: 256,
            temperature: 41,
        };
        let m = sample.derive();
        assert!(approx(m.setpoint.0, 512.0 * 100.0 / 1023.0));
        assert!(approx(m.control, 256.0 * 100.0 / 1023.0));
        // The temperature scale is five times the percent scale.
        assert!(approx(m.temperature.0, 41.0 * 500.0 / 1023.0));
    }

    #[test]
    fn test_derive_not_clamped() {
        let sample = SensorSample {
            setpoint: 2046,
            control: 2046,
            temperature: ADC_MAX,
        };
        let m = sample.derive();
        assert!(approx(m.setpoint.0, 200.0));
        assert!(approx(m.control, 200.0));
        assert!(approx(m.temperature.0, 500.0));
    }

    #[test]
    fn test_read() {
        let mut board = MockBoard::new();
        board.set_adc(100, 200, 300);
        let sample = SensorSample::read(&mut board);
        assert_eq!(
            sample,
            SensorSample {
                setpoint: 100,
                control: 200,
                temperature: 300,
            }
        );
        assert!(approx(
            read_voltage(&mut board, AdcChannel::Temperature),
            300.0 * 5.0 / 1023.0
        ));
    }

    #[test]
    fn test_celsius_arith() {
        let d = Celsius(25.0) - Celsius(20.0);
        assert_eq!(d, Celsius(5.0));
        let mut t = Celsius(1.5);
        t += Celsius(1.0);
        assert_eq!(t, Celsius(2.5));
        assert!(Celsius(17.0) < Celsius(18.0));
    }
}

// vim: ts=4 sw=4 expandtab
