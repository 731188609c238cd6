// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    board::{Analog, Board, Cooler, HeaterTimer},
    event::{Event, debounce, wait_release},
    heater::{heater_start, heater_stop},
    mode::{Hysteresis, Mode},
    sensor::{Celsius, Measurement, SensorSample},
    status::Status,
};

/// Pacing delay at the end of each main loop iteration.
pub const LOOP_DELAY_MS: u16 = 50;

/// Last commanded actuator state.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct ActuatorState {
    pub heater_on: bool,
    pub cooler_on: bool,
}

/// What the mode policy commands for one loop iteration.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Action {
    /// Everything off.
    Off,
    /// Pulse the heater, cooler off.
    Heat,
    /// Run the cooler, heater off.
    Cool,
    /// Auto-cool inside of the hysteresis band.
    /// Everything off. Mode and actuator flags are kept.
    Standby,
}

/// Auto-cool policy.
///
/// Any temperature above the setpoint cools, regardless of the hysteresis.
/// Heating starts below the band `setpoint - width ..= setpoint`.
pub fn auto_cool_action(m: &Measurement, hysteresis: Hysteresis) -> Action {
    let cool_error = m.temperature - m.setpoint;
    if cool_error > Celsius(0.0) {
        Action::Cool
    } else if m.temperature < m.setpoint - hysteresis.width() {
        Action::Heat
    } else {
        Action::Standby
    }
}

/// The thermostat control loop state.
#[derive(Clone, Debug)]
pub struct Thermostat {
    mode: Mode,
    hysteresis: Hysteresis,
    sample: SensorSample,
    measurement: Measurement,
    actuators: ActuatorState,
}

impl Default for Thermostat {
    fn default() -> Self {
        Self::new()
    }
}

impl Thermostat {
    pub const fn new() -> Self {
        Self {
            mode: Mode::Off,
            hysteresis: Hysteresis::Hs0,
            sample: SensorSample {
                setpoint: 0,
                control: 0,
                temperature: 0,
            },
            measurement: Measurement {
                setpoint: Celsius(0.0),
                temperature: Celsius(0.0),
                control: 0.0,
            },
            actuators: ActuatorState {
                heater_on: false,
                cooler_on: false,
            },
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn hysteresis(&self) -> Hysteresis {
        self.hysteresis
    }

    pub fn sample(&self) -> &SensorSample {
        &self.sample
    }

    pub fn measurement(&self) -> &Measurement {
        &self.measurement
    }

    pub fn actuators(&self) -> ActuatorState {
        self.actuators
    }

    pub fn status(&self) -> Status {
        Status {
            measurement: self.measurement,
            hysteresis: self.hysteresis,
            mode: self.mode,
            actuators: self.actuators,
        }
    }

    /// Apply a confirmed button event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::ModeChange => self.mode = self.mode.next(),
            Event::HysteresisChange => self.hysteresis = self.hysteresis.next(),
            Event::OffRequest => self.mode = Mode::Off,
        }
    }

    /// Read all analog inputs and update the derived values.
    pub fn sense<A: Analog + ?Sized>(&mut self, adc: &mut A) {
        self.sample = SensorSample::read(adc);
        self.measurement = self.sample.derive();
    }

    /// Service all pending button events.
    pub fn process_events<B: Board + ?Sized>(&mut self, board: &mut B) {
        for event in Event::ALL {
            if debounce(board, event) {
                self.handle_event(event);
                wait_release(board, event);
            }
        }
    }

    /// The action the current mode asks for.
    pub fn action(&self) -> Action {
        match self.mode {
            Mode::Off => Action::Off,
            Mode::Heat => Action::Heat,
            Mode::Cool => Action::Cool,
            Mode::AutoCool => auto_cool_action(&self.measurement, self.hysteresis),
        }
    }

    /// Drive the actuators according to the current mode.
    pub fn execute<B: Cooler + HeaterTimer + ?Sized>(&mut self, board: &mut B) -> Action {
        let action = self.action();
        match action {
            Action::Off => {
                self.actuators = ActuatorState {
                    heater_on: false,
                    cooler_on: false,
                };
                heater_stop(board);
                board.cooler_disable();
            }
            Action::Standby => {
                // Both drives stop. The flags keep the last commanded action.
                heater_stop(board);
                board.cooler_disable();
            }
            Action::Heat => {
                self.actuators = ActuatorState {
                    heater_on: true,
                    cooler_on: false,
                };
                board.cooler_disable();
                heater_start(board, self.sample.control);
            }
            Action::Cool => {
                self.actuators = ActuatorState {
                    heater_on: false,
                    cooler_on: true,
                };
                heater_stop(board);
                board.cooler_enable();
                // Raw pass through. The heater scales the same input by 64.
                board.set_cooler_duty(self.sample.control);
            }
        }
        action
    }

    /// Run one main loop iteration.
    pub fn run<B: Board + ?Sized>(&mut self, board: &mut B) -> Action {
        board.watchdog_refresh();
        self.sense(board);
        self.process_events(board);
        self.status().render(board);
        let action = self.execute(board);
        board.delay_ms(LOOP_DELAY_MS);
        action
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        board::Button,
        event::{RELEASE_SETTLE_MS, SETTLE_MS},
        mock::MockBoard,
    };

    fn meas(t: f32, sp: f32) -> Measurement {
        Measurement {
            setpoint: Celsius(sp),
            temperature: Celsius(t),
            control: 0.0,
        }
    }

    fn auto_cool(t: f32, sp: f32, hs: Hysteresis) -> Thermostat {
        let mut th = Thermostat::new();
        th.mode = Mode::AutoCool;
        th.hysteresis = hs;
        th.measurement = meas(t, sp);
        th
    }

    #[test]
    fn test_initial_state() {
        let th = Thermostat::default();
        assert_eq!(th.mode(), Mode::Off);
        assert_eq!(th.hysteresis(), Hysteresis::Hs0);
        assert_eq!(th.actuators(), ActuatorState::default());
        assert_eq!(th.action(), Action::Off);
    }

    #[test]
    fn test_auto_cool_policy() {
        assert_eq!(auto_cool_action(&meas(25.0, 20.0), Hysteresis::Hs2), Action::Cool);
        assert_eq!(auto_cool_action(&meas(17.0, 20.0), Hysteresis::Hs2), Action::Heat);
        assert_eq!(auto_cool_action(&meas(19.0, 20.0), Hysteresis::Hs2), Action::Standby);
        // Band edges.
        assert_eq!(auto_cool_action(&meas(20.0, 20.0), Hysteresis::Hs2), Action::Standby);
        assert_eq!(auto_cool_action(&meas(18.0, 20.0), Hysteresis::Hs2), Action::Standby);
        assert_eq!(auto_cool_action(&meas(20.5, 20.0), Hysteresis::Hs3), Action::Cool);
        // No band at level 0.
        assert_eq!(auto_cool_action(&meas(19.9, 20.0), Hysteresis::Hs0), Action::Heat);
        assert_eq!(auto_cool_action(&meas(20.0, 20.0), Hysteresis::Hs0), Action::Standby);
    }

    #[test]
    fn test_auto_cool_above_setpoint() {
        let mut b = MockBoard::new();
        b.set_adc(0, 300, 0);
        let mut th = auto_cool(25.0, 20.0, Hysteresis::Hs2);
        th.sample.control = 300;
        assert_eq!(th.execute(&mut b), Action::Cool);
        assert_eq!(
            th.actuators(),
            ActuatorState {
                heater_on: false,
                cooler_on: true,
            }
        );
        assert!(b.cooler_enabled);
        assert_eq!(b.cooler_duty, 300);
        assert!(!b.heater_irqs);
        assert!(!b.heater_output);
        assert_eq!(th.mode(), Mode::AutoCool);
    }

    #[test]
    fn test_auto_cool_below_band() {
        let mut b = MockBoard::new();
        let mut th = auto_cool(17.0, 20.0, Hysteresis::Hs2);
        th.sample.control = 100;
        assert_eq!(th.execute(&mut b), Action::Heat);
        assert_eq!(
            th.actuators(),
            ActuatorState {
                heater_on: true,
                cooler_on: false,
            }
        );
        assert!(b.heater_irqs);
        assert_eq!(b.heater_compare, Some(6400));
        assert!(!b.cooler_enabled);
        assert_eq!(th.mode(), Mode::AutoCool);
    }

    #[test]
    fn test_auto_cool_in_band() {
        let mut b = MockBoard::new();
        let mut th = auto_cool(17.0, 20.0, Hysteresis::Hs2);
        th.sample.control = 100;
        th.execute(&mut b);
        b.heater_output = true;

        th.measurement = meas(19.0, 20.0);
        assert_eq!(th.execute(&mut b), Action::Standby);
        assert_eq!(
            th.actuators(),
            ActuatorState {
                heater_on: true,
                cooler_on: false,
            }
        );
        assert!(!b.heater_irqs);
        assert!(!b.heater_output);
        assert!(!b.cooler_enabled);
        assert_eq!(th.mode(), Mode::AutoCool);
    }

    #[test]
    fn test_heat() {
        let mut b = MockBoard::new();
        b.set_adc(0, 100, 0);
        let mut th = Thermostat::new();
        th.handle_event(Event::ModeChange);
        assert_eq!(th.mode(), Mode::Heat);
        th.sense(&mut b);
        assert_eq!(th.execute(&mut b), Action::Heat);
        assert_eq!(b.heater_compare, Some(6400));
        assert!(b.heater_irqs);
        assert!(!b.cooler_enabled);
        assert!(th.actuators().heater_on);
        assert!(!th.actuators().cooler_on);
    }

    #[test]
    fn test_cool_raw_duty() {
        let mut b = MockBoard::new();
        b.set_adc(0, 777, 0);
        let mut th = Thermostat::new();
        th.mode = Mode::Cool;
        th.sense(&mut b);
        assert_eq!(th.execute(&mut b), Action::Cool);
        assert_eq!(b.cooler_duty, 777);
        assert!(b.cooler_enabled);
        assert!(!b.heater_irqs);
        assert!(!b.heater_output);
        assert_eq!(b.heater_compare, None);
    }

    #[test]
    fn test_off_from_any_mode() {
        for mode in [Mode::Off, Mode::Heat, Mode::Cool, Mode::AutoCool] {
            let mut b = MockBoard::new();
            b.set_adc(0, 500, 0);
            let mut th = Thermostat::new();
            th.mode = mode;
            th.sense(&mut b);
            th.execute(&mut b);
            b.heater_output = true;

            th.handle_event(Event::OffRequest);
            assert_eq!(th.mode(), Mode::Off);
            assert_eq!(th.execute(&mut b), Action::Off);
            assert_eq!(th.actuators(), ActuatorState::default());
            assert!(!b.heater_irqs);
            assert!(!b.heater_output);
            assert!(!b.cooler_enabled);
        }
    }

    #[test]
    fn test_mode_button_cycle() {
        let mut b = MockBoard::new();
        let mut th = Thermostat::new();
        let expected = [Mode::Heat, Mode::Cool, Mode::AutoCool, Mode::Off, Mode::Heat];
        for exp in expected {
            b.press(Button::Mode, 3);
            th.process_events(&mut b);
            assert_eq!(th.mode(), exp);
        }
        assert_eq!(th.hysteresis(), Hysteresis::Hs0);
    }

    #[test]
    fn test_hysteresis_button_cycle() {
        let mut b = MockBoard::new();
        let mut th = Thermostat::new();
        for exp in [1, 2, 3, 0] {
            b.press(Button::Hysteresis, 1);
            th.process_events(&mut b);
            assert_eq!(th.hysteresis().level(), exp);
        }
        assert_eq!(th.mode(), Mode::Off);
    }

    #[test]
    fn test_off_button() {
        let mut b = MockBoard::new();
        let mut th = Thermostat::new();
        th.mode = Mode::Cool;
        b.press(Button::Off, 2);
        th.process_events(&mut b);
        assert_eq!(th.mode(), Mode::Off);
    }

    #[test]
    fn test_bounce_is_noop() {
        let mut b = MockBoard::new();
        let mut th = Thermostat::new();
        th.mode = Mode::Heat;
        b.press(Button::Mode, 0);
        b.press(Button::Off, 0);
        th.process_events(&mut b);
        assert_eq!(th.mode(), Mode::Heat);
        assert_eq!(b.delays, [SETTLE_MS, SETTLE_MS]);
    }

    #[test]
    fn test_events_in_order() {
        let mut b = MockBoard::new();
        let mut th = Thermostat::new();
        b.press(Button::Mode, 1);
        b.press(Button::Hysteresis, 1);
        b.press(Button::Off, 1);
        th.process_events(&mut b);
        assert_eq!(th.mode(), Mode::Off);
        assert_eq!(th.hysteresis(), Hysteresis::Hs1);
        assert_eq!(
            b.delays,
            [
                SETTLE_MS,
                RELEASE_SETTLE_MS,
                SETTLE_MS,
                RELEASE_SETTLE_MS,
                SETTLE_MS,
                RELEASE_SETTLE_MS,
            ]
        );
    }

    #[test]
    fn test_run_iteration() {
        let mut b = MockBoard::new();
        // Setpoint 50 %, control 100, temperature 0.
        b.set_adc(1023 / 2, 100, 0);
        let mut th = Thermostat::new();

        assert_eq!(th.run(&mut b), Action::Off);
        assert_eq!(b.watchdog, 1);
        assert_eq!(b.delays, [LOOP_DELAY_MS]);
        assert_eq!(b.lines[3], "MD: OFF       ");
        assert_eq!(b.lines[1], "SP:50.0C   N N");

        // The mode button takes effect in the same iteration.
        b.delays.clear();
        b.press(Button::Mode, 1);
        assert_eq!(th.run(&mut b), Action::Heat);
        assert_eq!(b.delays, [SETTLE_MS, RELEASE_SETTLE_MS, LOOP_DELAY_MS]);
        assert_eq!(b.lines[3], "MD: HEAT      ");
        assert_eq!(b.heater_compare, Some(6400));
        // The display is rendered before the action is executed.
        assert_eq!(b.lines[1], "SP:50.0C   N N");

        assert_eq!(th.run(&mut b), Action::Heat);
        assert_eq!(b.lines[1], "SP:50.0C   Y N");
    }

    #[test]
    fn test_run_auto_cool_from_sensors() {
        let mut b = MockBoard::new();
        // Setpoint 0.4 * 1023 -> 40 %.
        // Temperature 0.1 * 1023 -> 50 degrees.
        b.set_adc(409, 200, 102);
        let mut th = Thermostat::new();
        th.mode = Mode::AutoCool;
        assert_eq!(th.run(&mut b), Action::Cool);
        assert_eq!(b.cooler_duty, 200);

        // Temperature well below the setpoint.
        b.set_adc(409, 200, 20);
        assert_eq!(th.run(&mut b), Action::Heat);
        assert_eq!(b.heater_compare, Some(200 * 64));
    }

    #[test]
    fn test_run_in_band_keeps_flags() {
        let mut b = MockBoard::new();
        // Setpoint 40 %, temperature 20 degrees.
        b.set_adc(409, 100, 41);
        let mut th = Thermostat::new();
        th.mode = Mode::AutoCool;
        assert_eq!(th.run(&mut b), Action::Heat);
        assert!(th.actuators().heater_on);

        th.handle_event(Event::HysteresisChange);
        th.handle_event(Event::HysteresisChange);
        assert_eq!(th.hysteresis(), Hysteresis::Hs2);
        // 39.6 degrees is inside of the band 38.0 ..= 40.0.
        b.set_adc(409, 100, 81);
        assert_eq!(th.run(&mut b), Action::Standby);
        assert_eq!(
            th.actuators(),
            ActuatorState {
                heater_on: true,
                cooler_on: false,
            }
        );
        assert!(!b.heater_irqs);
        assert!(!b.heater_output);
        assert!(!b.cooler_enabled);

        // The display still shows the last commanded action.
        assert_eq!(th.run(&mut b), Action::Standby);
        assert_eq!(b.lines[1], "SP:40.0C   Y N");
    }
}

// vim: ts=4 sw=4 expandtab
