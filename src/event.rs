// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounced button events.
//!
//! The button interrupts only raise a pending flag. The main loop picks the
//! flag up, lets the contact settle and then confirms the press by polling
//! the line. A confirmed press blocks until the button is released again.

use crate::board::{Button, Buttons, Clock};

/// Settle time between the edge and the confirmation poll.
pub const SETTLE_MS: u16 = 30;
/// Settle time after the button has been released.
pub const RELEASE_SETTLE_MS: u16 = 50;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Event {
    ModeChange,
    HysteresisChange,
    OffRequest,
}

impl Event {
    /// All events in service order.
    pub const ALL: [Event; 3] = [Self::ModeChange, Self::HysteresisChange, Self::OffRequest];

    pub const fn button(&self) -> Button {
        match self {
            Event::ModeChange => Button::Mode,
            Event::HysteresisChange => Button::Hysteresis,
            Event::OffRequest => Button::Off,
        }
    }
}

/// Consume the pending flag of `event` and confirm the button press.
///
/// Returns true, if the button is still pressed after the settle time.
/// A bounce that is gone after the settle time is silently dropped.
pub fn debounce<B: Buttons + Clock + ?Sized>(board: &mut B, event: Event) -> bool {
    if !board.take_event(event.button()) {
        return false;
    }
    board.delay_ms(SETTLE_MS);
    board.button_asserted(event.button())
}

/// Block until the button of `event` is released.
pub fn wait_release<B: Buttons + Clock + ?Sized>(board: &mut B, event: Event) {
    while board.button_asserted(event.button()) {
        board.watchdog_refresh();
    }
    board.delay_ms(RELEASE_SETTLE_MS);
}


// vim: ts=4 sw=4 expandtab
