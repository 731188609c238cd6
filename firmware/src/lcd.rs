// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HD44780 compatible 20x4 character LCD on a 4 bit bus.
//!
//! Write only. The busy flag is never read. Fixed delays cover the command timings.

use crate::{
    hw::nop3,
    ports::PORTS,
    timer::{TIMER, delay_us},
};
use avr_context::MainCtx;
use tempcontrol::status::{LINE_LEN, NR_LINES};

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_INC: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNC_4BIT_2LINE: u8 = 0x28;
const CMD_DDRAM: u8 = 0x80;

/// DDRAM address of the first column of each row.
const ROW_ADDR: [u8; NR_LINES] = [0x00, 0x40, 0x14, 0x54];

fn write_nibble(m: &MainCtx<'_>, rs: bool, nibble: u8) {
    PORTS.lcd_bus(m, rs, false, nibble);
    nop3();
    PORTS.lcd_bus(m, rs, true, nibble);
    // E pulse width >= 450 ns.
    nop3();
    nop3();
    nop3();
    PORTS.lcd_bus(m, rs, false, nibble);
}

fn write_byte(m: &MainCtx<'_>, rs: bool, data: u8) {
    write_nibble(m, rs, data >> 4);
    write_nibble(m, rs, data & 0x0F);
    delay_us(50);
}

fn command(m: &MainCtx<'_>, cmd: u8) {
    write_byte(m, false, cmd);
}

/// Power-on initialization sequence.
pub fn lcd_init(m: &MainCtx<'_>) {
    TIMER.delay_ms(m, 50);

    // Force 8 bit mode first. The controller may be in any nibble phase.
    write_nibble(m, false, 0x3);
    TIMER.delay_ms(m, 5);
    write_nibble(m, false, 0x3);
    delay_us(150);
    write_nibble(m, false, 0x3);
    delay_us(150);
    write_nibble(m, false, 0x2);
    delay_us(150);

    command(m, CMD_FUNC_4BIT_2LINE);
    command(m, CMD_DISPLAY_ON);
    command(m, CMD_CLEAR);
    TIMER.delay_ms(m, 2);
    command(m, CMD_ENTRY_INC);
}

/// Write one full line. `row` is 1 based.
///
/// Short texts are padded with blanks. Excess characters are dropped.
pub fn lcd_line(m: &MainCtx<'_>, row: u8, text: &str) {
    let Some(&addr) = ROW_ADDR.get((row as usize).wrapping_sub(1)) else {
        return;
    };
    command(m, CMD_DDRAM | addr);

    let mut bytes = text.bytes();
    for _ in 0..LINE_LEN {
        write_byte(m, true, bytes.next().unwrap_or(b' '));
    }
}

// vim: ts=4 sw=4 expandtab
