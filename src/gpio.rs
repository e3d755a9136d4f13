// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! General purpose input/output (GPIO) port A.
//!
//! Pin mode and alternate function programming for the SPI pin group, plus
//! direct output control for the software driven chip select line.

use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::registers::{ReadOnly, ReadWrite, WriteOnly};
use tock_registers::{register_bitfields, register_structs};

use crate::rcc::{ClockInterface, PeripheralClock, RccRegisterFile};
use crate::static_ref::StaticRef;

register_structs! {
    /// General-purpose I/Os
    pub GpioRegisters {
        /// GPIO port mode register
        (0x00 => moder: ReadWrite<u32, MODER::Register>),
        /// GPIO port output type register
        (0x04 => otyper: ReadWrite<u32>),
        /// GPIO port output speed register
        (0x08 => ospeedr: ReadWrite<u32>),
        /// GPIO port pull-up/pull-down register
        (0x0C => pupdr: ReadWrite<u32>),
        /// GPIO port input data register
        (0x10 => idr: ReadOnly<u32>),
        /// GPIO port output data register
        (0x14 => odr: ReadWrite<u32, ODR::Register>),
        /// GPIO port bit set/reset register
        (0x18 => bsrr: WriteOnly<u32>),
        /// GPIO port configuration lock register
        (0x1C => lckr: ReadWrite<u32>),
        /// GPIO alternate function low register
        (0x20 => afrl: ReadWrite<u32, AFRL::Register>),
        /// GPIO alternate function high register
        (0x24 => afrh: ReadWrite<u32, AFRH::Register>),
        (0x28 => @END),
    }
}

register_bitfields![u32,
    pub MODER [
        MODER0 OFFSET(0) NUMBITS(2) [],
        MODER1 OFFSET(2) NUMBITS(2) [],
        MODER2 OFFSET(4) NUMBITS(2) [],
        MODER3 OFFSET(6) NUMBITS(2) [],
        MODER4 OFFSET(8) NUMBITS(2) [],
        MODER5 OFFSET(10) NUMBITS(2) [],
        MODER6 OFFSET(12) NUMBITS(2) [],
        MODER7 OFFSET(14) NUMBITS(2) [],
        MODER8 OFFSET(16) NUMBITS(2) [],
        MODER9 OFFSET(18) NUMBITS(2) [],
        MODER10 OFFSET(20) NUMBITS(2) [],
        MODER11 OFFSET(22) NUMBITS(2) [],
        MODER12 OFFSET(24) NUMBITS(2) [],
        MODER13 OFFSET(26) NUMBITS(2) [],
        MODER14 OFFSET(28) NUMBITS(2) [],
        MODER15 OFFSET(30) NUMBITS(2) []
    ],
    pub ODR [
        ODR0 OFFSET(0) NUMBITS(1) [],
        ODR1 OFFSET(1) NUMBITS(1) [],
        ODR2 OFFSET(2) NUMBITS(1) [],
        ODR3 OFFSET(3) NUMBITS(1) [],
        ODR4 OFFSET(4) NUMBITS(1) [],
        ODR5 OFFSET(5) NUMBITS(1) [],
        ODR6 OFFSET(6) NUMBITS(1) [],
        ODR7 OFFSET(7) NUMBITS(1) [],
        ODR8 OFFSET(8) NUMBITS(1) [],
        ODR9 OFFSET(9) NUMBITS(1) [],
        ODR10 OFFSET(10) NUMBITS(1) [],
        ODR11 OFFSET(11) NUMBITS(1) [],
        ODR12 OFFSET(12) NUMBITS(1) [],
        ODR13 OFFSET(13) NUMBITS(1) [],
        ODR14 OFFSET(14) NUMBITS(1) [],
        ODR15 OFFSET(15) NUMBITS(1) []
    ],
    pub AFRL [
        AFRL0 OFFSET(0) NUMBITS(4) [],
        AFRL1 OFFSET(4) NUMBITS(4) [],
        AFRL2 OFFSET(8) NUMBITS(4) [],
        AFRL3 OFFSET(12) NUMBITS(4) [],
        AFRL4 OFFSET(16) NUMBITS(4) [],
        AFRL5 OFFSET(20) NUMBITS(4) [],
        AFRL6 OFFSET(24) NUMBITS(4) [],
        AFRL7 OFFSET(28) NUMBITS(4) []
    ],
    pub AFRH [
        AFRH8 OFFSET(0) NUMBITS(4) [],
        AFRH9 OFFSET(4) NUMBITS(4) [],
        AFRH10 OFFSET(8) NUMBITS(4) [],
        AFRH11 OFFSET(12) NUMBITS(4) [],
        AFRH12 OFFSET(16) NUMBITS(4) [],
        AFRH13 OFFSET(20) NUMBITS(4) [],
        AFRH14 OFFSET(24) NUMBITS(4) [],
        AFRH15 OFFSET(28) NUMBITS(4) []
    ]
];

pub const GPIOA_BASE: StaticRef<GpioRegisters> =
    unsafe { StaticRef::new(0x40020000 as *const GpioRegisters) };

/// The GPIO port registers the pin configuration and output paths touch.
///
/// The memory mapped [`GpioRegisters`] block is the one production
/// implementation. Unit tests substitute an in-memory implementation to
/// observe the exact sequence of bus accesses.
pub trait GpioRegisterFile {
    type Moder: Readable<T = u32, R = MODER::Register> + Writeable<T = u32, R = MODER::Register>;
    type Odr: Readable<T = u32, R = ODR::Register> + Writeable<T = u32, R = ODR::Register>;
    type Afrl: Readable<T = u32, R = AFRL::Register> + Writeable<T = u32, R = AFRL::Register>;
    type Afrh: Readable<T = u32, R = AFRH::Register> + Writeable<T = u32, R = AFRH::Register>;

    fn moder(&self) -> &Self::Moder;
    fn odr(&self) -> &Self::Odr;
    fn afrl(&self) -> &Self::Afrl;
    fn afrh(&self) -> &Self::Afrh;
}

impl GpioRegisterFile for GpioRegisters {
    type Moder = ReadWrite<u32, MODER::Register>;
    type Odr = ReadWrite<u32, ODR::Register>;
    type Afrl = ReadWrite<u32, AFRL::Register>;
    type Afrh = ReadWrite<u32, AFRH::Register>;

    fn moder(&self) -> &Self::Moder {
        &self.moder
    }

    fn odr(&self) -> &Self::Odr {
        &self.odr
    }

    fn afrl(&self) -> &Self::Afrl {
        &self.afrl
    }

    fn afrh(&self) -> &Self::Afrh {
        &self.afrh
    }
}

/// Name of the pin on GPIO port A.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(u8)]
pub enum PinId {
    PA00 = 0,
    PA01 = 1,
    PA02 = 2,
    PA03 = 3,
    PA04 = 4,
    PA05 = 5,
    PA06 = 6,
    PA07 = 7,
    PA08 = 8,
    PA09 = 9,
    PA10 = 10,
    PA11 = 11,
    PA12 = 12,
    PA13 = 13,
    PA14 = 14,
    PA15 = 15,
}

impl PinId {
    pub fn get_pin_number(&self) -> u8 {
        *self as u8
    }
}

/// GPIO pin mode
#[repr(u32)]
pub enum Mode {
    Input = 0b00,
    GeneralPurposeOutputMode = 0b01,
    AlternateFunctionMode = 0b10,
    AnalogMode = 0b11,
}

/// Alternate functions that may be assigned to a pin.
#[repr(u32)]
pub enum AlternateFunction {
    AF0 = 0b0000,
    AF1 = 0b0001,
    AF2 = 0b0010,
    AF3 = 0b0011,
    AF4 = 0b0100,
    AF5 = 0b0101,
    AF6 = 0b0110,
    AF7 = 0b0111,
    AF8 = 0b1000,
    AF9 = 0b1001,
    AF10 = 0b1010,
    AF11 = 0b1011,
    AF12 = 0b1100,
    AF13 = 0b1101,
    AF14 = 0b1110,
    AF15 = 0b1111,
}

/// Handle to one output pin of the port.
///
/// The pin drives the output data register directly, so the output level
/// changes with a single read-modify-write and no other pin of the port is
/// disturbed.
pub struct Pin<'a, G: GpioRegisterFile> {
    registers: &'a G,
    pinid: PinId,
}

impl<'a, G: GpioRegisterFile> Pin<'a, G> {
    pub const fn new(registers: &'a G, pinid: PinId) -> Self {
        Self { registers, pinid }
    }

    /// Drive the pin high.
    pub fn set(&self) {
        let bitfield = match self.pinid.get_pin_number() {
            0 => ODR::ODR0,
            1 => ODR::ODR1,
            2 => ODR::ODR2,
            3 => ODR::ODR3,
            4 => ODR::ODR4,
            5 => ODR::ODR5,
            6 => ODR::ODR6,
            7 => ODR::ODR7,
            8 => ODR::ODR8,
            9 => ODR::ODR9,
            10 => ODR::ODR10,
            11 => ODR::ODR11,
            12 => ODR::ODR12,
            13 => ODR::ODR13,
            14 => ODR::ODR14,
            _ => ODR::ODR15,
        };
        self.registers.odr().modify(bitfield.val(1));
    }

    /// Drive the pin low.
    pub fn clear(&self) {
        let bitfield = match self.pinid.get_pin_number() {
            0 => ODR::ODR0,
            1 => ODR::ODR1,
            2 => ODR::ODR2,
            3 => ODR::ODR3,
            4 => ODR::ODR4,
            5 => ODR::ODR5,
            6 => ODR::ODR6,
            7 => ODR::ODR7,
            8 => ODR::ODR8,
            9 => ODR::ODR9,
            10 => ODR::ODR10,
            11 => ODR::ODR11,
            12 => ODR::ODR12,
            13 => ODR::ODR13,
            14 => ODR::ODR14,
            _ => ODR::ODR15,
        };
        self.registers.odr().modify(bitfield.val(0));
    }
}

pub struct PortClock<'a, R: RccRegisterFile>(pub PeripheralClock<'a, R>);

impl<R: RccRegisterFile> ClockInterface for PortClock<'_, R> {
    fn is_enabled(&self) -> bool {
        self.0.is_enabled()
    }

    fn enable(&self) {
        self.0.enable();
    }

    fn disable(&self) {
        self.0.disable();
    }
}
