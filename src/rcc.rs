// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Reset and clock control (RCC).
//!
//! Peripheral clock gating for the GPIO port and SPI peripheral used by the
//! SPI master driver. The system clock tree itself is left at its reset
//! defaults, so the peripheral buses run directly from the internal
//! oscillator.

use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::registers::ReadWrite;
use tock_registers::{register_bitfields, register_structs};

use crate::static_ref::StaticRef;

register_structs! {
    /// Reset and clock control
    pub RccRegisters {
        /// clock control register
        (0x00 => cr: ReadWrite<u32>),
        /// PLL configuration register
        (0x04 => pllcfgr: ReadWrite<u32>),
        /// clock configuration register
        (0x08 => cfgr: ReadWrite<u32>),
        /// clock interrupt register
        (0x0C => cir: ReadWrite<u32>),
        /// AHB1 peripheral reset register
        (0x10 => ahb1rstr: ReadWrite<u32>),
        /// AHB2 peripheral reset register
        (0x14 => ahb2rstr: ReadWrite<u32>),
        /// AHB3 peripheral reset register
        (0x18 => ahb3rstr: ReadWrite<u32>),
        (0x1C => _reserved0),
        /// APB1 peripheral reset register
        (0x20 => apb1rstr: ReadWrite<u32>),
        /// APB2 peripheral reset register
        (0x24 => apb2rstr: ReadWrite<u32>),
        (0x28 => _reserved1),
        /// AHB1 peripheral clock enable register
        (0x30 => ahb1enr: ReadWrite<u32, AHB1ENR::Register>),
        /// AHB2 peripheral clock enable register
        (0x34 => ahb2enr: ReadWrite<u32>),
        /// AHB3 peripheral clock enable register
        (0x38 => ahb3enr: ReadWrite<u32>),
        (0x3C => _reserved2),
        /// APB1 peripheral clock enable register
        (0x40 => apb1enr: ReadWrite<u32>),
        /// APB2 peripheral clock enable register
        (0x44 => apb2enr: ReadWrite<u32, APB2ENR::Register>),
        (0x48 => _reserved3),
        /// AHB1 peripheral clock enable in low power mode register
        (0x50 => ahb1lpenr: ReadWrite<u32>),
        /// AHB2 peripheral clock enable in low power mode register
        (0x54 => ahb2lpenr: ReadWrite<u32>),
        /// AHB3 peripheral clock enable in low power mode register
        (0x58 => ahb3lpenr: ReadWrite<u32>),
        (0x5C => _reserved4),
        /// APB1 peripheral clock enable in low power mode register
        (0x60 => apb1lpenr: ReadWrite<u32>),
        /// APB2 peripheral clock enabled in low power mode register
        (0x64 => apb2lpenr: ReadWrite<u32>),
        (0x68 => _reserved5),
        /// Backup domain control register
        (0x70 => bdcr: ReadWrite<u32>),
        /// clock control & status register
        (0x74 => csr: ReadWrite<u32>),
        (0x78 => _reserved6),
        /// spread spectrum clock generation register
        (0x80 => sscgr: ReadWrite<u32>),
        /// PLLI2S configuration register
        (0x84 => plli2scfgr: ReadWrite<u32>),
        /// PLLSAI configuration register
        (0x88 => pllsaicfgr: ReadWrite<u32>),
        /// Dedicated Clock Configuration Register
        (0x8C => dckcfgr: ReadWrite<u32>),
        /// clocks gated enable register
        (0x90 => ckgatenr: ReadWrite<u32>),
        /// dedicated clocks configuration register 2
        (0x94 => dckcfgr2: ReadWrite<u32>),
        (0x98 => @END),
    }
}

register_bitfields![u32,
    pub AHB1ENR [
        /// USB OTG HSULPI clock enable
        OTGHSULPIEN OFFSET(30) NUMBITS(1) [],
        /// USB OTG HS clock enable
        OTGHSEN OFFSET(29) NUMBITS(1) [],
        /// DMA2 clock enable
        DMA2EN OFFSET(22) NUMBITS(1) [],
        /// DMA1 clock enable
        DMA1EN OFFSET(21) NUMBITS(1) [],
        /// Backup SRAM interface clock enable
        BKPSRAMEN OFFSET(18) NUMBITS(1) [],
        /// CRC clock enable
        CRCEN OFFSET(12) NUMBITS(1) [],
        /// IO port H clock enable
        GPIOHEN OFFSET(7) NUMBITS(1) [],
        /// IO port G clock enable
        GPIOGEN OFFSET(6) NUMBITS(1) [],
        /// IO port F clock enable
        GPIOFEN OFFSET(5) NUMBITS(1) [],
        /// IO port E clock enable
        GPIOEEN OFFSET(4) NUMBITS(1) [],
        /// IO port D clock enable
        GPIODEN OFFSET(3) NUMBITS(1) [],
        /// IO port C clock enable
        GPIOCEN OFFSET(2) NUMBITS(1) [],
        /// IO port B clock enable
        GPIOBEN OFFSET(1) NUMBITS(1) [],
        /// IO port A clock enable
        GPIOAEN OFFSET(0) NUMBITS(1) []
    ],
    pub APB2ENR [
        /// TIM1 clock enable
        TIM1EN OFFSET(0) NUMBITS(1) [],
        /// TIM8 clock enable
        TIM8EN OFFSET(1) NUMBITS(1) [],
        /// USART1 clock enable
        USART1EN OFFSET(4) NUMBITS(1) [],
        /// USART6 clock enable
        USART6EN OFFSET(5) NUMBITS(1) [],
        /// ADC1 clock enable
        ADC1EN OFFSET(8) NUMBITS(1) [],
        /// ADC2 clock enable
        ADC2EN OFFSET(9) NUMBITS(1) [],
        /// ADC3 clock enable
        ADC3EN OFFSET(10) NUMBITS(1) [],
        /// SDIO clock enable
        SDIOEN OFFSET(11) NUMBITS(1) [],
        /// SPI1 clock enable
        SPI1EN OFFSET(12) NUMBITS(1) [],
        /// SPI4 clock enable
        SPI4EN OFFSET(13) NUMBITS(1) [],
        /// System configuration controller clock enable
        SYSCFGEN OFFSET(14) NUMBITS(1) [],
        /// TIM9 clock enable
        TIM9EN OFFSET(16) NUMBITS(1) [],
        /// TIM10 clock enable
        TIM10EN OFFSET(17) NUMBITS(1) [],
        /// TIM11 clock enable
        TIM11EN OFFSET(18) NUMBITS(1) [],
        /// SAI1 clock enable
        SAI1EN OFFSET(22) NUMBITS(1) [],
        /// SAI2 clock enable
        SAI2EN OFFSET(23) NUMBITS(1) []
    ]
];

pub const RCC_BASE: StaticRef<RccRegisters> =
    unsafe { StaticRef::new(0x40023800 as *const RccRegisters) };

/// The RCC registers the clock gate paths touch.
///
/// The memory mapped [`RccRegisters`] block is the one production
/// implementation. Unit tests substitute an in-memory implementation to
/// observe the exact sequence of bus accesses.
pub trait RccRegisterFile {
    type Ahb1Enr: Readable<T = u32, R = AHB1ENR::Register>
        + Writeable<T = u32, R = AHB1ENR::Register>;
    type Apb2Enr: Readable<T = u32, R = APB2ENR::Register>
        + Writeable<T = u32, R = APB2ENR::Register>;

    fn ahb1enr(&self) -> &Self::Ahb1Enr;
    fn apb2enr(&self) -> &Self::Apb2Enr;
}

impl RccRegisterFile for RccRegisters {
    type Ahb1Enr = ReadWrite<u32, AHB1ENR::Register>;
    type Apb2Enr = ReadWrite<u32, APB2ENR::Register>;

    fn ahb1enr(&self) -> &Self::Ahb1Enr {
        &self.ahb1enr
    }

    fn apb2enr(&self) -> &Self::Apb2Enr {
        &self.apb2enr
    }
}

pub struct Rcc<'a, R: RccRegisterFile> {
    registers: &'a R,
}

impl<'a, R: RccRegisterFile> Rcc<'a, R> {
    pub const fn new(registers: &'a R) -> Self {
        Self { registers }
    }

    // GPIOA clock

    pub(crate) fn is_enabled_gpioa_clock(&self) -> bool {
        self.registers.ahb1enr().is_set(AHB1ENR::GPIOAEN)
    }

    pub(crate) fn enable_gpioa_clock(&self) {
        self.registers.ahb1enr().modify(AHB1ENR::GPIOAEN::SET)
    }

    pub(crate) fn disable_gpioa_clock(&self) {
        self.registers.ahb1enr().modify(AHB1ENR::GPIOAEN::CLEAR)
    }

    // SPI1 clock

    pub(crate) fn is_enabled_spi1_clock(&self) -> bool {
        self.registers.apb2enr().is_set(APB2ENR::SPI1EN)
    }

    pub(crate) fn enable_spi1_clock(&self) {
        self.registers.apb2enr().modify(APB2ENR::SPI1EN::SET)
    }

    pub(crate) fn disable_spi1_clock(&self) {
        self.registers.apb2enr().modify(APB2ENR::SPI1EN::CLEAR)
    }
}

/// Generic operations for a single peripheral clock gate.
pub trait ClockInterface {
    fn is_enabled(&self) -> bool;
    fn enable(&self);
    fn disable(&self);
}

pub struct PeripheralClock<'a, R: RccRegisterFile> {
    pub clock: PeripheralClockType,
    rcc: &'a Rcc<'a, R>,
}

/// Bus + Clock name for the peripherals
pub enum PeripheralClockType {
    AHB1(HCLK1),
    APB2(PCLK2),
}

/// Peripherals clocked by HCLK1
pub enum HCLK1 {
    GPIOA,
}

/// Peripherals clocked by PCLK2
pub enum PCLK2 {
    SPI1,
}

impl<'a, R: RccRegisterFile> PeripheralClock<'a, R> {
    pub const fn new(clock: PeripheralClockType, rcc: &'a Rcc<'a, R>) -> Self {
        Self { clock, rcc }
    }
}

impl<'a, R: RccRegisterFile> ClockInterface for PeripheralClock<'a, R> {
    fn is_enabled(&self) -> bool {
        match self.clock {
            PeripheralClockType::AHB1(ref v) => match v {
                HCLK1::GPIOA => self.rcc.is_enabled_gpioa_clock(),
            },
            PeripheralClockType::APB2(ref v) => match v {
                PCLK2::SPI1 => self.rcc.is_enabled_spi1_clock(),
            },
        }
    }

    fn enable(&self) {
        match self.clock {
            PeripheralClockType::AHB1(ref v) => match v {
                HCLK1::GPIOA => self.rcc.enable_gpioa_clock(),
            },
            PeripheralClockType::APB2(ref v) => match v {
                PCLK2::SPI1 => self.rcc.enable_spi1_clock(),
            },
        }
    }

    fn disable(&self) {
        match self.clock {
            PeripheralClockType::AHB1(ref v) => match v {
                HCLK1::GPIOA => self.rcc.disable_gpioa_clock(),
            },
            PeripheralClockType::APB2(ref v) => match v {
                PCLK2::SPI1 => self.rcc.disable_spi1_clock(),
            },
        }
    }
}
