// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Polled SPI master driver for STM32F4-series microcontrollers.
//!
//! The crate drives SPI1 as a bus master for a single slave device behind a
//! dedicated chip select on PA4. Clock gating, pin muxing and the transfer
//! engine all work by explicit register polling, with no interrupts and no
//! DMA.
//!
//! Peripheral access goes through small register file traits, with the
//! memory mapped register blocks as the production implementations. The
//! usual setup on hardware:
//!
//! ```ignore
//! use stm32f4xx_spi::gpio::GPIOA_BASE;
//! use stm32f4xx_spi::rcc::{RCC_BASE, Rcc};
//! use stm32f4xx_spi::spi::{SPI1_BASE, Spi};
//!
//! let rcc = Rcc::new(&*RCC_BASE);
//! let spi = Spi::new(&*SPI1_BASE, &rcc, &*GPIOA_BASE);
//! spi.initialize();
//! let received = spi.exchange_byte(0x55);
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

pub mod error_codes;
pub mod gpio;
pub mod poll;
pub mod rcc;
pub mod spi;

mod static_ref;

pub use static_ref::StaticRef;
