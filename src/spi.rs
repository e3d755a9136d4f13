// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Serial peripheral interface (SPI) master.
//!
//! Polled driver for SPI1 wired as a bus master to a single slave device.
//! The chip select line is a plain GPIO output under software control and
//! every transfer is an eight bit full duplex exchange.

use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::registers::{ReadOnly, ReadWrite};
use tock_registers::{register_bitfields, register_structs};

use crate::error_codes::ErrorCode;
use crate::gpio::{AFRL, AlternateFunction, GpioRegisterFile, MODER, Mode, Pin, PinId, PortClock};
use crate::poll;
use crate::rcc::{
    ClockInterface, HCLK1, PCLK2, PeripheralClock, PeripheralClockType, Rcc, RccRegisterFile,
};
use crate::static_ref::StaticRef;

register_structs! {
    /// Serial peripheral interface
    pub SpiRegisters {
        /// control register 1
        (0x00 => cr1: ReadWrite<u32, CR1::Register>),
        /// control register 2
        (0x04 => cr2: ReadWrite<u32>),
        /// status register
        (0x08 => sr: ReadWrite<u32, SR::Register>),
        /// data register
        (0x0C => dr: ReadWrite<u32, DR::Register>),
        /// CRC polynomial register
        (0x10 => crcpr: ReadWrite<u32>),
        /// RX CRC register
        (0x14 => rxcrcr: ReadOnly<u32>),
        /// TX CRC register
        (0x18 => txcrcr: ReadOnly<u32>),
        /// I2S configuration register
        (0x1C => i2scfgr: ReadWrite<u32>),
        /// I2S prescaler register
        (0x20 => i2spr: ReadWrite<u32>),
        (0x24 => @END),
    }
}

register_bitfields![u32,
    pub CR1 [
        /// Bidirectional data mode enable
        BIDIMODE OFFSET(15) NUMBITS(1) [],
        /// Output enable in bidirectional mode
        BIDIOE OFFSET(14) NUMBITS(1) [],
        /// Hardware CRC calculation enable
        CRCEN OFFSET(13) NUMBITS(1) [],
        /// CRC transfer next
        CRCNEXT OFFSET(12) NUMBITS(1) [],
        /// Data frame format
        DFF OFFSET(11) NUMBITS(1) [],
        /// Receive only
        RXONLY OFFSET(10) NUMBITS(1) [],
        /// Software slave management
        SSM OFFSET(9) NUMBITS(1) [],
        /// Internal slave select
        SSI OFFSET(8) NUMBITS(1) [],
        /// Frame format
        LSBFIRST OFFSET(7) NUMBITS(1) [],
        /// SPI enable
        SPE OFFSET(6) NUMBITS(1) [],
        /// Baud rate control
        BR OFFSET(3) NUMBITS(3) [],
        /// Master selection
        MSTR OFFSET(2) NUMBITS(1) [],
        /// Clock polarity
        CPOL OFFSET(1) NUMBITS(1) [],
        /// Clock phase
        CPHA OFFSET(0) NUMBITS(1) []
    ],
    pub SR [
        /// TI frame format error
        TIFRFE OFFSET(8) NUMBITS(1) [],
        /// Busy flag
        BSY OFFSET(7) NUMBITS(1) [],
        /// Overrun flag
        OVR OFFSET(6) NUMBITS(1) [],
        /// Mode fault
        MODF OFFSET(5) NUMBITS(1) [],
        /// CRC error flag
        CRCERR OFFSET(4) NUMBITS(1) [],
        /// Underrun flag
        UDR OFFSET(3) NUMBITS(1) [],
        /// Channel side
        CHSIDE OFFSET(2) NUMBITS(1) [],
        /// Transmit buffer empty
        TXE OFFSET(1) NUMBITS(1) [],
        /// Receive buffer not empty
        RXNE OFFSET(0) NUMBITS(1) []
    ],
    pub DR [
        /// Data register
        DR OFFSET(0) NUMBITS(8) []
    ]
];

pub const SPI1_BASE: StaticRef<SpiRegisters> =
    unsafe { StaticRef::new(0x40013000 as *const SpiRegisters) };

/// The SPI registers the configuration and transfer paths touch.
///
/// The memory mapped [`SpiRegisters`] block is the one production
/// implementation. Unit tests substitute an in-memory implementation to
/// observe the exact sequence of bus accesses.
pub trait SpiRegisterFile {
    type Cr1: Readable<T = u32, R = CR1::Register> + Writeable<T = u32, R = CR1::Register>;
    type Sr: Readable<T = u32, R = SR::Register>;
    type Dr: Readable<T = u32, R = DR::Register> + Writeable<T = u32, R = DR::Register>;

    fn cr1(&self) -> &Self::Cr1;
    fn sr(&self) -> &Self::Sr;
    fn dr(&self) -> &Self::Dr;
}

impl SpiRegisterFile for SpiRegisters {
    type Cr1 = ReadWrite<u32, CR1::Register>;
    type Sr = ReadWrite<u32, SR::Register>;
    type Dr = ReadWrite<u32, DR::Register>;

    fn cr1(&self) -> &Self::Cr1 {
        &self.cr1
    }

    fn sr(&self) -> &Self::Sr {
        &self.sr
    }

    fn dr(&self) -> &Self::Dr {
        &self.dr
    }
}

pub struct SpiClock<'a, R: RccRegisterFile>(pub PeripheralClock<'a, R>);

impl<R: RccRegisterFile> ClockInterface for SpiClock<'_, R> {
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

// SPI1 maps to PA4 (NSS), PA5 (SCK), PA6 (MISO) and PA7 (MOSI) on
// alternate function 5. The chip select level is driven in software
// through the port output data register.
const CHIP_SELECT_PIN: PinId = PinId::PA04;

/// Polled SPI master on SPI1 with a software driven chip select.
pub struct Spi<'a, R: RccRegisterFile, G: GpioRegisterFile, S: SpiRegisterFile> {
    registers: &'a S,
    clock: SpiClock<'a, R>,
    port_clock: PortClock<'a, R>,
    port: &'a G,
    chip_select: Pin<'a, G>,
}

impl<'a, R: RccRegisterFile, G: GpioRegisterFile, S: SpiRegisterFile> Spi<'a, R, G, S> {
    pub const fn new(registers: &'a S, rcc: &'a Rcc<'a, R>, port: &'a G) -> Self {
        Self {
            registers,
            clock: SpiClock(PeripheralClock::new(PeripheralClockType::APB2(PCLK2::SPI1), rcc)),
            port_clock: PortClock(PeripheralClock::new(
                PeripheralClockType::AHB1(HCLK1::GPIOA),
                rcc,
            )),
            port,
            chip_select: Pin::new(port, CHIP_SELECT_PIN),
        }
    }

    /// Run the full initialization sequence.
    ///
    /// Clocks are ungated before any pin or peripheral register is written
    /// and the peripheral itself is configured last. Call once at startup,
    /// before the first transfer.
    pub fn initialize(&self) {
        self.enable_peripheral_clocks();
        self.configure_spi_pins();
        self.configure_spi_master();
    }

    /// Ungate the clocks of the GPIO port and the SPI peripheral.
    ///
    /// Both enables are read-modify-write, so the clock state of unrelated
    /// devices on either bus is preserved.
    pub fn enable_peripheral_clocks(&self) {
        self.port_clock.enable();
        self.clock.enable();
    }

    /// Hand the SPI pin group over to the peripheral.
    ///
    /// Pins 4 through 7 of the port move to alternate function mode with
    /// alternate function 5 selected. Mode and alternate function are each
    /// applied with a single read-modify-write of the affected register, so
    /// pins outside the group keep their configuration and the whole group
    /// switches over in one bus write per register.
    pub fn configure_spi_pins(&self) {
        self.port.moder().modify(
            MODER::MODER4.val(Mode::AlternateFunctionMode as u32)
                + MODER::MODER5.val(Mode::AlternateFunctionMode as u32)
                + MODER::MODER6.val(Mode::AlternateFunctionMode as u32)
                + MODER::MODER7.val(Mode::AlternateFunctionMode as u32),
        );
        self.port.afrl().modify(
            AFRL::AFRL4.val(AlternateFunction::AF5 as u32)
                + AFRL::AFRL5.val(AlternateFunction::AF5 as u32)
                + AFRL::AFRL6.val(AlternateFunction::AF5 as u32)
                + AFRL::AFRL7.val(AlternateFunction::AF5 as u32),
        );
    }

    /// Program the peripheral as an eight bit polled master.
    ///
    /// The control register is cleared to a known state first, then master
    /// mode, the fPCLK/16 baud rate and clock mode 0 (CPOL = 0, CPHA = 0)
    /// are written. The peripheral is enabled as the final step so it never
    /// runs with a partial configuration.
    pub fn configure_spi_master(&self) {
        self.registers.cr1().set(0);
        self.registers
            .cr1()
            .modify(CR1::MSTR::SET + CR1::BR.val(0b011) + CR1::CPOL::CLEAR + CR1::CPHA::CLEAR);
        self.registers.cr1().modify(CR1::SPE::SET);
    }

    /// Whether the SPI peripheral clock is currently ungated.
    pub fn is_enabled_clock(&self) -> bool {
        self.clock.is_enabled()
    }

    /// Send `byte` once the transmit buffer drains, then wait for the
    /// shift register to go idle.
    ///
    /// The received byte is left in the data register for a following
    /// [`read_byte`](Self::read_byte). Chip select is not touched.
    pub fn write_byte(&self, byte: u8) {
        let sr = self.registers.sr();
        poll::until(|| sr.is_set(SR::TXE));
        self.registers.dr().write(DR::DR.val(byte as u32));
        poll::until(|| !sr.is_set(SR::BSY));
    }

    /// Wait for the receive buffer to fill, then take the received byte out
    /// of the data register.
    pub fn read_byte(&self) -> u8 {
        let sr = self.registers.sr();
        poll::until(|| sr.is_set(SR::RXNE));
        self.registers.dr().read(DR::DR) as u8
    }

    /// Exchange one byte with the slave and return the byte clocked back.
    ///
    /// Chip select is asserted for exactly the duration of the transfer and
    /// released as soon as the received byte has been read back. Every wait
    /// polls the status register indefinitely; see
    /// [`try_exchange_byte`](Self::try_exchange_byte) for a variant with an
    /// attempt budget.
    pub fn exchange_byte(&self, byte: u8) -> u8 {
        self.chip_select.clear();
        self.write_byte(byte);
        let read = self.read_byte();
        self.chip_select.set();
        read
    }

    /// Exchange one byte, giving each status flag at most `attempts` polls.
    ///
    /// On success the received byte is returned exactly as from
    /// [`exchange_byte`](Self::exchange_byte). When a flag does not reach
    /// its ready state within the budget the transfer is abandoned, chip
    /// select is released and the stage that stalled is reported. With an
    /// `attempts` of zero every wait fails, so the data register is never
    /// written.
    pub fn try_exchange_byte(&self, byte: u8, attempts: usize) -> Result<u8, ErrorCode> {
        let sr = self.registers.sr();

        self.chip_select.clear();
        if !poll::until_bounded(attempts, || sr.is_set(SR::TXE)) {
            self.chip_select.set();
            return Err(ErrorCode::TransmitNotReady);
        }
        self.registers.dr().write(DR::DR.val(byte as u32));
        if !poll::until_bounded(attempts, || !sr.is_set(SR::BSY)) {
            self.chip_select.set();
            return Err(ErrorCode::TransferNotComplete);
        }
        if !poll::until_bounded(attempts, || sr.is_set(SR::RXNE)) {
            self.chip_select.set();
            return Err(ErrorCode::ReceiveNotReady);
        }
        let read = self.registers.dr().read(DR::DR) as u8;
        self.chip_select.set();
        Ok(read)
    }
}
