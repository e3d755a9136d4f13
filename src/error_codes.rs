// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! The standard error codes used by the SPI driver.

/// Standard error codes.
///
/// These are only ever produced by the bounded transfer entry points. The
/// plain polled operations wait for the hardware indefinitely and cannot
/// fail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ErrorCode {
    /// The transmit buffer never emptied. No data byte has been written to
    /// the peripheral.
    TransmitNotReady,
    /// The peripheral reported busy for the whole attempt budget after the
    /// data byte was written.
    TransferNotComplete,
    /// The receive buffer never filled, so no received byte could be read
    /// back.
    ReceiveNotReady,
}

impl From<ErrorCode> for isize {
    fn from(original: ErrorCode) -> isize {
        match original {
            ErrorCode::TransmitNotReady => -1,
            ErrorCode::TransferNotComplete => -2,
            ErrorCode::ReceiveNotReady => -3,
        }
    }
}

impl From<ErrorCode> for usize {
    fn from(original: ErrorCode) -> usize {
        isize::from(original) as usize
    }
}
