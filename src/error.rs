//! # Error Types
//!
//! Error handling for the IPBus header codec.
//!
//! This module defines all error variants that decode, encode, and header
//! construction can produce, plus configuration loading failures.
//!
//! ## Error Categories
//! - **Wire Errors**: version mismatch, byte-order mismatch, truncated words
//! - **Validation Errors**: out-of-range fields, strict-mode rejections
//! - **Configuration Errors**: config file parsing and validation
//!
//! All errors implement `std::error::Error` for interoperability.
//!
//! ## Recovery Semantics
//! - [`IpbusError::ProtocolVersionMismatch`] is fatal to the header; the
//!   caller must drop the packet or transaction.
//! - [`IpbusError::ByteOrderMismatch`] signals endianness disagreement; the
//!   caller is expected to byte-swap the word and retry the decode.
//! - [`IpbusError::InvalidField`] is rejected at construction or encode time
//!   and never reaches the wire.
//! - The `Unknown*` variants are produced only under
//!   [`ValidationMode::Strict`](crate::config::ValidationMode::Strict);
//!   lenient decode preserves unrecognized codes instead of rejecting them.
//!
//! No error is retried internally. All recovery policy (retransmit, resend
//! request, session abort) belongs to the transport layer consuming this
//! crate.

use serde::Serialize;
use thiserror::Error;

/// IpbusError is the primary error type for all codec operations
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum IpbusError {
    #[error("protocol version mismatch: expected {expected}, found {found}")]
    ProtocolVersionMismatch { expected: u8, found: u8 },

    #[error("byte-order qualifier mismatch: found {found:#x}, expected 0xf (byte-swap and retry)")]
    ByteOrderMismatch { found: u8 },

    #[error("invalid {field}: {value} exceeds maximum {max}")]
    InvalidField {
        field: &'static str,
        value: u32,
        max: u32,
    },

    #[error("unknown packet type: {0:#x}")]
    UnknownPacketType(u8),

    #[error("unknown transaction type id: {0:#x}")]
    UnknownTypeId(u8),

    #[error("unknown transaction info code: {0:#x}")]
    UnknownInfoCode(u8),

    #[error("reserved header bits set in word {word:#010x}")]
    ReservedBits { word: u32 },

    #[error("datagram length {len} is not a whole number of 32-bit words")]
    Truncated { len: usize },

    #[error("configuration error: {0}")]
    ConfigError(String),
}

/// Type alias for Results using IpbusError
pub type Result<T> = std::result::Result<T, IpbusError>;
