//! # Transaction Header Codec
//!
//! Encode/decode for the 32-bit header framing one read/write register
//! transaction, and the classification of its info code into an outcome the
//! transport can act on.
//!
//! A request conventionally carries [`InfoCode::RequestSuccess`] as a
//! placeholder; the outcome only becomes meaningful on the reply header with
//! the matching transaction id.

use crate::config::{ValidationMode, PROTOCOL_VERSION};
use crate::error::{IpbusError, Result};
use serde::{Deserialize, Serialize};

// Header masks
const VERSION_MASK: u32 = 0xF000_0000;
const TRANSACTION_ID_MASK: u32 = 0x0FFF_0000;
const WORD_COUNT_MASK: u32 = 0x0000_FF00;
const TYPE_ID_MASK: u32 = 0x0000_00F0;
const INFO_CODE_MASK: u32 = 0x0000_000F;

const VERSION_SHIFT: u32 = 28;
const TRANSACTION_ID_SHIFT: u32 = 16;
const WORD_COUNT_SHIFT: u32 = 8;
const TYPE_ID_SHIFT: u32 = 4;

/// Largest transaction id that fits the 12-bit field
pub const MAX_TRANSACTION_ID: u16 = 0xFFF;

/// Transaction type carried in bits 7-4.
///
/// Codes 0x2-0xF are reserved and decode into [`TypeId::Reserved`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeId {
    /// Register read
    Read,
    /// Register write
    Write,
    /// Reserved type code, carried through verbatim
    Reserved(u8),
}

impl TypeId {
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0xF {
            0x0 => TypeId::Read,
            0x1 => TypeId::Write,
            other => TypeId::Reserved(other),
        }
    }

    pub fn nibble(self) -> u8 {
        match self {
            TypeId::Read => 0x0,
            TypeId::Write => 0x1,
            TypeId::Reserved(raw) => raw & 0xF,
        }
    }
}

/// Info code carried in bits 3-0, reporting direction and error state of the
/// transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfoCode {
    /// Request successful (and placeholder value on requests)
    RequestSuccess,
    /// Malformed transaction header
    BadHeader,
    /// Bus error on read
    ReadBusError,
    /// Bus error on write
    WriteBusError,
    /// Bus timeout on read
    ReadBusTimeout,
    /// Bus timeout on write
    WriteBusTimeout,
    /// Request type not recognized by the target
    UnknownRequest,
    /// Reserved info code, carried through verbatim
    Reserved(u8),
}

impl InfoCode {
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0xF {
            0x0 => InfoCode::RequestSuccess,
            0x1 => InfoCode::BadHeader,
            0x4 => InfoCode::ReadBusError,
            0x5 => InfoCode::WriteBusError,
            0x6 => InfoCode::ReadBusTimeout,
            0x7 => InfoCode::WriteBusTimeout,
            0xF => InfoCode::UnknownRequest,
            other => InfoCode::Reserved(other),
        }
    }

    pub fn nibble(self) -> u8 {
        match self {
            InfoCode::RequestSuccess => 0x0,
            InfoCode::BadHeader => 0x1,
            InfoCode::ReadBusError => 0x4,
            InfoCode::WriteBusError => 0x5,
            InfoCode::ReadBusTimeout => 0x6,
            InfoCode::WriteBusTimeout => 0x7,
            InfoCode::UnknownRequest => 0xF,
            InfoCode::Reserved(raw) => raw & 0xF,
        }
    }

    /// Map this info code onto the outcome the transport bases its retry
    /// policy on. Pure; the only business logic beyond field extraction.
    pub fn classify(self) -> Outcome {
        match self {
            InfoCode::RequestSuccess => Outcome::Success,
            InfoCode::ReadBusError => Outcome::BusFault {
                direction: BusDirection::Read,
                timeout: false,
            },
            InfoCode::WriteBusError => Outcome::BusFault {
                direction: BusDirection::Write,
                timeout: false,
            },
            InfoCode::ReadBusTimeout => Outcome::BusFault {
                direction: BusDirection::Read,
                timeout: true,
            },
            InfoCode::WriteBusTimeout => Outcome::BusFault {
                direction: BusDirection::Write,
                timeout: true,
            },
            InfoCode::BadHeader | InfoCode::UnknownRequest | InfoCode::Reserved(_) => {
                Outcome::ProtocolFault
            }
        }
    }
}

/// Which bus access a fault occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusDirection {
    Read,
    Write,
}

/// Tri-state outcome of a completed transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Transaction completed
    Success,
    /// The bus access failed; possibly transient, retry policy is the
    /// transport's decision
    BusFault {
        direction: BusDirection,
        timeout: bool,
    },
    /// The request itself was unacceptable; retrying the same bytes cannot
    /// succeed
    ProtocolFault,
}

/// One decoded (or to-be-encoded) IPBus transaction header.
///
/// Immutable once constructed; one instance per request or reply, correlated
/// across the pair solely by transaction id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHeader {
    version: u8,
    transaction_id: u16,
    word_count: u8,
    type_id: TypeId,
    info_code: InfoCode,
}

impl TransactionHeader {
    /// Construct a header, range-checking every field against its declared
    /// bit width.
    pub fn new(
        transaction_id: u16,
        word_count: u16,
        type_id: TypeId,
        info_code: InfoCode,
    ) -> Result<Self> {
        if transaction_id > MAX_TRANSACTION_ID {
            return Err(IpbusError::InvalidField {
                field: "transaction_id",
                value: u32::from(transaction_id),
                max: u32::from(MAX_TRANSACTION_ID),
            });
        }

        if word_count > u16::from(u8::MAX) {
            return Err(IpbusError::InvalidField {
                field: "word_count",
                value: u32::from(word_count),
                max: u32::from(u8::MAX),
            });
        }

        Ok(Self {
            version: PROTOCOL_VERSION,
            transaction_id,
            word_count: word_count as u8,
            type_id,
            info_code,
        })
    }

    /// Construct a request header, with the conventional placeholder info
    /// code.
    pub fn request(transaction_id: u16, word_count: u16, type_id: TypeId) -> Result<Self> {
        Self::new(transaction_id, word_count, type_id, InfoCode::RequestSuccess)
    }

    /// Protocol version (always 2 for a valid header)
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Transaction id correlating request and reply
    pub fn transaction_id(&self) -> u16 {
        self.transaction_id
    }

    /// Number of 32-bit payload words following this header; authoritative
    /// regardless of the datagram length
    pub fn word_count(&self) -> u8 {
        self.word_count
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn info_code(&self) -> InfoCode {
        self.info_code
    }

    /// Serialize into the 32-bit wire word. Infallible: every field was
    /// range-checked at construction and enum nibbles always fit.
    pub fn encode(&self) -> u32 {
        (u32::from(self.version) << VERSION_SHIFT)
            | (u32::from(self.transaction_id) << TRANSACTION_ID_SHIFT)
            | (u32::from(self.word_count) << WORD_COUNT_SHIFT)
            | (u32::from(self.type_id.nibble()) << TYPE_ID_SHIFT)
            | u32::from(self.info_code.nibble())
    }

    /// Parse a received 32-bit word into a header.
    ///
    /// Lenient mode never fails on unrecognized type or info codes; they
    /// decode into the reserved variants so newer peers keep interoperating.
    pub fn decode(word: u32, mode: ValidationMode) -> Result<Self> {
        let version = ((word & VERSION_MASK) >> VERSION_SHIFT) as u8;
        if version != PROTOCOL_VERSION {
            return Err(IpbusError::ProtocolVersionMismatch {
                expected: PROTOCOL_VERSION,
                found: version,
            });
        }

        let type_id = TypeId::from_nibble(((word & TYPE_ID_MASK) >> TYPE_ID_SHIFT) as u8);
        let info_code = InfoCode::from_nibble((word & INFO_CODE_MASK) as u8);

        if mode == ValidationMode::Strict {
            if let TypeId::Reserved(raw) = type_id {
                return Err(IpbusError::UnknownTypeId(raw));
            }
            if let InfoCode::Reserved(raw) = info_code {
                return Err(IpbusError::UnknownInfoCode(raw));
            }
        }

        Ok(Self {
            version,
            transaction_id: ((word & TRANSACTION_ID_MASK) >> TRANSACTION_ID_SHIFT) as u16,
            word_count: ((word & WORD_COUNT_MASK) >> WORD_COUNT_SHIFT) as u8,
            type_id,
            info_code,
        })
    }
}
