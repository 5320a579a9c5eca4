//! # Packet Header Codec
//!
//! Encode/decode for the 32-bit IPBus packet header framing one UDP datagram.
//!
//! The header has no self-describing framing; every peer must agree on the
//! exact masks below. The version field is the 4-bit nibble in bits 31-28
//! whose required value 0x2 corresponds to the protocol's 0x20000000 version
//! mask. Bits 27-24 are reserved and must be zero on encode.

use crate::config::{ValidationMode, BYTE_ORDER_QUALIFIER, PROTOCOL_VERSION};
use crate::error::{IpbusError, Result};
use serde::{Deserialize, Serialize};

// Header masks
const VERSION_MASK: u32 = 0xF000_0000;
const RESERVED_MASK: u32 = 0x0F00_0000;
const PACKET_ID_MASK: u32 = 0x00FF_FF00;
const BYTE_ORDER_MASK: u32 = 0x0000_00F0;
const PACKET_TYPE_MASK: u32 = 0x0000_000F;

const VERSION_SHIFT: u32 = 28;
const PACKET_ID_SHIFT: u32 = 8;
const BYTE_ORDER_SHIFT: u32 = 4;

/// Packet type carried in the low nibble of the packet header.
///
/// Values 0x3-0xF are reserved for future protocol revisions and decode into
/// [`PacketType::Reserved`] rather than failing, so a receiver keeps working
/// against newer peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PacketType {
    /// Control packet (contains IPBus transactions), both directions
    Control,
    /// Status packet, both directions
    Status,
    /// Re-send request packet, request direction only
    Resend,
    /// Reserved type code (0x3-0xF), carried through verbatim
    Reserved(u8),
}

impl PacketType {
    /// Decode the packet type from its wire nibble
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0xF {
            0x0 => PacketType::Control,
            0x1 => PacketType::Status,
            0x2 => PacketType::Resend,
            other => PacketType::Reserved(other),
        }
    }

    /// Wire nibble for this packet type
    pub fn nibble(self) -> u8 {
        match self {
            PacketType::Control => 0x0,
            PacketType::Status => 0x1,
            PacketType::Resend => 0x2,
            PacketType::Reserved(raw) => raw & 0xF,
        }
    }

    /// Get human-readable name
    pub fn name(self) -> &'static str {
        match self {
            PacketType::Control => "Control",
            PacketType::Status => "Status",
            PacketType::Resend => "Resend",
            PacketType::Reserved(_) => "Reserved",
        }
    }
}

/// One decoded (or to-be-encoded) IPBus packet header.
///
/// Immutable once constructed; field ranges are enforced by [`PacketHeader::new`]
/// so a value of this type always fits the wire layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketHeader {
    version: u8,
    packet_id: u16,
    byte_order_qualifier: u8,
    packet_type: PacketType,
}

impl PacketHeader {
    /// Construct a header for sending.
    ///
    /// The version and byte-order qualifier are fixed by the protocol; the
    /// packet id is range-checked here so encode can never produce an
    /// out-of-layout word.
    pub fn new(packet_id: u32, packet_type: PacketType) -> Result<Self> {
        if packet_id > u32::from(u16::MAX) {
            return Err(IpbusError::InvalidField {
                field: "packet_id",
                value: packet_id,
                max: u32::from(u16::MAX),
            });
        }

        Ok(Self {
            version: PROTOCOL_VERSION,
            packet_id: packet_id as u16,
            byte_order_qualifier: BYTE_ORDER_QUALIFIER,
            packet_type,
        })
    }

    /// Protocol version (always 2 for a valid header)
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Packet id, unique within a session
    pub fn packet_id(&self) -> u16 {
        self.packet_id
    }

    /// Byte-order qualifier nibble (canonical 0xF)
    pub fn byte_order_qualifier(&self) -> u8 {
        self.byte_order_qualifier
    }

    /// Packet type from the low nibble
    pub fn packet_type(&self) -> PacketType {
        self.packet_type
    }

    /// Serialize into the 32-bit wire word.
    ///
    /// Only the three defined packet types may be emitted; attempting to
    /// encode a reserved type fails with `InvalidField`.
    pub fn encode(&self) -> Result<u32> {
        if let PacketType::Reserved(raw) = self.packet_type {
            return Err(IpbusError::InvalidField {
                field: "packet_type",
                value: u32::from(raw),
                max: 0x2,
            });
        }

        Ok((u32::from(self.version) << VERSION_SHIFT)
            | (u32::from(self.packet_id) << PACKET_ID_SHIFT)
            | (u32::from(self.byte_order_qualifier) << BYTE_ORDER_SHIFT)
            | u32::from(self.packet_type.nibble()))
    }

    /// Parse a received 32-bit word into a header.
    ///
    /// Checks run in fixed order: protocol version, then byte-order
    /// qualifier, then (strict mode only) reserved bits and packet type.
    /// A `ByteOrderMismatch` means the caller should byte-swap the word and
    /// retry; the codec never swaps on its own.
    pub fn decode(word: u32, mode: ValidationMode) -> Result<Self> {
        let version = ((word & VERSION_MASK) >> VERSION_SHIFT) as u8;
        if version != PROTOCOL_VERSION {
            return Err(IpbusError::ProtocolVersionMismatch {
                expected: PROTOCOL_VERSION,
                found: version,
            });
        }

        let byte_order_qualifier = ((word & BYTE_ORDER_MASK) >> BYTE_ORDER_SHIFT) as u8;
        if byte_order_qualifier != BYTE_ORDER_QUALIFIER {
            return Err(IpbusError::ByteOrderMismatch {
                found: byte_order_qualifier,
            });
        }

        if mode == ValidationMode::Strict && word & RESERVED_MASK != 0 {
            return Err(IpbusError::ReservedBits { word });
        }

        let packet_type = PacketType::from_nibble((word & PACKET_TYPE_MASK) as u8);
        if mode == ValidationMode::Strict {
            if let PacketType::Reserved(raw) = packet_type {
                return Err(IpbusError::UnknownPacketType(raw));
            }
        }

        Ok(Self {
            version,
            packet_id: ((word & PACKET_ID_MASK) >> PACKET_ID_SHIFT) as u16,
            byte_order_qualifier,
            packet_type,
        })
    }
}
