//! # Core Protocol Components
//!
//! Low-level IPBus header handling: field extraction, validation, and
//! wire-format serialization.
//!
//! This module provides the foundation for the protocol, handling the two
//! fixed-layout 32-bit headers everything else is framed by.
//!
//! ## Components
//! - **Packet**: the packet header framing one UDP datagram of transactions
//! - **Transaction**: the per-operation header and its outcome classification
//! - **Codec**: the flat encode/decode surface and word boundary helpers
//!
//! ## Wire Format
//! ```text
//! Packet header:
//! [Version(4) = 0x2] [Rsvd(4)] [Packet ID(16)] [Byte-order(4) = 0xF] [Type(4)]
//!
//! Transaction header:
//! [Version(4) = 0x2] [Transaction ID(12)] [Words(8)] [Type ID(4)] [Info Code(4)]
//! ```
//!
//! ## Interoperability
//! - Unrecognized packet types (0x3-0xF) and transaction codes decode into
//!   explicit reserved variants instead of failing, unless strict validation
//!   is requested
//! - The byte-order qualifier detects endianness disagreement before any
//!   field is trusted

pub mod codec;
pub mod packet;
pub mod transaction;
