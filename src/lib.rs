//! # IPBus Protocol
//!
//! Header codec for IPBus, the compact UDP-transported control protocol used
//! for remote read/write register access against FPGA-based hardware.
//!
//! The protocol's entire correctness surface lives in two fixed-layout 32-bit
//! headers: the packet header framing a datagram of transactions, and the
//! transaction header describing one read/write operation and carrying its
//! completion status. This crate parses raw words into structured headers,
//! validates protocol version and reserved bits, classifies packet and
//! transaction types, and serializes headers back into wire words.
//!
//! ## Components
//! - **Packet Header Codec**: version, packet id, byte-order qualifier,
//!   packet type
//! - **Transaction Header Codec**: version, transaction id, word count,
//!   type id, info code
//! - **Outcome Classification**: maps reply info codes onto the tri-state
//!   outcome retry policy hangs off
//!
//! ## Design
//! - All operations are pure and stateless; safe to call from any number of
//!   threads without synchronization
//! - Reserved wire codes decode into explicit `Reserved` variants rather
//!   than failing, preserving interoperability with newer peers; strict
//!   validation is available when deviation means corruption
//! - Transport concerns (sockets, retransmission, datagram size limits)
//!   belong to the caller; this crate never blocks and has no notion of time
//!
//! ## Example
//! ```rust
//! use ipbus_protocol::config::ValidationMode;
//! use ipbus_protocol::{decode_packet_header, PacketType};
//!
//! # fn main() -> ipbus_protocol::error::Result<()> {
//! let header = decode_packet_header(0x200000F0, ValidationMode::Lenient)?;
//! assert_eq!(header.packet_id(), 0);
//! assert_eq!(header.packet_type(), PacketType::Control);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;

// Re-export the codec surface for convenient access
pub use crate::core::codec::{
    classify_info_code, datagram_from_words, decode_packet_header, decode_transaction_header,
    encode_packet_header, encode_transaction_header, words_from_datagram,
};
pub use crate::core::packet::{PacketHeader, PacketType};
pub use crate::core::transaction::{BusDirection, InfoCode, Outcome, TransactionHeader, TypeId};
