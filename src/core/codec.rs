//! # Codec Surface
//!
//! The flat encode/decode functions a transport layer drives, plus helpers
//! for splitting a received datagram payload into 32-bit words and back.
//!
//! Every function here is a thin wrapper over [`PacketHeader`] and
//! [`TransactionHeader`]; the wrappers add trace-level logging on rejected
//! words so a transport can diagnose interop failures without its own
//! decode instrumentation.
//!
//! The word helpers use network byte order. A device transmitting with the
//! opposite byte order is caught by the header checks themselves (the
//! byte-order qualifier exists for exactly this), at which point the caller
//! byte-swaps and retries.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::config::{ValidationMode, HEADER_SIZE};
use crate::core::packet::PacketHeader;
use crate::core::transaction::{InfoCode, Outcome, TransactionHeader};
use crate::error::{IpbusError, Result};

/// Serialize a packet header into its wire word
pub fn encode_packet_header(header: &PacketHeader) -> Result<u32> {
    header.encode()
}

/// Parse a received word into a packet header
pub fn decode_packet_header(word: u32, mode: ValidationMode) -> Result<PacketHeader> {
    PacketHeader::decode(word, mode).inspect_err(|e| {
        trace!(word, error = %e, "packet header rejected");
    })
}

/// Serialize a transaction header into its wire word
pub fn encode_transaction_header(header: &TransactionHeader) -> u32 {
    header.encode()
}

/// Parse a received word into a transaction header
pub fn decode_transaction_header(word: u32, mode: ValidationMode) -> Result<TransactionHeader> {
    TransactionHeader::decode(word, mode).inspect_err(|e| {
        trace!(word, error = %e, "transaction header rejected");
    })
}

/// Map a reply's info code onto the transport-facing outcome
pub fn classify_info_code(info_code: InfoCode) -> Outcome {
    info_code.classify()
}

/// Split a datagram payload into 32-bit words in receive order.
///
/// Fails with `Truncated` when the payload is not word-aligned; a partial
/// trailing word can never be decoded and dropping it silently would
/// desynchronize the transaction stream. Payload size limits
/// ([`MAX_PACKET_SIZE`](crate::config::MAX_PACKET_SIZE)) are the transport's
/// responsibility, not checked here.
pub fn words_from_datagram(payload: &[u8]) -> Result<Vec<u32>> {
    if payload.len() % HEADER_SIZE != 0 {
        return Err(IpbusError::Truncated {
            len: payload.len(),
        });
    }

    let mut buf = payload;
    let mut words = Vec::with_capacity(payload.len() / HEADER_SIZE);
    while buf.has_remaining() {
        words.push(buf.get_u32());
    }

    Ok(words)
}

/// Serialize words into a datagram payload in network byte order
pub fn datagram_from_words(words: &[u32]) -> Bytes {
    let mut buf = BytesMut::with_capacity(words.len() * HEADER_SIZE);
    for &word in words {
        buf.put_u32(word);
    }
    buf.freeze()
}
