#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Edge-case tests for the header codec
//! Covers boundary values, malformed words, strict/lenient divergence, and
//! error reporting

use ipbus_protocol::config::{ValidationMode, BYTE_ORDER_QUALIFIER, PROTOCOL_VERSION};
use ipbus_protocol::error::IpbusError;
use ipbus_protocol::{
    classify_info_code, datagram_from_words, decode_packet_header, decode_transaction_header,
    encode_packet_header, encode_transaction_header, words_from_datagram, BusDirection, InfoCode,
    Outcome, PacketHeader, PacketType, TransactionHeader, TypeId,
};

// ============================================================================
// PACKET HEADER DECODE EDGE CASES
// ============================================================================

#[test]
fn test_packet_header_reference_word() {
    // Reference control packet: version 2, packet id 0, qualifier 0xF
    let header = decode_packet_header(0x2000_00F0, ValidationMode::Lenient)
        .expect("Should decode reference word");
    assert_eq!(header.version(), PROTOCOL_VERSION);
    assert_eq!(header.packet_id(), 0);
    assert_eq!(header.byte_order_qualifier(), BYTE_ORDER_QUALIFIER);
    assert_eq!(header.packet_type(), PacketType::Control);
}

#[test]
fn test_packet_header_wrong_version() {
    for word in [0x0000_00F0u32, 0x1000_00F0, 0x3000_00F0, 0xF000_00F0] {
        let result = decode_packet_header(word, ValidationMode::Lenient);
        match result {
            Err(IpbusError::ProtocolVersionMismatch { expected: 2, found }) => {
                assert_eq!(u32::from(found), word >> 28);
            }
            other => panic!("Unexpected result for {word:#010x}: {other:?}"),
        }
    }
}

#[test]
fn test_packet_header_byte_order_mismatch() {
    // Version intact, qualifier nibble zeroed
    let result = decode_packet_header(0x2000_0000, ValidationMode::Lenient);
    assert!(
        matches!(result, Err(IpbusError::ByteOrderMismatch { found: 0x0 })),
        "Should reject non-canonical qualifier"
    );
}

#[test]
fn test_packet_header_byte_swapped_word_recoverable() {
    let word = encode_packet_header(&PacketHeader::new(0x1234, PacketType::Control).unwrap())
        .expect("Should encode");

    // A fully byte-swapped word fails decode; the caller's swap-and-retry
    // recovery must then succeed.
    let swapped = word.swap_bytes();
    assert!(decode_packet_header(swapped, ValidationMode::Lenient).is_err());

    let recovered = decode_packet_header(swapped.swap_bytes(), ValidationMode::Lenient)
        .expect("Swap-and-retry should decode");
    assert_eq!(recovered.packet_id(), 0x1234);
}

#[test]
fn test_packet_header_reserved_bits_lenient_vs_strict() {
    // Bits 27-24 set on an otherwise valid control packet word
    let word = 0x2F00_00F0;

    let lenient =
        decode_packet_header(word, ValidationMode::Lenient).expect("Lenient should ignore");
    assert_eq!(lenient.packet_type(), PacketType::Control);

    let strict = decode_packet_header(word, ValidationMode::Strict);
    assert!(matches!(strict, Err(IpbusError::ReservedBits { word: w }) if w == word));
}

#[test]
fn test_packet_header_unknown_type_lenient_vs_strict() {
    // Packet type nibble 0x7 is reserved
    let word = 0x2000_00F7;

    let lenient =
        decode_packet_header(word, ValidationMode::Lenient).expect("Lenient should preserve");
    assert_eq!(lenient.packet_type(), PacketType::Reserved(0x7));

    let strict = decode_packet_header(word, ValidationMode::Strict);
    assert!(matches!(strict, Err(IpbusError::UnknownPacketType(0x7))));
}

#[test]
fn test_packet_header_all_defined_types_roundtrip() {
    for (ty, nibble) in [
        (PacketType::Control, 0x0u32),
        (PacketType::Status, 0x1),
        (PacketType::Resend, 0x2),
    ] {
        let header = PacketHeader::new(0xABCD, ty).expect("Should construct");
        let word = encode_packet_header(&header).expect("Should encode");
        assert_eq!(word & 0xF, nibble);
        let decoded = decode_packet_header(word, ValidationMode::Strict)
            .expect("Defined types survive strict decode");
        assert_eq!(decoded, header);
    }
}

// ============================================================================
// PACKET HEADER CONSTRUCTION EDGE CASES
// ============================================================================

#[test]
fn test_packet_id_boundary_values() {
    for packet_id in [0u32, 1, 0x7FFF, 0xFFFF] {
        let header = PacketHeader::new(packet_id, PacketType::Status).expect("Should construct");
        let word = encode_packet_header(&header).expect("Should encode");
        let decoded = decode_packet_header(word, ValidationMode::Lenient).expect("Should decode");
        assert_eq!(u32::from(decoded.packet_id()), packet_id);
    }
}

#[test]
fn test_packet_id_overflow_rejected() {
    let result = PacketHeader::new(0x10000, PacketType::Control);
    match result {
        Err(IpbusError::InvalidField {
            field: "packet_id",
            value: 0x10000,
            max: 0xFFFF,
        }) => {}
        other => panic!("Unexpected: {other:?}"),
    }
}

#[test]
fn test_reserved_packet_type_never_reaches_wire() {
    let header = PacketHeader::new(0, PacketType::Reserved(0xB)).expect("Constructible");
    assert!(matches!(
        encode_packet_header(&header),
        Err(IpbusError::InvalidField {
            field: "packet_type",
            ..
        })
    ));
}

// ============================================================================
// TRANSACTION HEADER EDGE CASES
// ============================================================================

#[test]
fn test_transaction_header_reference_word() {
    // Reference write request: id 0x001, 4 payload words
    let header = decode_transaction_header(0x2001_0410, ValidationMode::Lenient)
        .expect("Should decode reference word");
    assert_eq!(header.version(), PROTOCOL_VERSION);
    assert_eq!(header.transaction_id(), 0x001);
    assert_eq!(header.word_count(), 0x04);
    assert_eq!(header.type_id(), TypeId::Write);
    assert_eq!(header.info_code(), InfoCode::RequestSuccess);
}

#[test]
fn test_transaction_header_wrong_version() {
    for word in [0x0001_0410u32, 0x1001_0410, 0xF001_0410] {
        let result = decode_transaction_header(word, ValidationMode::Lenient);
        assert!(
            matches!(
                result,
                Err(IpbusError::ProtocolVersionMismatch { expected: 2, .. })
            ),
            "Should reject version in {word:#010x}"
        );
    }
}

#[test]
fn test_transaction_field_boundaries_roundtrip() {
    let header = TransactionHeader::new(0xFFF, 0xFF, TypeId::Write, InfoCode::UnknownRequest)
        .expect("Max field values should construct");
    let decoded = decode_transaction_header(encode_transaction_header(&header), ValidationMode::Lenient)
        .expect("Should decode");
    assert_eq!(decoded.transaction_id(), 0xFFF);
    assert_eq!(decoded.word_count(), 0xFF);
    assert_eq!(decoded, header);
}

#[test]
fn test_transaction_id_overflow_rejected() {
    let result = TransactionHeader::new(0x1000, 0, TypeId::Read, InfoCode::RequestSuccess);
    match result {
        Err(IpbusError::InvalidField {
            field: "transaction_id",
            value: 0x1000,
            max: 0xFFF,
        }) => {}
        other => panic!("Unexpected: {other:?}"),
    }
}

#[test]
fn test_word_count_overflow_rejected() {
    let result = TransactionHeader::new(0, 0x100, TypeId::Read, InfoCode::RequestSuccess);
    match result {
        Err(IpbusError::InvalidField {
            field: "word_count",
            value: 0x100,
            max: 0xFF,
        }) => {}
        other => panic!("Unexpected: {other:?}"),
    }
}

#[test]
fn test_reserved_info_code_lenient_vs_strict() {
    // Info code 0x2 is reserved
    let word = 0x2000_0002;

    let lenient =
        decode_transaction_header(word, ValidationMode::Lenient).expect("Lenient should preserve");
    assert_eq!(lenient.info_code(), InfoCode::Reserved(0x2));

    let strict = decode_transaction_header(word, ValidationMode::Strict);
    assert!(matches!(strict, Err(IpbusError::UnknownInfoCode(0x2))));
}

#[test]
fn test_reserved_type_id_lenient_vs_strict() {
    // Type id nibble 0x9 is reserved
    let word = 0x2000_0090;

    let lenient =
        decode_transaction_header(word, ValidationMode::Lenient).expect("Lenient should preserve");
    assert_eq!(lenient.type_id(), TypeId::Reserved(0x9));

    let strict = decode_transaction_header(word, ValidationMode::Strict);
    assert!(matches!(strict, Err(IpbusError::UnknownTypeId(0x9))));
}

#[test]
fn test_request_constructor_uses_placeholder_info_code() {
    let header = TransactionHeader::request(0x42, 1, TypeId::Read).expect("Should construct");
    assert_eq!(header.info_code(), InfoCode::RequestSuccess);
}

// ============================================================================
// OUTCOME CLASSIFICATION
// ============================================================================

#[test]
fn test_classification_table() {
    let cases = [
        (InfoCode::RequestSuccess, Outcome::Success),
        (
            InfoCode::ReadBusError,
            Outcome::BusFault {
                direction: BusDirection::Read,
                timeout: false,
            },
        ),
        (
            InfoCode::WriteBusError,
            Outcome::BusFault {
                direction: BusDirection::Write,
                timeout: false,
            },
        ),
        (
            InfoCode::ReadBusTimeout,
            Outcome::BusFault {
                direction: BusDirection::Read,
                timeout: true,
            },
        ),
        (
            InfoCode::WriteBusTimeout,
            Outcome::BusFault {
                direction: BusDirection::Write,
                timeout: true,
            },
        ),
        (InfoCode::BadHeader, Outcome::ProtocolFault),
        (InfoCode::UnknownRequest, Outcome::ProtocolFault),
        (InfoCode::Reserved(0x3), Outcome::ProtocolFault),
    ];

    for (code, expected) in cases {
        assert_eq!(classify_info_code(code), expected, "for {code:?}");
    }
}

#[test]
fn test_read_timeout_distinct_from_read_error() {
    // 0x6 (timeout) and 0x4 (bus error) drive different retry decisions
    let timeout = classify_info_code(InfoCode::from_nibble(0x6));
    let error = classify_info_code(InfoCode::from_nibble(0x4));
    assert_ne!(timeout, error);
}

// ============================================================================
// DATAGRAM WORD BOUNDARY EDGE CASES
// ============================================================================

#[test]
fn test_datagram_roundtrip() {
    let packet = encode_packet_header(&PacketHeader::new(1, PacketType::Control).unwrap()).unwrap();
    let transaction =
        encode_transaction_header(&TransactionHeader::request(1, 1, TypeId::Write).unwrap());
    let words = vec![packet, transaction, 0xCAFE_F00D];

    let payload = datagram_from_words(&words);
    assert_eq!(payload.len(), 12);
    assert_eq!(words_from_datagram(&payload).expect("aligned"), words);
}

#[test]
fn test_datagram_partial_word_rejected() {
    for len in [1usize, 2, 3, 5, 7, 1499] {
        let payload = vec![0u8; len];
        assert!(
            matches!(
                words_from_datagram(&payload),
                Err(IpbusError::Truncated { len: l }) if l == len
            ),
            "length {len} should be rejected"
        );
    }
}

#[test]
fn test_empty_datagram_yields_no_words() {
    assert!(words_from_datagram(&[]).expect("aligned").is_empty());
}

// ============================================================================
// ERROR PROPAGATION EDGE CASES
// ============================================================================

#[test]
fn test_error_display_formatting() {
    let errors = vec![
        IpbusError::ProtocolVersionMismatch {
            expected: 2,
            found: 3,
        },
        IpbusError::ByteOrderMismatch { found: 0x0 },
        IpbusError::InvalidField {
            field: "packet_id",
            value: 0x10000,
            max: 0xFFFF,
        },
        IpbusError::UnknownPacketType(0x7),
        IpbusError::UnknownTypeId(0x9),
        IpbusError::UnknownInfoCode(0x2),
        IpbusError::ReservedBits { word: 0x2F00_00F0 },
        IpbusError::Truncated { len: 5 },
        IpbusError::ConfigError("test error".to_string()),
    ];

    for err in errors {
        let display_str = format!("{err}");
        assert!(!display_str.is_empty(), "Error should have display format");
    }
}

#[test]
fn test_error_debug_formatting() {
    let err = IpbusError::ByteOrderMismatch { found: 0x3 };
    let debug_str = format!("{err:?}");
    assert!(!debug_str.is_empty(), "Error should have debug format");
}
