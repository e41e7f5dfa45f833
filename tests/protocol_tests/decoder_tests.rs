//! Decoder Tests
//!
//! Tests for response decoding and for the service-side request decoder /
//! response encoder pair.

use uniauth::protocol::field::{
    FIELD_END, TAG_DISPLAY, TAG_EXPIRE, TAG_ID, TAG_KEY, TAG_LIFETIME, TAG_SRC, TAG_USER,
};
use uniauth::protocol::{
    decode_request, decode_response, encode_request, encode_response, CommandType, Field,
    FieldValue, Fields, Request, Response, ResponseKind,
};
use uniauth::{DecodeError, EncodeError};

// =============================================================================
// Message / Error Tests
// =============================================================================

#[test]
fn test_decode_message_drops_trailing_byte() {
    let decoded = decode_response(&[0x00, 0x48, 0x69, 0xFF]).unwrap();
    assert_eq!(decoded, Response::Message("Hi".to_string()));
    assert_eq!(decoded.kind(), ResponseKind::Message);
}

#[test]
fn test_decode_error_same_framing_as_message() {
    let decoded = decode_response(&[0x01, b'n', b'o', 0xFF]).unwrap();
    assert_eq!(decoded, Response::Error("no".to_string()));
    assert!(decoded.is_error());
    assert_eq!(decoded.text(), Some("no"));
}

#[test]
fn test_decode_message_last_byte_dropped_without_inspection() {
    // No sentinel: the last real character is lost
    let decoded = decode_response(&[0x00, b'o', b'k']).unwrap();
    assert_eq!(decoded, Response::Message("o".to_string()));
}

#[test]
fn test_decode_message_kind_only() {
    assert_eq!(decode_response(&[0x00]), Ok(Response::Message(String::new())));
    assert_eq!(decode_response(&[0x01, 0xFF]), Ok(Response::Error(String::new())));
}

#[test]
fn test_decode_message_invalid_utf8() {
    assert_eq!(
        decode_response(&[0x00, 0xC3, 0x28, 0xFF]),
        Err(DecodeError::InvalidText)
    );
}

// =============================================================================
// Record Tests
// =============================================================================

#[test]
fn test_decode_record() {
    let bytes = [0x02, 0x00, 0x61, 0x00, 0x01, 0x2A, 0x00, 0x00, 0x00, 0xFF];
    let decoded = decode_response(&bytes).unwrap();

    assert_eq!(
        decoded,
        Response::Record(vec![Field::new(TAG_KEY, "a"), Field::new(TAG_ID, 42i32)])
    );
    assert_eq!(decoded.field("id").map(|f| &f.value), Some(&FieldValue::Int32(42)));
    assert_eq!(decoded.to_string(), "key: a\nid: 42");
}

#[test]
fn test_decode_record_all_kinds() {
    let mut bytes = vec![0x02];
    bytes.extend_from_slice(&[0x02, b'b', b'o', b'b', 0x00]);
    bytes.push(0x04);
    bytes.extend_from_slice(&1_700_000_000i64.to_le_bytes());
    bytes.extend_from_slice(&[0x06, b's', 0x00]);
    bytes.push(0x09);
    bytes.extend_from_slice(&(-1i32).to_le_bytes());
    bytes.push(0xFF);

    let decoded = decode_response(&bytes).unwrap();
    let fields = decoded.fields().unwrap();

    assert_eq!(fields.len(), 4);
    assert_eq!(fields[0].value.as_str(), Some("bob"));
    assert_eq!(fields[1].value, FieldValue::Int64(1_700_000_000));
    assert_eq!(fields[2].label(), "transsrc");
    assert_eq!(fields[3].value.as_i64(), Some(-1));
}

#[test]
fn test_decode_record_stops_at_terminator() {
    // Bytes after 0xFF are not part of the record
    let bytes = [0x02, 0x08, b't', 0x00, 0xFF, 0x42, 0x42];
    let decoded = decode_response(&bytes).unwrap();
    assert_eq!(decoded.fields().unwrap().len(), 1);
}

#[test]
fn test_decode_record_ends_at_buffer_end() {
    let bytes = [0x02, 0x00, b'k', 0x00];
    let decoded = decode_response(&bytes).unwrap();
    assert_eq!(decoded, Response::Record(vec![Field::new(TAG_KEY, "k")]));
}

#[test]
fn test_decode_empty_record() {
    assert_eq!(decode_response(&[0x02]), Ok(Response::Record(vec![])));
    assert_eq!(decode_response(&[0x02, 0xFF]), Ok(Response::Record(vec![])));
}

#[test]
fn test_decode_record_preserves_wire_order() {
    let bytes = [0x02, 0x03, b'd', 0x00, 0x00, b'k', 0x00, 0xFF];
    let decoded = decode_response(&bytes).unwrap();
    let tags: Vec<u8> = decoded.fields().unwrap().iter().map(|f| f.tag).collect();
    assert_eq!(tags, vec![TAG_DISPLAY, TAG_KEY]);
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_decode_empty() {
    assert_eq!(decode_response(&[]), Err(DecodeError::Empty));
}

#[test]
fn test_decode_unknown_kind() {
    assert_eq!(decode_response(&[0x03, 0xFF]), Err(DecodeError::UnknownKind(0x03)));
    assert_eq!(decode_response(&[0xFF]), Err(DecodeError::UnknownKind(0xFF)));
}

#[test]
fn test_decode_unknown_tag() {
    let bytes = [0x02, 0x00, b'k', 0x00, 0x0A, 0x01, 0x02, 0xFF];
    assert_eq!(decode_response(&bytes), Err(DecodeError::UnknownTag(0x0A)));
}

#[test]
fn test_decode_truncated_int32() {
    let bytes = [0x02, 0x01, 0x2A, 0x00];
    assert_eq!(decode_response(&bytes), Err(DecodeError::Truncated));
}

#[test]
fn test_decode_truncated_int64() {
    let bytes = [0x02, 0x04, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
    assert_eq!(decode_response(&bytes), Err(DecodeError::Truncated));
}

#[test]
fn test_decode_tag_without_value() {
    assert_eq!(decode_response(&[0x02, 0x09]), Err(DecodeError::Truncated));
    assert_eq!(decode_response(&[0x02, 0x00]), Err(DecodeError::Truncated));
}

#[test]
fn test_decode_unterminated_string() {
    let bytes = [0x02, 0x02, b'b', b'o', b'b'];
    assert_eq!(decode_response(&bytes), Err(DecodeError::Truncated));
}

#[test]
fn test_decode_record_invalid_utf8() {
    let bytes = [0x02, 0x03, 0xFF, 0xFE, 0x00, 0xFF];
    assert_eq!(decode_response(&bytes), Err(DecodeError::InvalidText));
}

// =============================================================================
// Service Side Tests
// =============================================================================

#[test]
fn test_decode_request_from_encoder() {
    let fields = Fields::new()
        .with("key", "abc")
        .with("user", "bob")
        .with("expire", "99");
    let encoded = encode_request("commit", &fields).unwrap();

    let (request, consumed) = decode_request(&encoded).unwrap();
    assert_eq!(consumed, encoded.len());
    assert_eq!(request.command, CommandType::Commit);
    assert_eq!(
        request.fields,
        vec![
            Field::new(TAG_KEY, "abc"),
            Field::new(TAG_USER, "bob"),
            Field::new(TAG_EXPIRE, 99i64),
        ]
    );
    assert_eq!(request.field("user").map(|f| f.to_string()), Some("user: bob".to_string()));
}

#[test]
fn test_decode_back_to_back_requests() {
    let first = encode_request("transfer", &Fields::new().with("src", "a").with("dst", "b")).unwrap();
    let second = encode_request("lookup", &Fields::new().with("key", "k")).unwrap();
    let stream = [&first[..], &second[..]].concat();

    let (request, consumed) = decode_request(&stream).unwrap();
    assert_eq!(request.command, CommandType::Transfer);
    assert_eq!(request.fields[0], Field::new(TAG_SRC, "a"));
    assert_eq!(consumed, first.len());

    let (request, consumed) = decode_request(&stream[consumed..]).unwrap();
    assert_eq!(request.command, CommandType::Lookup);
    assert_eq!(consumed, second.len());
}

#[test]
fn test_decode_request_errors() {
    assert_eq!(decode_request(&[]), Err(DecodeError::Empty));
    assert_eq!(decode_request(&[0x04, 0xFF]), Err(DecodeError::UnknownCommand(0x04)));
    assert_eq!(decode_request(&[0x00, 0x0C, 0xFF]), Err(DecodeError::UnknownTag(0x0C)));
    assert_eq!(decode_request(&[0x00]), Err(DecodeError::Truncated));
}

#[test]
fn test_encode_response_wire_format() {
    assert_eq!(
        &encode_response(&Response::message("Hi")).unwrap()[..],
        &[0x00, 0x48, 0x69, 0xFF]
    );
    assert_eq!(&encode_response(&Response::error("")).unwrap()[..], &[0x01, 0xFF]);

    let record = Response::record(vec![Field::new(TAG_KEY, "a"), Field::new(TAG_ID, 42i32)]);
    assert_eq!(
        &encode_response(&record).unwrap()[..],
        &[0x02, 0x00, 0x61, 0x00, 0x01, 0x2A, 0x00, 0x00, 0x00, 0xFF]
    );
}

#[test]
fn test_encode_decode_response() {
    let responses = vec![
        Response::message("session created"),
        Response::error("no such session"),
        Response::record(vec![
            Field::new(TAG_KEY, "k"),
            Field::new(TAG_ID, i32::MIN),
            Field::new(TAG_EXPIRE, i64::MAX),
            Field::new(TAG_DISPLAY, "Zoë"),
        ]),
    ];

    for response in responses {
        let encoded = encode_response(&response).unwrap();
        assert_eq!(decode_response(&encoded), Ok(response));
    }
}

#[test]
fn test_encode_response_rejects_embedded_nul() {
    let record = Response::record(vec![Field::new(TAG_KEY, "a\0b"), Field::new(TAG_USER, "u")]);
    assert_eq!(encode_response(&record), Err(EncodeError::EmbeddedNul("key")));

    assert_eq!(
        encode_response(&Response::message("half\0way")),
        Err(EncodeError::EmbeddedNul("text"))
    );
    assert_eq!(
        encode_response(&Response::error("\0")),
        Err(EncodeError::EmbeddedNul("text"))
    );
}

#[test]
fn test_encode_response_rejects_value_of_wrong_kind() {
    let cases = [
        (Field::new(TAG_ID, "x"), "id"),
        (Field::new(TAG_EXPIRE, 5i32), "expire"),
        (Field::new(TAG_LIFETIME, 5i64), "lifetime"),
        (Field::new(TAG_USER, 1i32), "user"),
    ];
    for (field, name) in cases {
        assert_eq!(
            encode_response(&Response::record(vec![field])),
            Err(EncodeError::KindMismatch(name))
        );
    }
}

#[test]
fn test_encode_response_rejects_unknown_tag() {
    // The sentinel as a field tag would cut the record short
    let record = Response::record(vec![Field::new(FIELD_END, "x"), Field::new(TAG_KEY, "k")]);
    assert_eq!(encode_response(&record), Err(EncodeError::UnknownTag(FIELD_END)));

    let record = Response::record(vec![Field::new(0x0A, "x")]);
    assert_eq!(encode_response(&record), Err(EncodeError::UnknownTag(0x0A)));
}

// =============================================================================
// Serde Tests
// =============================================================================

#[test]
fn test_response_serde_round_trip() {
    let responses = vec![
        Response::message("ok"),
        Response::error("denied"),
        Response::record(vec![Field::new(TAG_KEY, "k"), Field::new(TAG_EXPIRE, -1i64)]),
    ];

    for response in responses {
        let bytes = bincode::serialize(&response).unwrap();
        let restored: Response = bincode::deserialize(&bytes).unwrap();
        assert_eq!(restored, response);
    }
}

#[test]
fn test_request_serde_round_trip() {
    let encoded = encode_request("transfer", &Fields::new().with("src", "a").with("dst", "b")).unwrap();
    let (request, _) = decode_request(&encoded).unwrap();

    let bytes = bincode::serialize(&request).unwrap();
    let restored: Request = bincode::deserialize(&bytes).unwrap();
    assert_eq!(restored, request);
}
