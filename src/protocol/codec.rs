//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request Format
//! ```text
//! ┌──────────┬─────────┬───────────┬─────┬─────────┬───────────┬──────┐
//! │ Cmd (1)  │ Tag (1) │  Value    │ ... │ Tag (1) │  Value    │ 0xFF │
//! └──────────┴─────────┴───────────┴─────┴─────────┴───────────┴──────┘
//! ```
//!
//! ### Response Format
//! ```text
//! ┌──────────┬──────────────────────────────────────────────┐
//! │ Kind (1) │ MESSAGE/ERROR: text bytes + trailing byte    │
//! │          │ RECORD: (tag, value)* + 0xFF or end of data  │
//! └──────────┴──────────────────────────────────────────────┘
//! ```
//!
//! ### Values
//! - CString: bytes + 0x00
//! - Int32LE: 4 bytes, little-endian
//! - Int64LE: 8 bytes, little-endian

use std::str::FromStr;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{DecodeError, EncodeError};
use super::command::{CommandType, Fields, Request};
use super::field::{
    field_by_tag, Field, FieldDescriptor, FieldKind, FieldValue, FIELD_END, FIELD_TABLE,
    TAG_DISPLAY, TAG_DST, TAG_EXPIRE, TAG_ID, TAG_KEY, TAG_LIFETIME, TAG_REDIRECT, TAG_SRC,
    TAG_TAG, TAG_USER,
};
use super::response::{Response, ResponseKind};

/// Optional fields of non-transfer requests, in emission order
pub const OPTIONAL_FIELD_ORDER: [u8; 7] = [
    TAG_USER,
    TAG_ID,
    TAG_DISPLAY,
    TAG_EXPIRE,
    TAG_REDIRECT,
    TAG_TAG,
    TAG_LIFETIME,
];

/// Fields of a transfer request, all required, in emission order
pub const TRANSFER_FIELDS: [u8; 2] = [TAG_SRC, TAG_DST];

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a request given its command name
///
/// Unknown names fail with [`EncodeError::UnknownCommand`].
pub fn encode_request(command: &str, fields: &Fields) -> Result<Bytes, EncodeError> {
    let command = CommandType::from_str(command)?;
    encode_command(command, fields)
}

/// Encode a request
///
/// Transfer carries exactly `src` and `dst`. Every other command carries
/// `key` followed by whichever optional fields are present, in
/// [`OPTIONAL_FIELD_ORDER`] regardless of how `fields` was built.
pub fn encode_command(command: CommandType, fields: &Fields) -> Result<Bytes, EncodeError> {
    let mut message = BytesMut::with_capacity(64);
    message.put_u8(command.selector());

    match command {
        CommandType::Transfer => {
            for tag in TRANSFER_FIELDS {
                put_required_field(&mut message, &FIELD_TABLE[tag as usize], fields)?;
            }
        }
        CommandType::Lookup | CommandType::Commit | CommandType::Create => {
            put_required_field(&mut message, &FIELD_TABLE[TAG_KEY as usize], fields)?;

            for tag in OPTIONAL_FIELD_ORDER {
                let descriptor = &FIELD_TABLE[tag as usize];
                if let Some(raw) = fields.get(descriptor.name) {
                    put_raw_field(&mut message, descriptor, raw)?;
                }
            }
        }
    }

    message.put_u8(FIELD_END);
    Ok(message.freeze())
}

fn put_required_field(
    buf: &mut BytesMut,
    descriptor: &'static FieldDescriptor,
    fields: &Fields,
) -> Result<(), EncodeError> {
    let raw = fields
        .get(descriptor.name)
        .ok_or(EncodeError::MissingField(descriptor.name))?;
    put_raw_field(buf, descriptor, raw)
}

/// Append one field from its raw (textual) input form
fn put_raw_field(
    buf: &mut BytesMut,
    descriptor: &'static FieldDescriptor,
    raw: &[u8],
) -> Result<(), EncodeError> {
    match descriptor.kind {
        FieldKind::CString => {
            if raw.contains(&0) {
                return Err(EncodeError::EmbeddedNul(descriptor.name));
            }
            buf.put_u8(descriptor.tag);
            put_cstring(buf, raw);
        }
        FieldKind::Int32LE => {
            let value: i32 = parse_integer(descriptor, raw)?;
            buf.put_u8(descriptor.tag);
            buf.put_i32_le(value);
        }
        FieldKind::Int64LE => {
            let value: i64 = parse_integer(descriptor, raw)?;
            buf.put_u8(descriptor.tag);
            buf.put_i64_le(value);
        }
    }
    Ok(())
}

fn parse_integer<T: FromStr>(
    descriptor: &'static FieldDescriptor,
    raw: &[u8],
) -> Result<T, EncodeError> {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|text| text.trim().parse().ok())
        .ok_or(EncodeError::InvalidInteger(descriptor.name))
}

fn put_cstring(buf: &mut BytesMut, bytes: &[u8]) {
    buf.put_slice(bytes);
    buf.put_u8(0);
}

/// Append a decoded value in its wire form
///
/// String values must not contain NUL.
pub fn encode_value(buf: &mut BytesMut, value: &FieldValue) {
    match value {
        FieldValue::Str(text) => put_cstring(buf, text.as_bytes()),
        FieldValue::Int32(v) => buf.put_i32_le(*v),
        FieldValue::Int64(v) => buf.put_i64_le(*v),
    }
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Decode a response
pub fn decode_response(bytes: &[u8]) -> Result<Response, DecodeError> {
    let (&kind_byte, body) = bytes.split_first().ok_or(DecodeError::Empty)?;
    let kind = ResponseKind::from_byte(kind_byte).ok_or(DecodeError::UnknownKind(kind_byte))?;

    match kind {
        ResponseKind::Message => Ok(Response::Message(decode_text(body)?)),
        ResponseKind::Error => Ok(Response::Error(decode_text(body)?)),
        ResponseKind::Record => {
            let (fields, _) = decode_fields(body, false)?;
            Ok(Response::Record(fields))
        }
    }
}

/// Text payload of a MESSAGE/ERROR response
///
/// The last byte is always the producer's trailing sentinel and is dropped
/// without being inspected. A peer that omits it loses its last character.
fn decode_text(body: &[u8]) -> Result<String, DecodeError> {
    let end = body.len().saturating_sub(1);
    std::str::from_utf8(&body[..end])
        .map(str::to_owned)
        .map_err(|_| DecodeError::InvalidText)
}

/// Decode one value of the given kind from the start of `bytes`
///
/// Returns the value and the number of bytes consumed.
pub fn decode_value(kind: FieldKind, bytes: &[u8]) -> Result<(FieldValue, usize), DecodeError> {
    match kind {
        FieldKind::CString => {
            let end = bytes
                .iter()
                .position(|&b| b == 0)
                .ok_or(DecodeError::Truncated)?;
            let text = std::str::from_utf8(&bytes[..end]).map_err(|_| DecodeError::InvalidText)?;
            Ok((FieldValue::Str(text.to_owned()), end + 1))
        }
        FieldKind::Int32LE => {
            let raw = read_array::<4>(bytes)?;
            Ok((FieldValue::Int32(i32::from_le_bytes(raw)), raw.len()))
        }
        FieldKind::Int64LE => {
            let raw = read_array::<8>(bytes)?;
            Ok((FieldValue::Int64(i64::from_le_bytes(raw)), raw.len()))
        }
    }
}

fn read_array<const N: usize>(bytes: &[u8]) -> Result<[u8; N], DecodeError> {
    bytes
        .get(..N)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(DecodeError::Truncated)
}

/// Walk (tag, value) pairs until the terminator
///
/// Returns the fields and the bytes consumed, terminator included. Running
/// out of bytes ends the list unless `require_end` is set.
fn decode_fields(bytes: &[u8], require_end: bool) -> Result<(Vec<Field>, usize), DecodeError> {
    let mut fields = Vec::new();
    let mut offset = 0;

    while let Some(&tag) = bytes.get(offset) {
        offset += 1;
        if tag == FIELD_END {
            return Ok((fields, offset));
        }

        let descriptor = field_by_tag(tag).ok_or(DecodeError::UnknownTag(tag))?;
        let (value, used) = decode_value(descriptor.kind, &bytes[offset..])?;
        offset += used;

        fields.push(Field { tag, value });
    }

    if require_end {
        Err(DecodeError::Truncated)
    } else {
        Ok((fields, offset))
    }
}

// =============================================================================
// Request Decoding / Response Encoding (service side)
// =============================================================================

/// Decode a request
///
/// Returns the request and the number of bytes consumed, so back-to-back
/// requests in one buffer can be split. The terminator is mandatory.
pub fn decode_request(bytes: &[u8]) -> Result<(Request, usize), DecodeError> {
    let (&selector, rest) = bytes.split_first().ok_or(DecodeError::Empty)?;
    let command =
        CommandType::from_selector(selector).ok_or(DecodeError::UnknownCommand(selector))?;

    let (fields, used) = decode_fields(rest, true)?;
    Ok((Request { command, fields }, used + 1))
}

/// Encode a response
///
/// Format: kind (1) + body + 0xFF
///
/// Record fields must carry a known tag and a value of the kind the field
/// table assigns to it. Strings, message text included, must not contain NUL.
pub fn encode_response(response: &Response) -> Result<Bytes, EncodeError> {
    let mut message = BytesMut::with_capacity(64);
    message.put_u8(response.kind() as u8);

    match response {
        Response::Message(text) | Response::Error(text) => {
            if text.contains('\0') {
                return Err(EncodeError::EmbeddedNul("text"));
            }
            message.put_slice(text.as_bytes());
        }
        Response::Record(fields) => {
            for field in fields {
                put_field(&mut message, field)?;
            }
        }
    }

    message.put_u8(FIELD_END);
    Ok(message.freeze())
}

fn put_field(buf: &mut BytesMut, field: &Field) -> Result<(), EncodeError> {
    let descriptor = field_by_tag(field.tag).ok_or(EncodeError::UnknownTag(field.tag))?;
    if field.value.kind() != descriptor.kind {
        return Err(EncodeError::KindMismatch(descriptor.name));
    }
    if matches!(&field.value, FieldValue::Str(text) if text.contains('\0')) {
        return Err(EncodeError::EmbeddedNul(descriptor.name));
    }

    buf.put_u8(field.tag);
    encode_value(buf, &field.value);
    Ok(())
}
